//! Local cache mirror
//!
//! Keeps the last-known snapshot of the list as a JSON file in the user
//! cache directory so the client can paint instantly on startup, before
//! the subscription delivers fresh data. An absent or unreadable cache
//! simply loads as an empty list.

use std::fs;
use std::path::PathBuf;

use crate::shared::todo::Todo;

const CACHE_FILE: &str = "todos.json";

/// Snapshot cache on disk
#[derive(Debug, Clone)]
pub struct CacheMirror {
    path: PathBuf,
}

impl Default for CacheMirror {
    fn default() -> Self {
        let base = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            path: base.join("todosync").join(CACHE_FILE),
        }
    }
}

impl CacheMirror {
    /// Cache under the user cache directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache at an explicit path (tests use a temp directory)
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file backing this mirror
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the last stored snapshot
    ///
    /// Absent, unreadable, or corrupt cache files all load as an empty
    /// list; the cache is a convenience, never a source of truth.
    pub fn load(&self) -> Vec<Todo> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    /// Persist a snapshot, replacing the previous one
    pub fn store(&self, todos: &[Todo]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(todos)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let cache = CacheMirror::with_path(dir.path().join("todos.json"));

        let todos = vec![Todo::new("buy milk".to_string())];
        cache.store(&todos).unwrap();

        assert_eq!(cache.load(), todos);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let cache = CacheMirror::with_path(dir.path().join("nope.json"));
        assert!(cache.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        std::fs::write(&path, "{not json").unwrap();

        let cache = CacheMirror::with_path(path);
        assert!(cache.load().is_empty());
    }

    #[test]
    fn test_store_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let cache = CacheMirror::with_path(dir.path().join("deep").join("todos.json"));
        cache.store(&[]).unwrap();
        assert!(cache.path().exists());
    }
}
