//! In-memory store
//!
//! A `TodoStore` backed by a `Vec` behind a `tokio::sync::RwLock`, with
//! the same semantics as the PostgreSQL store: assigned ids, refreshed
//! `updated_at`, newest-first listing. The integration suite injects
//! this store to exercise the handlers without a database.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::store::{NewTodo, StoreError, TodoPatch, TodoStore};
use crate::shared::todo::{sort_newest_first, Todo};

/// In-memory `TodoStore`
///
/// Cheap to clone; all clones share the same records.
#[derive(Clone, Default)]
pub struct MemoryTodoStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (test helper)
    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let mut todos = self.todos.read().await.clone();
        sort_newest_first(&mut todos);
        Ok(todos)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        Ok(self.todos.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4(),
            text: new.text,
            completed: new.completed,
            priority: new.priority,
            due_date: new.due_date,
            created_at: new.created_at,
            updated_at: now,
        };
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: Uuid, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(text) = patch.text {
            todo.text = text;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(priority) = patch.priority {
            todo.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            todo.due_date = Some(due_date);
        }
        todo.updated_at = Utc::now();

        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        let position = todos.iter().position(|t| t.id == id);
        Ok(position.map(|i| todos.remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::todo::Priority;
    use chrono::Duration;

    fn new_todo(text: &str) -> NewTodo {
        NewTodo {
            text: text.to_string(),
            completed: false,
            priority: Priority::default(),
            due_date: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryTodoStore::new();
        let created = store.create(new_todo("buy milk")).await.unwrap();

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.text, "buy milk");
        assert!(fetched.updated_at >= fetched.created_at);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryTodoStore::new();
        let base = Utc::now();
        for (i, text) in ["first", "second", "third"].iter().enumerate() {
            let mut new = new_todo(text);
            new.created_at = base + Duration::seconds(i as i64);
            store.create(new).await.unwrap();
        }

        let todos = store.list().await.unwrap();
        assert_eq!(todos[0].text, "third");
        assert_eq!(todos[2].text, "first");
    }

    #[tokio::test]
    async fn test_update_missing_id() {
        let store = MemoryTodoStore::new();
        let result = store
            .update(Uuid::new_v4(), TodoPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let store = MemoryTodoStore::new();
        let created = store.create(new_todo("buy milk")).await.unwrap();

        let patch = TodoPatch {
            completed: Some(true),
            ..TodoPatch::default()
        };
        let updated = store.update(created.id, patch).await.unwrap().unwrap();
        assert!(updated.completed);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemoryTodoStore::new();
        let created = store.create(new_todo("buy milk")).await.unwrap();

        let deleted = store.delete(created.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(store.get(created.id).await.unwrap().is_none());

        // Second delete finds nothing
        assert!(store.delete(created.id).await.unwrap().is_none());
    }
}
