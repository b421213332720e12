//! Property-based tests for the validation and ordering helpers

use chrono::{Duration, Utc};
use proptest::prelude::*;
use todosync::shared::todo::{normalize_text, sort_newest_first, Todo};

proptest! {
    #[test]
    fn prop_normalized_text_matches_trim(text in "\\PC{0,64}") {
        match normalize_text(&text) {
            Some(normalized) => {
                prop_assert_eq!(normalized.as_str(), text.trim());
                prop_assert!(!normalized.is_empty());
            }
            None => prop_assert!(text.trim().is_empty()),
        }
    }

    #[test]
    fn prop_whitespace_padding_never_survives(padding in "[ \\t]{0,8}", core in "[a-z]{1,16}") {
        let input = format!("{}{}{}", padding, core, padding);
        let normalized = normalize_text(&input).unwrap();
        prop_assert_eq!(normalized, core);
    }

    #[test]
    fn prop_sort_is_descending_for_any_insertion_order(
        offsets in proptest::collection::vec(0i64..1_000_000, 0..32)
    ) {
        let base = Utc::now();
        let mut todos: Vec<Todo> = offsets
            .iter()
            .map(|&seconds| {
                let mut todo = Todo::new("task".to_string());
                todo.created_at = base + Duration::seconds(seconds);
                todo.updated_at = todo.created_at;
                todo
            })
            .collect();

        sort_newest_first(&mut todos);

        for pair in todos.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn prop_sort_is_idempotent(
        offsets in proptest::collection::vec(0i64..1_000, 0..16)
    ) {
        let base = Utc::now();
        let mut todos: Vec<Todo> = offsets
            .iter()
            .map(|&seconds| {
                let mut todo = Todo::new("task".to_string());
                todo.created_at = base + Duration::seconds(seconds);
                todo
            })
            .collect();

        sort_newest_first(&mut todos);
        let once = todos.clone();
        sort_newest_first(&mut todos);
        prop_assert_eq!(once, todos);
    }
}
