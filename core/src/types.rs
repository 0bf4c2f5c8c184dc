//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate. Integration tests catch any schema drift between
//! the two. Field names are camelCase on the wire.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Longest title the form accepts, in characters.
pub const TITLE_MAX_CHARS: usize = 255;

/// Longest description the form accepts, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// A single todo item returned by the API.
///
/// `id`, `created_at` and `updated_at` are assigned by the server and never
/// changed on the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Todo {
    /// Whether the todo was modified after it was created.
    pub fn was_updated(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Request payload for creating a new todo. The server assigns everything
/// else, including `completed = false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Request payload for updating an existing todo. All three fields are always
/// resubmitted together; the server replaces them wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
}

impl UpdateTodo {
    /// Payload that flips `completed` and leaves the text untouched.
    pub fn toggled(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: !todo.completed,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_parses_camel_case_timestamps() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":7,"title":"Buy milk","description":"2L","completed":false,
                "createdAt":"2024-05-01T10:00:00","updatedAt":"2024-05-01T10:00:00.125"}"#,
        )
        .unwrap();
        assert_eq!(todo.id, 7);
        assert_eq!(todo.description, "2L");
        assert!(todo.was_updated());
    }

    #[test]
    fn null_description_becomes_empty() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":1,"title":"t","description":null,"completed":true,
                "createdAt":"2024-05-01T10:00:00","updatedAt":"2024-05-01T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(todo.description, "");
        assert!(!todo.was_updated());
    }

    #[test]
    fn missing_description_becomes_empty() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":1,"title":"t","completed":false,
                "createdAt":"2024-05-01T10:00:00","updatedAt":"2024-05-01T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(todo.description, "");
    }

    #[test]
    fn toggled_keeps_text_and_flips_completed() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":3,"title":"Walk","description":"dog","completed":false,
                "createdAt":"2024-05-01T10:00:00","updatedAt":"2024-05-01T10:00:00"}"#,
        )
        .unwrap();
        let input = UpdateTodo::toggled(&todo);
        assert_eq!(input.title, "Walk");
        assert_eq!(input.description, "dog");
        assert!(input.completed);
    }

    #[test]
    fn create_payload_has_no_completed_field() {
        let json = serde_json::to_value(CreateTodo {
            title: "Buy milk".to_string(),
            description: String::new(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"title": "Buy milk", "description": ""}));
    }
}
