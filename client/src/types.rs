//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently
//! of the mock-server crate; the integration tests catch any drift between
//! the two. Ids are server-assigned integers — a freshly composed todo has
//! no id until the backend returns one, which is why `CreateTodo` carries
//! no id field at all.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo item.
pub type TodoId = i64;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
}

impl Todo {
    /// What the UI shows for the description: the text itself, or the
    /// `"No Description"` placeholder when it is absent or empty.
    pub fn display_description(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "No Description",
        }
    }
}

/// Request payload for creating a new todo. `completed` always starts out
/// `false`; an empty description is sent as no description at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for updating an existing todo. Only the fields present
/// in the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// True when no field is populated — the resulting PUT body is `{}`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_deserializes_without_description() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":1,"title":"Buy milk","completed":false}"#).unwrap();
        assert_eq!(todo.id, 1);
        assert!(todo.description.is_none());
    }

    #[test]
    fn todo_deserializes_with_null_description() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":2,"title":"T","description":null,"completed":true}"#)
                .unwrap();
        assert!(todo.description.is_none());
        assert!(todo.completed);
    }

    #[test]
    fn display_description_falls_back_to_placeholder() {
        let mut todo = Todo {
            id: 1,
            title: "T".to_string(),
            description: None,
            completed: false,
        };
        assert_eq!(todo.display_description(), "No Description");

        todo.description = Some(String::new());
        assert_eq!(todo.display_description(), "No Description");

        todo.description = Some("Semi-skimmed".to_string());
        assert_eq!(todo.display_description(), "Semi-skimmed");
    }

    #[test]
    fn create_todo_omits_absent_description() {
        let input = CreateTodo {
            title: "Buy milk".to_string(),
            description: None,
            completed: false,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["completed"], false);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn create_todo_keeps_present_description() {
        let input = CreateTodo {
            title: "Buy milk".to_string(),
            description: Some("Two liters".to_string()),
            completed: false,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["description"], "Two liters");
    }

    #[test]
    fn update_todo_serializes_only_populated_fields() {
        let input = UpdateTodo {
            title: Some("New title".to_string()),
            ..UpdateTodo::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["title"], "New title");
        assert!(json.get("description").is_none());
        assert!(json.get("completed").is_none());
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let input = UpdateTodo::default();
        assert!(input.is_empty());
        assert_eq!(serde_json::to_string(&input).unwrap(), "{}");
    }
}
