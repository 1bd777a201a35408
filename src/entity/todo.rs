// src/entity/todo.rs
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo document as stored in MongoDB.
///
/// `id` is `None` until the document has been inserted; `created_at` is
/// persisted as a native BSON datetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: None,
            title,
            description,
            completed: false,
            // BSON datetimes are millisecond precision; stamp at that
            // granularity so a re-read renders the same wire string.
            created_at: bson::DateTime::now().to_chrono(),
        }
    }
}

/// Request body for `POST /todos`. The server assigns `id`, `created_at`
/// and `completed`, so only `title` and `description` are accepted here.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Partial-update payload for `PUT /todos/{id}`. Only fields present in
/// the request change; everything else is left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Wire representation of a todo: the ObjectId rendered as its hex string
/// and the timestamp as RFC 3339.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: String,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            created_at: todo.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_todo_starts_incomplete_and_unsaved() {
        let todo = Todo::new("Buy milk".to_string(), String::new());
        assert!(todo.id.is_none());
        assert!(!todo.completed);
        assert_eq!(todo.description, "");
    }

    #[test]
    fn todo_document_omits_missing_id_and_stores_native_datetime() {
        let todo = Todo::new("Buy milk".to_string(), String::new());
        let doc = bson::to_document(&todo).unwrap();
        assert!(!doc.contains_key("_id"));
        assert!(matches!(doc.get("created_at"), Some(bson::Bson::DateTime(_))));
    }

    #[test]
    fn create_defaults_description_to_empty() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.description, "");
    }

    #[test]
    fn create_rejects_unrecognized_field() {
        let result: Result<CreateTodo, _> =
            serde_json::from_str(r#"{"title":"Buy milk","completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_all_fields_optional() {
        let patch: TodoPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_partial_fields() {
        let patch: TodoPatch = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
        assert_eq!(patch.completed, Some(true));
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_rejects_mistyped_field() {
        let result: Result<TodoPatch, _> = serde_json::from_str(r#"{"completed":"yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn response_renders_hex_id_and_rfc3339_timestamp() {
        let todo = Todo {
            id: Some(ObjectId::parse_str("aaaaaaaaaaaaaaaaaaaaaaaa").unwrap()),
            title: "Buy milk".to_string(),
            description: "2 liters".to_string(),
            completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
        };

        let response = TodoResponse::from(&todo);
        assert_eq!(response.id, "aaaaaaaaaaaaaaaaaaaaaaaa");
        assert_eq!(response.created_at, "2024-01-15T09:30:00+00:00");
        assert_eq!(response.description, "2 liters");
    }
}
