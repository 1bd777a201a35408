use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bson::oid::ObjectId;
use serde_json::{json, Value};

use crate::entity::{CreateTodo, Todo, TodoPatch, TodoResponse};
use crate::error::{ApiError, Result};
use crate::storage::TodoStore;

/// POST /todos
pub async fn create_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Response> {
    let body = read_json(body)?;
    if body.get("title").is_none() {
        return Err(ApiError::Validation("Title is required".to_string()));
    }

    let input: CreateTodo =
        serde_json::from_value(body).map_err(|err| ApiError::Validation(err.to_string()))?;
    if input.title.trim().is_empty() {
        return Err(ApiError::Validation("Title cannot be empty".to_string()));
    }

    let mut todo = Todo::new(input.title, input.description);
    let id = store.insert_todo(&todo).await?;
    todo.id = Some(id);

    Ok((StatusCode::CREATED, Json(TodoResponse::from(&todo))).into_response())
}

/// GET /todos
pub async fn list_todos<S: TodoStore>(State(store): State<Arc<S>>) -> Result<Response> {
    let todos = store.list_todos().await?;
    let body: Vec<TodoResponse> = todos.iter().map(TodoResponse::from).collect();
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// GET /todos/{id}
pub async fn get_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = parse_object_id(&id)?;
    let todo = store.find_todo(id).await?.ok_or(ApiError::NotFound)?;
    Ok((StatusCode::OK, Json(TodoResponse::from(&todo))).into_response())
}

/// PUT /todos/{id}
pub async fn update_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Response> {
    let id = parse_object_id(&id)?;

    let body = read_json(body)?;
    if !body.is_object() || body.as_object().is_some_and(|map| map.is_empty()) {
        return Err(ApiError::Validation("No data provided for update".to_string()));
    }

    let patch: TodoPatch =
        serde_json::from_value(body).map_err(|err| ApiError::Validation(err.to_string()))?;
    if patch.is_empty() {
        return Err(ApiError::Validation("No valid fields to update".to_string()));
    }

    let outcome = store.update_todo(id, &patch).await?;
    if outcome.matched == 0 {
        return Err(ApiError::NotFound);
    }
    if outcome.modified == 0 {
        // Matched but nothing changed is still a success.
        return Ok((
            StatusCode::OK,
            Json(json!({ "message": "No changes made to the todo" })),
        )
            .into_response());
    }

    let updated = store
        .find_todo(id)
        .await?
        .ok_or(ApiError::MissingAfterUpdate)?;
    Ok((StatusCode::OK, Json(TodoResponse::from(&updated))).into_response())
}

/// DELETE /todos/{id}
pub async fn delete_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = parse_object_id(&id)?;
    if !store.delete_todo(id).await? {
        return Err(ApiError::NotFound);
    }
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Todo deleted successfully" })),
    )
        .into_response())
}

/// GET /health — surfaces the store's readiness flag.
pub async fn health<S: TodoStore>(State(store): State<Arc<S>>) -> Response {
    if store.is_connected() {
        (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded" })),
        )
            .into_response()
    }
}

fn parse_object_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

// Axum's own rejection would answer in plain text; fold it into the JSON
// error shape instead.
fn read_json(body: std::result::Result<Json<Value>, JsonRejection>) -> Result<Value> {
    let Json(value) = body.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    Ok(value)
}
