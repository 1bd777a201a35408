//! HTTP surface: the axum router and the request handlers.

pub mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::TodoStore;
use handlers::{create_todo, delete_todo, get_todo, health, list_todos, update_todo};

/// Build the application router around a storage adapter.
///
/// The adapter is injected rather than held as a global so tests can swap
/// in a double. All origins are permitted on all routes.
pub fn router<S: TodoStore>(store: Arc<S>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route(
            "/todos/{id}",
            get(get_todo::<S>)
                .put(update_todo::<S>)
                .delete(delete_todo::<S>),
        )
        .route("/health", get(health::<S>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
