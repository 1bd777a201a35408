//! Persistence layer: the `TodoStore` seam and its MongoDB implementation.

mod mongo_store;

pub use mongo_store::MongoStore;

use std::future::Future;

use bson::oid::ObjectId;
use thiserror::Error;

use crate::entity::{Todo, TodoPatch};

/// Errors surfaced by the storage layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No live connection; the startup ping failed.
    #[error("Database not connected")]
    Unavailable,

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),

    #[error("{0}")]
    Unexpected(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Match/modify counts from an update, so the caller can tell "not found"
/// from "found but unchanged" from "found and changed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// The storage operations the HTTP handlers depend on.
///
/// `MongoStore` is the production implementation; the handlers take any
/// implementation so tests can inject an in-memory double. Identifier
/// syntax is checked at the HTTP boundary, so every method receives an
/// already valid `ObjectId`.
pub trait TodoStore: Send + Sync + 'static {
    /// Whether the startup connection succeeded.
    fn is_connected(&self) -> bool;

    /// Insert one document and return its generated identifier.
    fn insert_todo(&self, todo: &Todo) -> impl Future<Output = StoreResult<ObjectId>> + Send;

    /// All documents in the collection, in natural order.
    fn list_todos(&self) -> impl Future<Output = StoreResult<Vec<Todo>>> + Send;

    fn find_todo(&self, id: ObjectId) -> impl Future<Output = StoreResult<Option<Todo>>> + Send;

    /// Apply only the fields present in `patch` to the matching document.
    fn update_todo(
        &self,
        id: ObjectId,
        patch: &TodoPatch,
    ) -> impl Future<Output = StoreResult<UpdateOutcome>> + Send;

    /// Returns whether a document was removed.
    fn delete_todo(&self, id: ObjectId) -> impl Future<Output = StoreResult<bool>> + Send;
}
