use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::entity::{Todo, TodoPatch};

use super::{StoreError, StoreResult, TodoStore, UpdateOutcome};

/// Storage adapter holding one connection to the todo collection.
///
/// `connect` is best-effort: when the initial ping fails the store comes
/// up without a collection handle and every operation reports
/// `StoreError::Unavailable` instead of taking the process down. The
/// driver's internal pool handles concurrent use; this type holds no
/// locks of its own.
pub struct MongoStore {
    collection: Option<Collection<Todo>>,
}

impl MongoStore {
    /// Connect to MongoDB and ping the target database.
    pub async fn connect(config: &AppConfig) -> Self {
        match Self::try_connect(config).await {
            Ok(collection) => {
                info!(
                    database = %config.database,
                    collection = %config.collection,
                    "connected to MongoDB"
                );
                Self {
                    collection: Some(collection),
                }
            }
            Err(err) => {
                warn!(error = %err, "could not connect to MongoDB, serving degraded");
                Self { collection: None }
            }
        }
    }

    async fn try_connect(config: &AppConfig) -> mongodb::error::Result<Collection<Todo>> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let database = client.database(&config.database);
        database.run_command(doc! { "ping": 1 }).await?;
        Ok(database.collection(&config.collection))
    }

    fn collection(&self) -> StoreResult<&Collection<Todo>> {
        self.collection.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl TodoStore for MongoStore {
    fn is_connected(&self) -> bool {
        self.collection.is_some()
    }

    async fn insert_todo(&self, todo: &Todo) -> StoreResult<ObjectId> {
        let result = self.collection()?.insert_one(todo).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Unexpected("inserted_id was not an ObjectId".to_string()))
    }

    async fn list_todos(&self) -> StoreResult<Vec<Todo>> {
        let cursor = self.collection()?.find(doc! {}).await?;
        let todos: Vec<Todo> = cursor.try_collect().await?;
        Ok(todos)
    }

    async fn find_todo(&self, id: ObjectId) -> StoreResult<Option<Todo>> {
        Ok(self.collection()?.find_one(doc! { "_id": id }).await?)
    }

    async fn update_todo(&self, id: ObjectId, patch: &TodoPatch) -> StoreResult<UpdateOutcome> {
        let mut set = Document::new();
        if let Some(title) = &patch.title {
            set.insert("title", title.as_str());
        }
        if let Some(description) = &patch.description {
            set.insert("description", description.as_str());
        }
        if let Some(completed) = patch.completed {
            set.insert("completed", completed);
        }

        let result = self
            .collection()?
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_todo(&self, id: ObjectId) -> StoreResult<bool> {
        let result = self.collection()?.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count == 1)
    }
}
