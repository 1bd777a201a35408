use std::env;

use serde::{Deserialize, Serialize};

/// Runtime configuration, sourced from the environment with development
/// defaults baked in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// Logical database name.
    pub database: String,
    /// Collection holding the todo documents.
    pub collection: String,
    /// HTTP listening port.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mongo_uri: "mongodb://localhost:27017".to_string(),
            database: "todo_db".to_string(),
            collection: "todos".to_string(),
            port: 5000,
        }
    }
}

impl AppConfig {
    /// Read `MONGO_URI`, `MONGO_DB`, `MONGO_COLLECTION` and `PORT`,
    /// falling back to the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            mongo_uri: env::var("MONGO_URI").unwrap_or(defaults.mongo_uri),
            database: env::var("MONGO_DB").unwrap_or(defaults.database),
            collection: env::var("MONGO_COLLECTION").unwrap_or(defaults.collection),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}
