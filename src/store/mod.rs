//! Record store trait and implementations

mod firestore;
mod snapshot;
pub mod value_codec;

pub use firestore::FirestoreStore;
pub use snapshot::SnapshotStore;

use serde_json::Value;

use crate::config::{Config, StoreConfig};
use crate::types::{Document, Result};

/// Remote document collection used by every admin view
pub trait RecordStore: Send + Sync {
    /// Store name for logs (e.g., "firestore")
    fn name(&self) -> &str;

    /// Fetch every document in a collection
    fn fetch_all(&self, collection: &str) -> Result<Vec<Document>>;

    /// Fetch documents whose `field` equals `value`.
    /// Default implementation filters a full fetch.
    fn fetch_where(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>> {
        Ok(self
            .fetch_all(collection)?
            .into_iter()
            .filter(|doc| doc.get(field) == Some(value))
            .collect())
    }

    /// Fetch one document by id; `None` if absent
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Set a single field on an existing document
    fn update_field(&self, collection: &str, id: &str, field: &str, value: Value) -> Result<()>;

    /// Delete a document
    fn delete(&self, collection: &str, id: &str) -> Result<()>;
}

/// Open the store selected by configuration
pub fn open(config: &Config) -> Result<Box<dyn RecordStore>> {
    match config.store()? {
        StoreConfig::Snapshot(path) => {
            tracing::info!(path = %path.display(), "opening snapshot store");
            Ok(Box::new(SnapshotStore::open(path)?))
        }
        StoreConfig::Firestore(settings) => {
            tracing::info!(project = %settings.project_id, "opening firestore store");
            Ok(Box::new(FirestoreStore::new(settings)?))
        }
    }
}
