//! JSON snapshot record store
//!
//! Holds collections from a file shaped like
//! `{"Ratings": [{"id": "r1", "rating": 5, ...}], ...}`. Used for offline
//! review and tests. Mutations are written back with an atomic replace and
//! only take effect in memory once the write succeeds.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use fs2::FileExt;
use serde_json::Value;
use tracing::{info, warn};

use super::RecordStore;
use crate::types::{AdminError, Document, Result};

type Collections = BTreeMap<String, Vec<Document>>;

/// Record store backed by a JSON snapshot (or memory only)
pub struct SnapshotStore {
    path: Option<PathBuf>,
    collections: Mutex<Collections>,
}

impl SnapshotStore {
    /// Load a snapshot file; mutations are persisted back to it
    pub fn open(path: PathBuf) -> Result<Self> {
        let collections = load_snapshot(&path)?;
        info!(
            path = %path.display(),
            collections = collections.len(),
            "loaded snapshot"
        );
        Ok(Self {
            path: Some(path),
            collections: Mutex::new(collections),
        })
    }

    /// In-memory store; nothing is written to disk
    pub fn in_memory(collections: BTreeMap<String, Vec<Document>>) -> Self {
        Self {
            path: None,
            collections: Mutex::new(collections),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>> {
        self.collections
            .lock()
            .map_err(|_| AdminError::Store("snapshot store lock poisoned".into()))
    }

    fn persist(&self, collections: &Collections) -> Result<()> {
        match &self.path {
            Some(path) => save_snapshot(path, collections),
            None => Ok(()),
        }
    }

    fn not_found(collection: &str, id: &str) -> AdminError {
        AdminError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

impl RecordStore for SnapshotStore {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn fetch_all(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.lock()?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.lock()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    fn update_field(&self, collection: &str, id: &str, field: &str, value: Value) -> Result<()> {
        let mut collections = self.lock()?;
        let mut next = collections.clone();
        let doc = next
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| Self::not_found(collection, id))?;
        doc.fields.insert(field.to_string(), value);

        self.persist(&next)?;
        *collections = next;
        info!(collection, id, field, "updated snapshot document");
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.lock()?;
        let mut next = collections.clone();
        let docs = next
            .get_mut(collection)
            .ok_or_else(|| Self::not_found(collection, id))?;

        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(Self::not_found(collection, id));
        }

        self.persist(&next)?;
        *collections = next;
        info!(collection, id, "deleted snapshot document");
        Ok(())
    }
}

fn load_snapshot(path: &Path) -> Result<Collections> {
    let mut bytes = fs::read(path)?;
    simd_json::from_slice(&mut bytes)
        .map_err(|e| AdminError::Decode(format!("invalid snapshot {}: {}", path.display(), e)))
}

/// Atomic write (temp file + rename) under an exclusive lock on a sidecar lock file
fn save_snapshot(path: &Path, collections: &Collections) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(collections)
        .map_err(|e| AdminError::Store(format!("Serialization failed: {}", e)))?;

    let lock_path = path.with_extension("json.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)?;
    lock_file
        .lock_exclusive()
        .map_err(|e| AdminError::Store(format!("Failed to acquire write lock: {}", e)))?;

    let temp_path = path.with_extension("json.tmp");
    let result = (|| -> Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;
        Ok(())
    })();

    if let Err(e) = lock_file.unlock() {
        warn!(error = %e, "failed to release snapshot lock");
    }
    result
}
