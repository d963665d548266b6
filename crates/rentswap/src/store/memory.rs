use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use super::{
    DocumentStore, Fields, StoreError, StoredDocument, CREATED_AT_FIELD, UPDATED_AT_FIELD,
};

type Collections = HashMap<String, BTreeMap<u64, StoredDocument>>;

/// In-process document store used by the service binary, the demo, and tests.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<Collections>,
    sequence: AtomicU64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub fn len(&self, collection: &str) -> Result<usize, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(collection).map(BTreeMap::len).unwrap_or(0))
    }

    pub fn is_empty(&self, collection: &str) -> Result<bool, StoreError> {
        self.len(collection).map(|count| count == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, StoreError> {
        self.collections
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }

    fn next_id(&self, collection: &str) -> (u64, String) {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let prefix: String = collection.chars().take(3).collect();
        (seq, format!("{prefix}-{seq:06}"))
    }
}

fn sequence_of(id: &str) -> Option<u64> {
    id.rsplit_once('-')
        .and_then(|(_, digits)| digits.parse::<u64>().ok())
}

fn stamp(fields: &mut Fields, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
    fields.insert(
        CREATED_AT_FIELD.to_string(),
        Value::String(created_at.to_rfc3339()),
    );
    fields.insert(
        UPDATED_AT_FIELD.to_string(),
        Value::String(updated_at.to_rfc3339()),
    );
}

impl DocumentStore for MemoryDocumentStore {
    fn add_document(
        &self,
        collection: &str,
        mut fields: Fields,
    ) -> Result<StoredDocument, StoreError> {
        let (seq, id) = self.next_id(collection);
        let now = Utc::now();
        stamp(&mut fields, now, now);

        let document = StoredDocument {
            id,
            created_at: now,
            updated_at: now,
            fields,
        };

        let mut guard = self.lock()?;
        let documents = guard.entry(collection.to_string()).or_default();
        if documents.contains_key(&seq) {
            return Err(StoreError::Conflict);
        }
        documents.insert(seq, document.clone());
        debug!(collection, id = %document.id, "document added");
        Ok(document)
    }

    fn set_document(
        &self,
        collection: &str,
        id: &str,
        mut fields: Fields,
    ) -> Result<StoredDocument, StoreError> {
        let seq = sequence_of(id).ok_or(StoreError::NotFound)?;
        let mut guard = self.lock()?;
        let existing = guard
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(&seq))
            .filter(|document| document.id == id)
            .ok_or(StoreError::NotFound)?;

        let now = Utc::now();
        stamp(&mut fields, existing.created_at, now);
        existing.updated_at = now;
        existing.fields = fields;
        debug!(collection, id, "document replaced");
        Ok(existing.clone())
    }

    fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let Some(seq) = sequence_of(id) else {
            return Ok(None);
        };
        let guard = self.lock()?;
        Ok(guard
            .get(collection)
            .and_then(|documents| documents.get(&seq))
            .filter(|document| document.id == id)
            .cloned())
    }

    fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .get(collection)
            .map(|documents| {
                documents
                    .values()
                    .filter(|document| document.fields.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let seq = sequence_of(id).ok_or(StoreError::NotFound)?;
        let mut guard = self.lock()?;
        let documents = guard.get_mut(collection).ok_or(StoreError::NotFound)?;
        match documents.get(&seq) {
            Some(document) if document.id == id => {
                documents.remove(&seq);
                debug!(collection, id, "document deleted");
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }
}
