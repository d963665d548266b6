//! Document store abstraction shaped after a cloud document database.
//!
//! Collections hold JSON field maps keyed by a server-assigned identifier. Every write
//! stamps `createdAt`/`updatedAt` on the server side so callers never supply them.

mod memory;

pub use memory::MemoryDocumentStore;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

pub const LISTINGS_COLLECTION: &str = "listings";
pub const ADDRESSES_COLLECTION: &str = "addresses";

pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Field map stored for a single document.
pub type Fields = Map<String, Value>;

/// Document as returned by the store, including server-managed metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub fields: Fields,
}

/// Storage abstraction so services can be exercised without a remote backend.
pub trait DocumentStore: Send + Sync {
    fn add_document(&self, collection: &str, fields: Fields)
        -> Result<StoredDocument, StoreError>;
    fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<StoredDocument, StoreError>;
    fn get_document(&self, collection: &str, id: &str)
        -> Result<Option<StoredDocument>, StoreError>;
    fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>, StoreError>;
    fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document already exists")]
    Conflict,
    #[error("document not found")]
    NotFound,
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Encode a serializable record into a document field map.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Serialization(serde::ser::Error::custom(format!(
            "expected an object, found {other}"
        )))),
    }
}

/// Strip server-managed metadata before decoding fields into a domain record.
pub fn user_fields(fields: &Fields) -> Fields {
    fields
        .iter()
        .filter(|(key, _)| key.as_str() != CREATED_AT_FIELD && key.as_str() != UPDATED_AT_FIELD)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn to_fields_rejects_non_objects() {
        let result = to_fields(&vec![1, 2, 3]);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn user_fields_drops_timestamps() {
        let mut fields = Fields::new();
        fields.insert("title".to_string(), json!("Loft"));
        fields.insert(CREATED_AT_FIELD.to_string(), json!("2025-01-01T00:00:00Z"));
        fields.insert(UPDATED_AT_FIELD.to_string(), json!("2025-01-01T00:00:00Z"));

        let cleaned = user_fields(&fields);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.get("title"), Some(&json!("Loft")));
    }
}
