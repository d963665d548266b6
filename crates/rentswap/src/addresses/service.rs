use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::book::AddressBook;
use super::domain::{Address, AddressDraft, AddressError, AddressId};
use crate::location::Coordinates;
use crate::store::{self, DocumentStore, StoreError, StoredDocument, ADDRESSES_COLLECTION};

const USER_ID_FIELD: &str = "userId";

/// Persisted shape of an address; the document id is the address id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressDocument {
    user_id: String,
    label: String,
    full_address: String,
    city: String,
    phone: String,
    is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coordinates: Option<Coordinates>,
}

impl From<&Address> for AddressDocument {
    fn from(address: &Address) -> Self {
        Self {
            user_id: address.user_id.clone(),
            label: address.label.clone(),
            full_address: address.full_address.clone(),
            city: address.city.clone(),
            phone: address.phone.clone(),
            is_default: address.is_default,
            coordinates: address.coordinates,
        }
    }
}

impl AddressDocument {
    fn into_address(self, id: String) -> Address {
        Address {
            id: AddressId(id),
            user_id: self.user_id,
            label: self.label,
            full_address: self.full_address,
            city: self.city,
            phone: self.phone,
            is_default: self.is_default,
            coordinates: self.coordinates,
        }
    }
}

/// Address book persistence. Each operation loads the user's book, applies the change
/// in memory, then writes back only the documents whose fields differ. Mutations hold
/// `writes` from load to write-back so concurrent requests cannot both claim the default.
pub struct AddressService<S> {
    store: Arc<S>,
    writes: Mutex<()>,
}

impl<S> AddressService<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            writes: Mutex::new(()),
        }
    }

    pub fn book(&self, user_id: &str) -> Result<AddressBook, AddressServiceError> {
        let (_, book) = self.load(user_id)?;
        Ok(book)
    }

    pub fn list(&self, user_id: &str) -> Result<Vec<Address>, AddressServiceError> {
        Ok(self.book(user_id)?.entries().to_vec())
    }

    pub fn add(&self, user_id: &str, draft: AddressDraft) -> Result<Address, AddressServiceError> {
        let fields = draft.validate()?;
        let _writes = self.lock_writes();
        let (stored, mut book) = self.load(user_id)?;

        let mut document = AddressDocument::from(&Address::from_fields(
            AddressId(String::new()),
            user_id,
            fields.clone(),
        ));
        document.is_default = book.would_default(&fields);
        let created = self
            .store
            .add_document(ADDRESSES_COLLECTION, store::to_fields(&document)?)?;

        let id = AddressId(created.id);
        let address = book.insert(id.clone(), fields).clone();
        if let Err(err) = self.write_changes(&stored, book.entries()) {
            if let Err(cleanup) = self.store.delete_document(ADDRESSES_COLLECTION, &id.0) {
                warn!(address_id = %id, error = %cleanup, "failed to discard new address");
            }
            return Err(err);
        }

        info!(user_id, address_id = %id, is_default = address.is_default, "address added");
        Ok(address)
    }

    pub fn update(
        &self,
        user_id: &str,
        id: &AddressId,
        draft: AddressDraft,
    ) -> Result<Address, AddressServiceError> {
        let fields = draft.validate()?;
        let _writes = self.lock_writes();
        let (stored, mut book) = self.load(user_id)?;
        let address = book.update(id, fields)?.clone();
        self.write_changes(&stored, book.entries())?;
        Ok(address)
    }

    pub fn set_default(&self, user_id: &str, id: &AddressId) -> Result<Address, AddressServiceError> {
        let _writes = self.lock_writes();
        let (stored, mut book) = self.load(user_id)?;
        book.set_default(id)?;
        self.write_changes(&stored, book.entries())?;

        info!(user_id, address_id = %id, "default address changed");
        book.get(id)
            .cloned()
            .ok_or_else(|| AddressError::UnknownAddress(id.clone()).into())
    }

    /// Delete an address. A promotion caused by removing the default is written first,
    /// then the document is deleted; a failed delete restores the promoted entry.
    pub fn remove(&self, user_id: &str, id: &AddressId) -> Result<Address, AddressServiceError> {
        let _writes = self.lock_writes();
        let (stored, mut book) = self.load(user_id)?;
        let removed = book.remove(id)?;
        let written = self.write_changes(&stored, book.entries())?;

        if let Err(err) = self.store.delete_document(ADDRESSES_COLLECTION, &id.0) {
            self.restore(&written);
            return Err(err.into());
        }

        info!(
            user_id,
            address_id = %id,
            promoted = ?book.default_address().map(|address| &address.id),
            "address removed"
        );
        Ok(removed)
    }

    // The guarded data is `()`, so a poisoned lock carries no broken state.
    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self, user_id: &str) -> Result<(Vec<Address>, AddressBook), AddressServiceError> {
        let stored = self
            .store
            .query(
                ADDRESSES_COLLECTION,
                USER_ID_FIELD,
                &Value::String(user_id.to_string()),
            )?
            .into_iter()
            .map(address_from_document)
            .collect::<Result<Vec<_>, _>>()?;
        let book = AddressBook::from_entries(user_id, stored.clone());
        Ok((stored, book))
    }

    /// Writes every entry that differs from its stored version and returns the stored
    /// versions that were overwritten. A failed write rolls back the earlier ones.
    fn write_changes(
        &self,
        before: &[Address],
        after: &[Address],
    ) -> Result<Vec<Address>, AddressServiceError> {
        let mut written = Vec::new();
        for address in after {
            let Some(original) = before.iter().find(|stored| stored.id == address.id) else {
                continue;
            };
            if original == address {
                continue;
            }

            let outcome = store::to_fields(&AddressDocument::from(address)).and_then(|fields| {
                self.store
                    .set_document(ADDRESSES_COLLECTION, &address.id.0, fields)
            });
            match outcome {
                Ok(_) => {
                    debug!(address_id = %address.id, is_default = address.is_default, "address written");
                    written.push(original.clone());
                }
                Err(err) => {
                    warn!(address_id = %address.id, error = %err, "address write failed; rolling back");
                    self.restore(&written);
                    return Err(err.into());
                }
            }
        }
        Ok(written)
    }

    fn restore(&self, originals: &[Address]) {
        for original in originals {
            let outcome = store::to_fields(&AddressDocument::from(original)).and_then(|fields| {
                self.store
                    .set_document(ADDRESSES_COLLECTION, &original.id.0, fields)
            });
            if let Err(err) = outcome {
                warn!(address_id = %original.id, error = %err, "failed to restore address");
            }
        }
    }
}

fn address_from_document(stored: StoredDocument) -> Result<Address, StoreError> {
    let fields = store::user_fields(&stored.fields);
    let document: AddressDocument = serde_json::from_value(Value::Object(fields))?;
    Ok(document.into_address(stored.id))
}

/// Error raised by the address service.
#[derive(Debug, thiserror::Error)]
pub enum AddressServiceError {
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
