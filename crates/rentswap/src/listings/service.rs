use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::domain::{Listing, ListingId, ListingRecord, Seller};
use super::form::ListingDraft;
use super::guard::{ListingGuard, ListingValidationError};
use crate::store::{self, DocumentStore, StoreError, StoredDocument, LISTINGS_COLLECTION};

/// Service composing the listing guard with the document store.
pub struct ListingService<S> {
    guard: ListingGuard,
    store: Arc<S>,
}

impl<S> ListingService<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            guard: ListingGuard,
            store,
        }
    }

    /// Validate a draft and publish it with a single document write.
    pub fn submit(
        &self,
        draft: ListingDraft,
        seller: &Seller,
    ) -> Result<ListingRecord, ListingServiceError> {
        let listing = self.guard.listing_from_draft(draft, seller)?;
        let fields = store::to_fields(&listing)?;
        let stored = self.store.add_document(LISTINGS_COLLECTION, fields)?;

        info!(
            listing_id = %stored.id,
            seller_id = %seller.id,
            listing_type = ?listing.listing_type(),
            property_type = ?listing.property_type,
            "listing published"
        );

        Ok(ListingRecord {
            id: ListingId(stored.id),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            listing,
        })
    }

    pub fn get(&self, id: &ListingId) -> Result<ListingRecord, ListingServiceError> {
        let stored = self
            .store
            .get_document(LISTINGS_COLLECTION, &id.0)?
            .ok_or(StoreError::NotFound)?;
        record_from_document(stored)
    }

    pub fn list_by_seller(&self, seller_id: &str) -> Result<Vec<ListingRecord>, ListingServiceError> {
        self.store
            .query(
                LISTINGS_COLLECTION,
                "sellerId",
                &Value::String(seller_id.to_string()),
            )?
            .into_iter()
            .map(record_from_document)
            .collect()
    }
}

fn record_from_document(stored: StoredDocument) -> Result<ListingRecord, ListingServiceError> {
    let fields = store::user_fields(&stored.fields);
    let listing: Listing =
        serde_json::from_value(Value::Object(fields)).map_err(StoreError::from)?;
    Ok(ListingRecord {
        id: ListingId(stored.id),
        created_at: stored.created_at,
        updated_at: stored.updated_at,
        listing,
    })
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Validation(#[from] ListingValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
