use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::listings::domain::{ListingType, PropertyType, Seller};
use crate::listings::form::ListingDraft;
use crate::listings::guard::ListingGuard;
use crate::listings::{listing_router, ListingService};
use crate::location::LocationData;
use crate::store::{DocumentStore, Fields, MemoryDocumentStore, StoreError, StoredDocument};

pub(super) fn seller() -> Seller {
    Seller {
        id: "user-42".to_string(),
        name: "Layla Haddad".to_string(),
    }
}

pub(super) fn location() -> LocationData {
    LocationData {
        latitude: 25.2048,
        longitude: 55.2708,
        address: Some("Sheikh Zayed Road, Dubai, United Arab Emirates".to_string()),
        city: Some("Dubai".to_string()),
        country: Some("United Arab Emirates".to_string()),
    }
}

/// Rent listing for a car with only the required fields filled in.
pub(super) fn car_rent_draft() -> ListingDraft {
    let mut draft = ListingDraft::new(ListingType::Rent);
    draft.title = "Toyota Corolla 2021".to_string();
    draft.description = "Clean, low mileage, great for city trips.".to_string();
    draft.price = "150".to_string();
    draft.select_property_type(PropertyType::Car);
    draft.category = "Sedan".to_string();
    draft.add_image("file:///photos/corolla-front.jpg");
    draft.set_location(Some(location()));
    draft.car.make = "Toyota".to_string();
    draft.car.model = "Corolla".to_string();
    draft
}

pub(super) fn house_swap_draft() -> ListingDraft {
    let mut draft = ListingDraft::new(ListingType::Swap);
    draft.title = "Two bedroom apartment in Marina".to_string();
    draft.description = "Sea view, looking to swap for a villa for the summer.".to_string();
    draft.price = "2,500".to_string();
    draft.select_property_type(PropertyType::House);
    draft.category = "Apartment".to_string();
    draft.add_image("file:///photos/marina-1.jpg");
    draft.add_image("file:///photos/marina-2.jpg");
    draft.set_location(Some(location()));
    draft.house.bedrooms = "2".to_string();
    draft.house.bathrooms = "2".to_string();
    draft.house.area = "110.5".to_string();
    draft.house.furnished = true;
    draft.house.amenities = vec!["Pool".to_string(), " ".to_string(), "Gym".to_string()];
    draft.swap.swap_preferences = "Villa in Jumeirah".to_string();
    draft.swap.swap_value = "3000".to_string();
    // Leftover input from a type switch must not leak into the record.
    draft.car.make = "Nissan".to_string();
    draft.rent.rental_period = "weekly".to_string();
    draft
}

pub(super) fn guard() -> ListingGuard {
    ListingGuard
}

pub(super) fn build_service() -> (ListingService<MemoryDocumentStore>, Arc<MemoryDocumentStore>) {
    let store = Arc::new(MemoryDocumentStore::new());
    (ListingService::new(store.clone()), store)
}

pub(super) fn router_with_store(store: Arc<MemoryDocumentStore>) -> axum::Router {
    listing_router(Arc::new(ListingService::new(store)))
}

pub(super) struct ConflictStore;

impl DocumentStore for ConflictStore {
    fn add_document(&self, _collection: &str, _fields: Fields) -> Result<StoredDocument, StoreError> {
        Err(StoreError::Conflict)
    }

    fn set_document(
        &self,
        _collection: &str,
        _id: &str,
        _fields: Fields,
    ) -> Result<StoredDocument, StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }

    fn get_document(
        &self,
        _collection: &str,
        _id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        Ok(None)
    }

    fn query(
        &self,
        _collection: &str,
        _field: &str,
        _value: &Value,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(Vec::new())
    }

    fn delete_document(&self, _collection: &str, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl DocumentStore for UnavailableStore {
    fn add_document(&self, _collection: &str, _fields: Fields) -> Result<StoredDocument, StoreError> {
        Err(StoreError::Unavailable("network offline".to_string()))
    }

    fn set_document(
        &self,
        _collection: &str,
        _id: &str,
        _fields: Fields,
    ) -> Result<StoredDocument, StoreError> {
        Err(StoreError::Unavailable("network offline".to_string()))
    }

    fn get_document(
        &self,
        _collection: &str,
        _id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        Err(StoreError::Unavailable("network offline".to_string()))
    }

    fn query(
        &self,
        _collection: &str,
        _field: &str,
        _value: &Value,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        Err(StoreError::Unavailable("network offline".to_string()))
    }

    fn delete_document(&self, _collection: &str, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("network offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
