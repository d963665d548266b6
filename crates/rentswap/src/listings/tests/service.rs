use super::common::*;
use crate::listings::domain::{ListingId, ListingStatus, ListingType, PropertyType};
use crate::listings::guard::ListingValidationError;
use crate::listings::{ListingService, ListingServiceError};
use crate::store::{DocumentStore, StoreError, LISTINGS_COLLECTION};
use serde_json::json;
use std::sync::Arc;

#[test]
fn rent_car_submission_persists_expected_document() {
    let (service, store) = build_service();

    let record = service
        .submit(car_rent_draft(), &seller())
        .expect("submission succeeds");

    let stored = store
        .get_document(LISTINGS_COLLECTION, &record.id.0)
        .expect("store reachable")
        .expect("document persisted");
    let fields = &stored.fields;

    assert_eq!(fields.get("type"), Some(&json!("RENT")));
    assert_eq!(fields.get("propertyType"), Some(&json!("CAR")));
    assert_eq!(fields.get("rentalPeriod"), Some(&json!("daily")));
    assert_eq!(fields.get("minimumRentalPeriod"), Some(&json!(1)));
    assert_eq!(fields.get("price"), Some(&json!(150.0)));
    assert!(fields.contains_key("carDetails"));
    assert!(!fields.contains_key("houseDetails"));
    assert!(!fields.contains_key("swapPreferences"));
    assert!(!fields.contains_key("securityDeposit"));
    assert!(fields.contains_key("createdAt"));
    assert!(fields.contains_key("updatedAt"));
    assert_eq!(fields.get("status"), Some(&json!("active")));
}

#[test]
fn house_submission_never_carries_car_details() {
    let (service, store) = build_service();

    let record = service
        .submit(house_swap_draft(), &seller())
        .expect("submission succeeds");

    let stored = store
        .get_document(LISTINGS_COLLECTION, &record.id.0)
        .expect("store reachable")
        .expect("document persisted");

    assert!(stored.fields.contains_key("houseDetails"));
    assert!(!stored.fields.contains_key("carDetails"));
    assert_eq!(stored.fields.get("type"), Some(&json!("SWAP")));
    assert!(!stored.fields.contains_key("rentalPeriod"));
    assert!(!stored.fields.contains_key("minimumRentalPeriod"));
    assert_eq!(stored.fields.get("swapValue"), Some(&json!(3000.0)));
}

#[test]
fn invalid_submission_performs_no_write() {
    let (service, store) = build_service();
    let mut draft = car_rent_draft();
    draft.images.clear();

    match service.submit(draft, &seller()) {
        Err(ListingServiceError::Validation(ListingValidationError::MissingImages)) => {}
        other => panic!("expected missing images, got {other:?}"),
    }
    assert!(store.is_empty(LISTINGS_COLLECTION).expect("len"));
}

#[test]
fn store_failures_propagate() {
    let service = ListingService::new(Arc::new(UnavailableStore));
    match service.submit(car_rent_draft(), &seller()) {
        Err(ListingServiceError::Store(StoreError::Unavailable(_))) => {}
        other => panic!("expected store outage, got {other:?}"),
    }
}

#[test]
fn stored_listing_reads_back_with_timestamps() {
    let (service, _store) = build_service();
    let created = service
        .submit(house_swap_draft(), &seller())
        .expect("submission succeeds");

    let fetched = service.get(&created.id).expect("listing found");
    assert_eq!(fetched.listing, created.listing);
    assert_eq!(fetched.created_at, created.created_at);
    assert_eq!(fetched.listing.listing_type(), ListingType::Swap);
    assert_eq!(fetched.listing.property_type, PropertyType::House);

    match service.get(&ListingId("lis-999999".to_string())) {
        Err(ListingServiceError::Store(StoreError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn lists_only_the_sellers_listings() {
    let (service, _store) = build_service();
    service
        .submit(car_rent_draft(), &seller())
        .expect("submission succeeds");
    service
        .submit(house_swap_draft(), &seller())
        .expect("submission succeeds");

    let mut other = seller();
    other.id = "user-7".to_string();
    service
        .submit(car_rent_draft(), &other)
        .expect("submission succeeds");

    let mine = service.list_by_seller("user-42").expect("query succeeds");
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|record| record.listing.seller_id == "user-42"));
}

#[test]
fn listings_are_published_active_and_no_other_status_is_accepted() {
    let (service, _store) = build_service();
    let record = service
        .submit(car_rent_draft(), &seller())
        .expect("submission succeeds");

    assert_eq!(record.listing.status, ListingStatus::Active);
    assert_eq!(ListingStatus::default(), ListingStatus::Active);
    assert!(serde_json::from_value::<ListingStatus>(json!("paused")).is_err());
}
