use super::common::*;
use crate::listings::router::{categories_handler, submit_handler, ListingSubmission};
use crate::listings::ListingService;
use crate::store::MemoryDocumentStore;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn submission() -> ListingSubmission {
    ListingSubmission {
        seller: seller(),
        listing: car_rent_draft(),
    }
}

#[tokio::test]
async fn submit_route_creates_listing() {
    let store = Arc::new(MemoryDocumentStore::new());
    let router = router_with_store(store);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/listings")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&submission()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert!(payload.get("id").is_some());
    assert_eq!(payload.get("type"), Some(&json!("RENT")));
    assert!(payload.get("carDetails").is_some());
    assert!(payload.get("houseDetails").is_none());
}

#[tokio::test]
async fn submit_handler_returns_unprocessable_with_alert_title() {
    let service = Arc::new(ListingService::new(Arc::new(MemoryDocumentStore::new())));
    let mut submission = submission();
    submission.listing.location = None;

    let response =
        submit_handler::<MemoryDocumentStore>(State(service), axum::Json(submission)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("title"), Some(&json!("Missing information")));
}

#[tokio::test]
async fn submit_handler_returns_conflict_from_store() {
    let service = Arc::new(ListingService::new(Arc::new(ConflictStore)));
    let response = submit_handler::<ConflictStore>(State(service), axum::Json(submission())).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_outage() {
    let service = Arc::new(ListingService::new(Arc::new(UnavailableStore)));
    let response =
        submit_handler::<UnavailableStore>(State(service), axum::Json(submission())).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn fetch_route_returns_not_found_for_unknown_listing() {
    let router = router_with_store(Arc::new(MemoryDocumentStore::new()));
    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/listings/lis-000404")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn categories_handler_lists_options_per_property_type() {
    let response = categories_handler(Path("car".to_string())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let categories = payload
        .get("categories")
        .and_then(serde_json::Value::as_array)
        .expect("categories array");
    assert!(categories.contains(&json!("SUV")));

    let response = categories_handler(Path("boat".to_string())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["title"], json!("Unknown property type"));
    assert!(payload["error"].as_str().expect("message").contains("boat"));
}
