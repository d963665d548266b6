use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{categories_for, ListingId, PropertyType, Seller};
use super::form::ListingDraft;
use super::service::{ListingService, ListingServiceError};
use crate::alerts::UserAlert;
use crate::store::{DocumentStore, StoreError};

/// Request body for publishing a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSubmission {
    pub seller: Seller,
    pub listing: ListingDraft,
}

/// Router builder exposing listing creation and lookup endpoints.
pub fn listing_router<S>(service: Arc<ListingService<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/api/v1/listings", post(submit_handler::<S>))
        .route("/api/v1/listings/:listing_id", get(fetch_handler::<S>))
        .route(
            "/api/v1/listings/categories/:property_type",
            get(categories_handler),
        )
        .route(
            "/api/v1/sellers/:seller_id/listings",
            get(seller_listings_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    axum::Json(submission): axum::Json<ListingSubmission>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let ListingSubmission { seller, listing } = submission;
    match service.submit(listing, &seller) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn fetch_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.get(&ListingId(listing_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn seller_listings_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(seller_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.list_by_seller(&seller_id) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn categories_handler(Path(property_type): Path<String>) -> Response {
    match PropertyType::parse(&property_type) {
        Some(property_type) => {
            let payload = json!({
                "property_type": property_type,
                "categories": categories_for(property_type),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        None => {
            let alert = UserAlert::new(
                "Unknown property type",
                format!("'{property_type}' is not HOUSE or CAR"),
            );
            (StatusCode::NOT_FOUND, axum::Json(alert.error_body())).into_response()
        }
    }
}

fn error_response(err: &ListingServiceError) -> Response {
    let status = match err {
        ListingServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ListingServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        ListingServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        ListingServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let alert = UserAlert::from(err);
    (status, axum::Json(alert.error_body())).into_response()
}
