use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};

use super::domain::{AddressDraft, AddressError, AddressId};
use super::service::{AddressService, AddressServiceError};
use crate::alerts::UserAlert;
use crate::store::{DocumentStore, StoreError};

/// Router builder exposing a user's address book.
pub fn address_router<S>(service: Arc<AddressService<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/users/:user_id/addresses",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/api/v1/users/:user_id/addresses/:address_id",
            put(update_handler::<S>).delete(delete_handler::<S>),
        )
        .route(
            "/api/v1/users/:user_id/addresses/:address_id/default",
            post(default_handler::<S>),
        )
        .with_state(service)
}

async fn list_handler<S>(
    State(service): State<Arc<AddressService<S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.list(&user_id) {
        Ok(addresses) => (StatusCode::OK, axum::Json(addresses)).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn create_handler<S>(
    State(service): State<Arc<AddressService<S>>>,
    Path(user_id): Path<String>,
    axum::Json(draft): axum::Json<AddressDraft>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.add(&user_id, draft) {
        Ok(address) => (StatusCode::CREATED, axum::Json(address)).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn update_handler<S>(
    State(service): State<Arc<AddressService<S>>>,
    Path((user_id, address_id)): Path<(String, String)>,
    axum::Json(draft): axum::Json<AddressDraft>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.update(&user_id, &AddressId(address_id), draft) {
        Ok(address) => (StatusCode::OK, axum::Json(address)).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn delete_handler<S>(
    State(service): State<Arc<AddressService<S>>>,
    Path((user_id, address_id)): Path<(String, String)>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.remove(&user_id, &AddressId(address_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(&err),
    }
}

async fn default_handler<S>(
    State(service): State<Arc<AddressService<S>>>,
    Path((user_id, address_id)): Path<(String, String)>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.set_default(&user_id, &AddressId(address_id)) {
        Ok(address) => (StatusCode::OK, axum::Json(address)).into_response(),
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &AddressServiceError) -> Response {
    let status = match err {
        AddressServiceError::Address(AddressError::UnknownAddress(_)) => StatusCode::NOT_FOUND,
        AddressServiceError::Address(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AddressServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        AddressServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        AddressServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let alert = UserAlert::from(err);
    (status, axum::Json(alert.error_body())).into_response()
}
