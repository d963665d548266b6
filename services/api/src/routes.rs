use crate::infra::{AppState, Services};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use rentswap::addresses::address_router;
use rentswap::alerts::UserAlert;
use rentswap::error::AppError;
use rentswap::help::help_router;
use rentswap::listings::listing_router;
use rentswap::location::{haversine_km, Coordinates, LocationData, LocationError, LocationService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct DistanceRequest {
    /// Origin; the last known device position when omitted.
    #[serde(default)]
    pub(crate) from: Option<Coordinates>,
    pub(crate) to: Coordinates,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DistanceResponse {
    pub(crate) from: Coordinates,
    pub(crate) to: Coordinates,
    pub(crate) distance_km: f64,
}

pub(crate) fn with_service_routes(services: &Services) -> axum::Router {
    let location_routes = axum::Router::new()
        .route(
            "/api/v1/location/current",
            axum::routing::get(current_location_endpoint),
        )
        .route(
            "/api/v1/location/resolve",
            axum::routing::post(resolve_location_endpoint),
        )
        .route(
            "/api/v1/location/distance",
            axum::routing::post(distance_endpoint),
        )
        .with_state(services.location.clone());

    listing_router(services.listings.clone())
        .merge(address_router(services.addresses.clone()))
        .merge(help_router(services.help.clone()))
        .merge(location_routes)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn current_location_endpoint(
    State(location): State<Arc<LocationService>>,
) -> impl IntoResponse {
    match location.current_location().await {
        Some(data) => (StatusCode::OK, Json(json!(data))),
        None => {
            let alert = UserAlert::from(&LocationError::PermissionDenied);
            (StatusCode::SERVICE_UNAVAILABLE, Json(alert.error_body()))
        }
    }
}

pub(crate) async fn resolve_location_endpoint(
    State(location): State<Arc<LocationService>>,
    Json(coordinates): Json<Coordinates>,
) -> Result<Json<LocationData>, AppError> {
    Ok(Json(location.resolve(coordinates).await?))
}

pub(crate) async fn distance_endpoint(
    State(location): State<Arc<LocationService>>,
    Json(request): Json<DistanceRequest>,
) -> Result<Json<DistanceResponse>, AppError> {
    request.to.validate()?;
    let from = match request.from {
        Some(from) => {
            from.validate()?;
            from
        }
        None => location
            .last_known()
            .map(|data| data.coordinates())
            .ok_or_else(|| LocationError::Unavailable("no known device position".to_string()))?,
    };

    Ok(Json(DistanceResponse {
        from,
        to: request.to,
        distance_km: haversine_km(from, request.to),
    }))
}
