use crate::addresses::AddressServiceError;
use crate::alerts::UserAlert;
use crate::config::ConfigError;
use crate::help::HelpError;
use crate::listings::ListingServiceError;
use crate::location::LocationError;
use crate::store::StoreError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Store(StoreError),
    Listing(ListingServiceError),
    Address(AddressServiceError),
    Location(LocationError),
    Help(HelpError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Store(err) => write!(f, "store error: {}", err),
            AppError::Listing(err) => write!(f, "listing error: {}", err),
            AppError::Address(err) => write!(f, "address error: {}", err),
            AppError::Location(err) => write!(f, "location error: {}", err),
            AppError::Help(err) => write!(f, "help center error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Listing(err) => Some(err),
            AppError::Address(err) => Some(err),
            AppError::Location(err) => Some(err),
            AppError::Help(err) => Some(err),
        }
    }
}

impl AppError {
    /// User-facing alert for errors that originate in a domain operation.
    pub fn alert(&self) -> Option<UserAlert> {
        match self {
            AppError::Store(err) => Some(UserAlert::from(err)),
            AppError::Listing(err) => Some(UserAlert::from(err)),
            AppError::Address(err) => Some(UserAlert::from(err)),
            AppError::Location(err) => Some(UserAlert::from(err)),
            AppError::Help(err) => Some(UserAlert::from(err)),
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Server(_) => {
                None
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Listing(ListingServiceError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Address(AddressServiceError::Address(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Location(LocationError::InvalidCoordinates { .. }) => StatusCode::BAD_REQUEST,
            AppError::Location(LocationError::PermissionDenied)
            | AppError::Location(LocationError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Location(LocationError::Geocoding(_)) => StatusCode::BAD_GATEWAY,
            AppError::Help(HelpError::UnknownChannel(_)) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self.alert() {
            Some(alert) => alert.error_body(),
            None => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ListingServiceError> for AppError {
    fn from(value: ListingServiceError) -> Self {
        Self::Listing(value)
    }
}

impl From<AddressServiceError> for AppError {
    fn from(value: AddressServiceError) -> Self {
        Self::Address(value)
    }
}

impl From<LocationError> for AppError {
    fn from(value: LocationError) -> Self {
        Self::Location(value)
    }
}

impl From<HelpError> for AppError {
    fn from(value: HelpError) -> Self {
        Self::Help(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::ListingValidationError;

    #[test]
    fn validation_errors_map_to_unprocessable() {
        let err = AppError::from(ListingServiceError::Validation(
            ListingValidationError::MissingLocation,
        ));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn invalid_coordinates_map_to_bad_request() {
        let err = AppError::from(LocationError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 0.0,
        });
        assert!(err.alert().is_some());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_errors_have_no_alert() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(err.alert().is_none());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
