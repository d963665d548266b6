//! Device location lookup, reverse geocoding, and great-circle distance.

mod geo;
mod geocoder;
mod provider;
mod service;

pub use geo::{haversine_km, Coordinates, LocationData, EARTH_RADIUS_KM};
pub use geocoder::{GeocodedPlace, NominatimGeocoder, NullGeocoder, ReverseGeocoder};
pub use provider::{
    DeniedLocationProvider, FixedLocationProvider, LocationProvider, PermissionStatus,
};
pub use service::LocationService;

/// Failure raised by location providers and geocoders.
///
/// `LocationService` never propagates these to its callers; they are logged and the
/// lookup degrades to an empty result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location services unavailable: {0}")]
    Unavailable(String),
    #[error("coordinates out of range ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
    #[error("reverse geocoding failed: {0}")]
    Geocoding(String),
}
