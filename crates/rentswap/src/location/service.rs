use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use super::{
    haversine_km, Coordinates, LocationData, LocationError, LocationProvider, PermissionStatus,
    ReverseGeocoder,
};

/// Wraps the device provider and geocoder behind a lookup that never fails loudly.
///
/// The most recent successful lookup is cached and overwritten on every success.
pub struct LocationService {
    provider: Arc<dyn LocationProvider>,
    geocoder: Arc<dyn ReverseGeocoder>,
    last_known: Mutex<Option<LocationData>>,
}

impl LocationService {
    pub fn new(provider: Arc<dyn LocationProvider>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self {
            provider,
            geocoder,
            last_known: Mutex::new(None),
        }
    }

    /// Look up the device position, reverse geocoding it once.
    ///
    /// Returns `None` when permission is refused or the provider rejects.
    pub async fn current_location(&self) -> Option<LocationData> {
        if !self.ensure_permission().await {
            return None;
        }

        let coordinates = match self.provider.current_position().await {
            Ok(coordinates) => coordinates,
            Err(err) => {
                warn!(error = %err, "device position unavailable");
                return None;
            }
        };

        let location = self.enrich(coordinates).await;
        self.remember(&location);
        Some(location)
    }

    /// Enrich caller-supplied coordinates, e.g. a position reported by a mobile client.
    pub async fn resolve(&self, coordinates: Coordinates) -> Result<LocationData, LocationError> {
        coordinates.validate()?;
        let location = self.enrich(coordinates).await;
        self.remember(&location);
        Ok(location)
    }

    pub fn last_known(&self) -> Option<LocationData> {
        match self.last_known.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Kilometres from the last known position, if one exists.
    pub fn distance_from_last_known(&self, target: Coordinates) -> Option<f64> {
        self.last_known()
            .map(|location| haversine_km(location.coordinates(), target))
    }

    async fn ensure_permission(&self) -> bool {
        let status = match self.provider.permission_status().await {
            PermissionStatus::Undetermined => self.provider.request_permission().await,
            status => status,
        };

        if status == PermissionStatus::Granted {
            true
        } else {
            warn!(?status, "location permission not granted");
            false
        }
    }

    async fn enrich(&self, coordinates: Coordinates) -> LocationData {
        let mut location = LocationData::from_coordinates(coordinates);
        match self.geocoder.reverse_geocode(coordinates).await {
            Ok(Some(place)) => {
                location.address = place.formatted_address();
                location.city = place.city;
                location.country = place.country;
            }
            Ok(None) => debug!("no place found for coordinates"),
            Err(err) => warn!(error = %err, "reverse geocoding failed, keeping raw coordinates"),
        }
        location
    }

    fn remember(&self, location: &LocationData) {
        let mut guard = match self.last_known.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(location.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{DeniedLocationProvider, FixedLocationProvider, GeocodedPlace};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticGeocoder(GeocodedPlace);

    #[async_trait]
    impl ReverseGeocoder for StaticGeocoder {
        async fn reverse_geocode(
            &self,
            _coordinates: Coordinates,
        ) -> Result<Option<GeocodedPlace>, LocationError> {
            Ok(Some(self.0.clone()))
        }
    }

    struct FailingGeocoder;

    #[async_trait]
    impl ReverseGeocoder for FailingGeocoder {
        async fn reverse_geocode(
            &self,
            _coordinates: Coordinates,
        ) -> Result<Option<GeocodedPlace>, LocationError> {
            Err(LocationError::Geocoding("network down".to_string()))
        }
    }

    /// Starts undetermined and records how often the prompt is shown.
    struct PromptingProvider {
        grant: bool,
        prompts: AtomicUsize,
        position: Coordinates,
    }

    #[async_trait]
    impl LocationProvider for PromptingProvider {
        async fn permission_status(&self) -> PermissionStatus {
            PermissionStatus::Undetermined
        }

        async fn request_permission(&self) -> PermissionStatus {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            if self.grant {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            }
        }

        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            Ok(self.position)
        }
    }

    fn dubai() -> Coordinates {
        Coordinates::new(25.2048, 55.2708).expect("valid")
    }

    fn dubai_place() -> GeocodedPlace {
        GeocodedPlace {
            street: Some("Sheikh Zayed Road".to_string()),
            city: Some("Dubai".to_string()),
            country: Some("United Arab Emirates".to_string()),
            ..GeocodedPlace::default()
        }
    }

    #[tokio::test]
    async fn denied_stub_degrades_to_empty_result() {
        let service = LocationService::new(
            Arc::new(DeniedLocationProvider),
            Arc::new(StaticGeocoder(dubai_place())),
        );

        assert!(service.current_location().await.is_none());
        assert!(service.last_known().is_none());
    }

    #[tokio::test]
    async fn successful_lookup_is_enriched_and_cached() {
        let service = LocationService::new(
            Arc::new(FixedLocationProvider::new(dubai())),
            Arc::new(StaticGeocoder(dubai_place())),
        );

        let location = service.current_location().await.expect("location found");
        assert_eq!(location.city.as_deref(), Some("Dubai"));
        assert_eq!(
            location.address.as_deref(),
            Some("Sheikh Zayed Road, Dubai, United Arab Emirates")
        );
        assert_eq!(service.last_known(), Some(location));
    }

    #[tokio::test]
    async fn geocoding_failure_keeps_coordinates() {
        let service = LocationService::new(
            Arc::new(FixedLocationProvider::new(dubai())),
            Arc::new(FailingGeocoder),
        );

        let location = service.current_location().await.expect("location found");
        assert_eq!(location.coordinates(), dubai());
        assert!(location.address.is_none());
        assert!(location.city.is_none());
    }

    #[tokio::test]
    async fn undetermined_permission_prompts_once() {
        let provider = Arc::new(PromptingProvider {
            grant: false,
            prompts: AtomicUsize::new(0),
            position: dubai(),
        });
        let service = LocationService::new(provider.clone(), Arc::new(FailingGeocoder));

        assert!(service.current_location().await.is_none());
        assert_eq!(provider.prompts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn each_success_overwrites_the_cache() {
        let service = LocationService::new(
            Arc::new(DeniedLocationProvider),
            Arc::new(FailingGeocoder),
        );
        let abu_dhabi = Coordinates::new(24.4539, 54.3773).expect("valid");

        service.resolve(dubai()).await.expect("resolves");
        service.resolve(abu_dhabi).await.expect("resolves");

        let cached = service.last_known().expect("cached");
        assert_eq!(cached.coordinates(), abu_dhabi);
        let distance = service
            .distance_from_last_known(dubai())
            .expect("distance available");
        assert!(distance > 100.0 && distance < 140.0, "got {distance}");
    }

    #[tokio::test]
    async fn resolve_rejects_invalid_coordinates() {
        let service = LocationService::new(Arc::new(DeniedLocationProvider), Arc::new(FailingGeocoder));
        let invalid = Coordinates {
            latitude: 120.0,
            longitude: 0.0,
        };
        assert!(matches!(
            service.resolve(invalid).await,
            Err(LocationError::InvalidCoordinates { .. })
        ));
    }
}
