use metrics_exporter_prometheus::PrometheusHandle;
use rentswap::addresses::AddressService;
use rentswap::config::{AppConfig, LocationConfig};
use rentswap::error::AppError;
use rentswap::help::HelpCenter;
use rentswap::links::{DeepLink, LaunchError, LinkLauncher};
use rentswap::listings::ListingService;
use rentswap::location::{
    Coordinates, DeniedLocationProvider, FixedLocationProvider, LocationProvider,
    LocationService, NominatimGeocoder, NullGeocoder, ReverseGeocoder,
};
use rentswap::store::MemoryDocumentStore;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Services sharing one in-process document store.
#[derive(Clone)]
pub(crate) struct Services {
    pub(crate) store: Arc<MemoryDocumentStore>,
    pub(crate) listings: Arc<ListingService<MemoryDocumentStore>>,
    pub(crate) addresses: Arc<AddressService<MemoryDocumentStore>>,
    pub(crate) help: Arc<HelpCenter>,
    pub(crate) location: Arc<LocationService>,
}

impl Services {
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let store = Arc::new(MemoryDocumentStore::new());
        Ok(Self {
            listings: Arc::new(ListingService::new(store.clone())),
            addresses: Arc::new(AddressService::new(store.clone())),
            help: Arc::new(HelpCenter::from_config(&config.support)?),
            location: Arc::new(location_service(&config.location)?),
            store,
        })
    }
}

/// Device position from configuration, or the denied stub when none is set.
pub(crate) fn location_service(config: &LocationConfig) -> Result<LocationService, AppError> {
    let provider: Arc<dyn LocationProvider> = match config.device_position {
        Some(position) => Arc::new(FixedLocationProvider::new(position)),
        None => Arc::new(DeniedLocationProvider),
    };
    let geocoder: Arc<dyn ReverseGeocoder> = match config.geocoder_url.as_deref() {
        Some(url) => Arc::new(NominatimGeocoder::new(url)?),
        None => Arc::new(NullGeocoder),
    };
    Ok(LocationService::new(provider, geocoder))
}

/// Launcher for the CLI: there is no app switcher, so the link is printed for the user.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StdoutLauncher;

impl LinkLauncher for StdoutLauncher {
    fn open(&self, link: &DeepLink) -> Result<(), LaunchError> {
        info!(uri = link.uri(), "opening link");
        println!("Open: {link}");
        if let DeepLink::Messaging { web_fallback, .. } = link {
            println!("  (no app installed? {web_fallback})");
        }
        Ok(())
    }
}

/// Parses `LAT,LON` in decimal degrees.
pub(crate) fn parse_coordinates(raw: &str) -> Result<Coordinates, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{raw}'"))?;
    let latitude = lat
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid latitude '{lat}' ({err})"))?;
    let longitude = lon
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid longitude '{lon}' ({err})"))?;
    Coordinates::new(latitude, longitude).map_err(|err| err.to_string())
}
