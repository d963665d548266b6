use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::location::Coordinates;

const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub location: LocationConfig,
    pub support: SupportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            location: LocationConfig::from_env()?,
            support: SupportConfig::from_env(),
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Device position and reverse geocoding endpoint.
///
/// A missing device position means the location capability is absent and the
/// service falls back to the permanently denied provider.
#[derive(Debug, Clone)]
pub struct LocationConfig {
    pub geocoder_url: Option<String>,
    pub device_position: Option<Coordinates>,
}

impl LocationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let geocoder_url = match env::var("APP_GEOCODER_URL") {
            Ok(value) if value.trim().eq_ignore_ascii_case("off") => None,
            Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            _ => Some(DEFAULT_GEOCODER_URL.to_string()),
        };

        let latitude = env::var("APP_DEVICE_LATITUDE").ok();
        let longitude = env::var("APP_DEVICE_LONGITUDE").ok();
        let device_position = match (latitude, longitude) {
            (Some(lat), Some(lon)) => {
                let latitude = lat
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidDevicePosition)?;
                let longitude = lon
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidDevicePosition)?;
                let coordinates = Coordinates::new(latitude, longitude)
                    .map_err(|_| ConfigError::InvalidDevicePosition)?;
                Some(coordinates)
            }
            (None, None) => None,
            _ => return Err(ConfigError::InvalidDevicePosition),
        };

        Ok(Self {
            geocoder_url,
            device_position,
        })
    }
}

/// Support contacts surfaced by the help center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportConfig {
    pub whatsapp: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub faq_csv: Option<PathBuf>,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            whatsapp: "+15550100200".to_string(),
            email: "support@rentswap.app".to_string(),
            phone: "+15550100300".to_string(),
            website: "https://rentswap.app/help".to_string(),
            faq_csv: None,
        }
    }
}

impl SupportConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            whatsapp: env::var("APP_SUPPORT_WHATSAPP").unwrap_or(defaults.whatsapp),
            email: env::var("APP_SUPPORT_EMAIL").unwrap_or(defaults.email),
            phone: env::var("APP_SUPPORT_PHONE").unwrap_or(defaults.phone),
            website: env::var("APP_SUPPORT_WEBSITE").unwrap_or(defaults.website),
            faq_csv: env::var("APP_FAQ_CSV").ok().map(PathBuf::from),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidDevicePosition,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDevicePosition => write!(
                f,
                "APP_DEVICE_LATITUDE and APP_DEVICE_LONGITUDE must both be set to valid coordinates"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidDevicePosition => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
