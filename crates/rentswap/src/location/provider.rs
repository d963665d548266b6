use async_trait::async_trait;
use serde::Serialize;

use super::{Coordinates, LocationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Device geolocation capability.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Current permission state without prompting.
    async fn permission_status(&self) -> PermissionStatus;

    /// Prompt for foreground location access.
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Stand-in used when the platform offers no location module at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocationProvider;

#[async_trait]
impl LocationProvider for DeniedLocationProvider {
    async fn permission_status(&self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable(
            "location module not available".to_string(),
        ))
    }
}

/// Reports a configured position, e.g. a kiosk device or a seeded demo.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    position: Coordinates,
}

impl FixedLocationProvider {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn permission_status(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.position.validate()?;
        Ok(self.position)
    }
}
