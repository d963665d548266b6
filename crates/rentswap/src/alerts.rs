//! User-facing alerts derived from domain errors.
//!
//! Validation problems, external-call failures, and missing capabilities all end up as a
//! short titled message; nothing here is fatal to the process.

use serde::Serialize;
use serde_json::{json, Value};

use crate::addresses::{AddressError, AddressServiceError};
use crate::help::HelpError;
use crate::links::{LaunchError, LinkError};
use crate::listings::ListingServiceError;
use crate::location::LocationError;
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAlert {
    pub title: String,
    pub message: String,
}

impl UserAlert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// JSON body used by HTTP error responses.
    pub fn error_body(&self) -> Value {
        json!({
            "error": self.message,
            "title": self.title,
        })
    }
}

impl From<&StoreError> for UserAlert {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::NotFound => UserAlert::new("Not found", "That item no longer exists."),
            StoreError::Conflict => UserAlert::new("Already saved", err.to_string()),
            StoreError::Unavailable(_) | StoreError::Serialization(_) => UserAlert::new(
                "Something went wrong",
                "We couldn't save your changes. Please try again.",
            ),
        }
    }
}

impl From<&ListingServiceError> for UserAlert {
    fn from(err: &ListingServiceError) -> Self {
        match err {
            ListingServiceError::Validation(validation) => {
                UserAlert::new("Missing information", validation.to_string())
            }
            ListingServiceError::Store(store) => UserAlert::from(store),
        }
    }
}

impl From<&AddressServiceError> for UserAlert {
    fn from(err: &AddressServiceError) -> Self {
        match err {
            AddressServiceError::Address(AddressError::UnknownAddress(_)) => {
                UserAlert::new("Not found", err.to_string())
            }
            AddressServiceError::Address(address) => {
                UserAlert::new("Missing information", address.to_string())
            }
            AddressServiceError::Store(store) => UserAlert::from(store),
        }
    }
}

impl From<&LocationError> for UserAlert {
    fn from(err: &LocationError) -> Self {
        match err {
            LocationError::PermissionDenied | LocationError::Unavailable(_) => UserAlert::new(
                "Location unavailable",
                "Allow location access or enter the address manually.",
            ),
            LocationError::InvalidCoordinates { .. } => {
                UserAlert::new("Invalid location", err.to_string())
            }
            LocationError::Geocoding(_) => UserAlert::new(
                "Address lookup failed",
                "We found your position but couldn't look up the address.",
            ),
        }
    }
}

impl From<&LinkError> for UserAlert {
    fn from(err: &LinkError) -> Self {
        UserAlert::new("Contact unavailable", err.to_string())
    }
}

impl From<&LaunchError> for UserAlert {
    fn from(err: &LaunchError) -> Self {
        UserAlert::new("Couldn't open link", err.to_string())
    }
}

impl From<&HelpError> for UserAlert {
    fn from(err: &HelpError) -> Self {
        match err {
            HelpError::Link(link) => UserAlert::from(link),
            HelpError::UnknownChannel(_) => UserAlert::new("Contact unavailable", err.to_string()),
            HelpError::Io(_) | HelpError::Catalog(_) => UserAlert::new(
                "Help unavailable",
                "The help articles could not be loaded right now.",
            ),
        }
    }
}
