use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::Coordinates;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressId(pub String);

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Saved delivery/meet-up address in a user's address book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub user_id: String,
    pub label: String,
    pub full_address: String,
    pub city: String,
    pub phone: String,
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Address {
    pub(crate) fn from_fields(id: AddressId, user_id: &str, fields: AddressFields) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            label: fields.label,
            full_address: fields.full_address,
            city: fields.city,
            phone: fields.phone,
            is_default: fields.is_default,
            coordinates: fields.coordinates,
        }
    }
}

/// Form state for the add/edit address sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressDraft {
    pub label: String,
    pub full_address: String,
    pub city: String,
    pub phone: String,
    pub is_default: bool,
    pub coordinates: Option<Coordinates>,
}

/// Validated address fields, not yet attached to a book entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressFields {
    pub label: String,
    pub full_address: String,
    pub city: String,
    pub phone: String,
    pub is_default: bool,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("address coordinates are out of range")]
    InvalidCoordinates,
    #[error("address {0} was not found")]
    UnknownAddress(AddressId),
}

impl AddressDraft {
    pub fn validate(self) -> Result<AddressFields, AddressError> {
        let label = required("label", &self.label)?;
        let full_address = required("address", &self.full_address)?;
        let city = required("city", &self.city)?;
        let phone = required("phone", &self.phone)?;
        if let Some(coordinates) = &self.coordinates {
            coordinates
                .validate()
                .map_err(|_| AddressError::InvalidCoordinates)?;
        }

        Ok(AddressFields {
            label,
            full_address,
            city,
            phone,
            is_default: self.is_default,
            coordinates: self.coordinates,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, AddressError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AddressError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
