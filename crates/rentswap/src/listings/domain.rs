use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::location::LocationData;

/// Identifier wrapper for persisted listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingType {
    Rent,
    Swap,
}

impl ListingType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rent => "For rent",
            Self::Swap => "For swap",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rent" | "rental" => Some(Self::Rent),
            "swap" | "exchange" => Some(Self::Swap),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    House,
    Car,
}

impl PropertyType {
    pub const fn ordered() -> [Self; 2] {
        [Self::House, Self::Car]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::House => "House",
            Self::Car => "Car",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "house" | "home" => Some(Self::House),
            "car" | "vehicle" => Some(Self::Car),
            _ => None,
        }
    }
}

/// Category picker options offered per property type.
pub fn categories_for(property_type: PropertyType) -> &'static [&'static str] {
    match property_type {
        PropertyType::House => &["Apartment", "Villa", "Studio", "Townhouse", "Room"],
        PropertyType::Car => &["Sedan", "SUV", "Hatchback", "Pickup", "Van", "Motorcycle"],
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    New,
    LikeNew,
    #[default]
    Good,
    Fair,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl RentalPeriod {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Some(Self::Daily),
            "weekly" | "week" => Some(Self::Weekly),
            "monthly" | "month" => Some(Self::Monthly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Automatic,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
}

/// Identity of the user publishing the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseDetails {
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_sqm: Option<f64>,
    pub furnished: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDetails {
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage_km: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<Transmission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
}

/// Detail block keyed by property type; exactly one is ever present on a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyDetails {
    #[serde(rename = "houseDetails")]
    House(HouseDetails),
    #[serde(rename = "carDetails")]
    Car(CarDetails),
}

impl PropertyDetails {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyDetails::House(_) => PropertyType::House,
            PropertyDetails::Car(_) => PropertyType::Car,
        }
    }
}

/// Terms tagged by listing type; rent and swap fields never appear together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingTerms {
    #[serde(rename_all = "camelCase")]
    Rent {
        rental_period: RentalPeriod,
        minimum_rental_period: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        security_deposit: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Swap {
        swap_preferences: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        swap_value: Option<f64>,
    },
}

impl ListingTerms {
    pub fn listing_type(&self) -> ListingType {
        match self {
            ListingTerms::Rent { .. } => ListingType::Rent,
            ListingTerms::Swap { .. } => ListingType::Swap,
        }
    }
}

/// Validated listing as written to the `listings` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub property_type: PropertyType,
    pub images: Vec<String>,
    pub condition: Condition,
    pub seller_id: String,
    pub seller_name: String,
    pub location: LocationData,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(flatten)]
    pub terms: ListingTerms,
    #[serde(flatten)]
    pub details: PropertyDetails,
}

impl Listing {
    pub fn listing_type(&self) -> ListingType {
        self.terms.listing_type()
    }
}

/// Listing together with the store-assigned identifier and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: ListingId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub listing: Listing,
}
