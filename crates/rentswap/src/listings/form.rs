use serde::{Deserialize, Serialize};

use super::domain::{ContactInfo, Condition, ListingType, PropertyType};
use crate::location::LocationData;

/// Form state for the create-listing screen.
///
/// Numeric inputs stay as the raw strings the user typed; `ListingGuard` parses them at
/// submission time so half-typed values never block editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub property_type: Option<PropertyType>,
    pub images: Vec<String>,
    pub condition: Condition,
    pub location: Option<LocationData>,
    pub contact: ContactInfo,
    pub house: HouseDraft,
    pub car: CarDraft,
    pub rent: RentDraft,
    pub swap: SwapDraft,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
            listing_type: ListingType::Rent,
            property_type: None,
            images: Vec::new(),
            condition: Condition::default(),
            location: None,
            contact: ContactInfo::default(),
            house: HouseDraft::default(),
            car: CarDraft::default(),
            rent: RentDraft::default(),
            swap: SwapDraft::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HouseDraft {
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub furnished: bool,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarDraft {
    pub make: String,
    pub model: String,
    pub year: String,
    pub mileage: String,
    pub transmission: String,
    pub fuel_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RentDraft {
    pub rental_period: String,
    pub minimum_rental_period: String,
    pub security_deposit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwapDraft {
    pub swap_preferences: String,
    pub swap_value: String,
}

/// Groups of fields the form renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSection {
    Basics,
    HouseDetails,
    CarDetails,
    RentalTerms,
    SwapTerms,
    Location,
    Contact,
}

impl ListingDraft {
    pub fn new(listing_type: ListingType) -> Self {
        Self {
            listing_type,
            ..Self::default()
        }
    }

    /// Sections shown for the current type/property-type selection, in render order.
    pub fn visible_sections(&self) -> Vec<FormSection> {
        let mut sections = vec![FormSection::Basics];
        match self.property_type {
            Some(PropertyType::House) => sections.push(FormSection::HouseDetails),
            Some(PropertyType::Car) => sections.push(FormSection::CarDetails),
            None => {}
        }
        sections.push(match self.listing_type {
            ListingType::Rent => FormSection::RentalTerms,
            ListingType::Swap => FormSection::SwapTerms,
        });
        sections.push(FormSection::Location);
        sections.push(FormSection::Contact);
        sections
    }

    /// Switching property type invalidates a category picked from the other catalog.
    pub fn select_property_type(&mut self, property_type: PropertyType) {
        if self.property_type != Some(property_type) {
            self.category.clear();
        }
        self.property_type = Some(property_type);
    }

    pub fn select_listing_type(&mut self, listing_type: ListingType) {
        self.listing_type = listing_type;
    }

    pub fn set_location(&mut self, location: Option<LocationData>) {
        self.location = location;
    }

    pub fn add_image(&mut self, uri: impl Into<String>) {
        let uri = uri.into();
        if !uri.trim().is_empty() && !self.images.contains(&uri) {
            self.images.push(uri);
        }
    }

    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }
}
