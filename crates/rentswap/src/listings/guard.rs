use super::domain::{
    CarDetails, FuelType, HouseDetails, Listing, ListingStatus, ListingTerms, ListingType,
    PropertyDetails, PropertyType, RentalPeriod, Seller, Transmission,
};
use super::form::{CarDraft, HouseDraft, ListingDraft, RentDraft, SwapDraft};

pub const MAX_IMAGES: usize = 10;
const DEFAULT_MINIMUM_RENTAL_PERIOD: u32 = 1;

/// Validation errors raised before anything is written.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListingValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("please choose whether this is a house or a car")]
    MissingPropertyType,
    #[error("add at least one photo")]
    MissingImages,
    #[error("at most {max} photos can be attached (found {found})")]
    TooManyImages { max: usize, found: usize },
    #[error("set the listing location before publishing")]
    MissingLocation,
    #[error("price must be a non-negative number (found '{0}')")]
    InvalidPrice(String),
    #[error("{field} must be a valid number (found '{value}')")]
    InvalidNumber { field: &'static str, value: String },
    #[error("'{0}' is not a supported rental period")]
    InvalidRentalPeriod(String),
    #[error("minimum rental period must be at least 1")]
    ZeroMinimumRentalPeriod,
    #[error("location coordinates are out of range")]
    InvalidLocation,
}

/// Guard responsible for turning a form draft into a persistable `Listing`.
#[derive(Debug, Clone, Default)]
pub struct ListingGuard;

impl ListingGuard {
    pub fn listing_from_draft(
        &self,
        draft: ListingDraft,
        seller: &Seller,
    ) -> Result<Listing, ListingValidationError> {
        let title = required("title", &draft.title)?;
        let description = required("description", &draft.description)?;
        let raw_price = required("price", &draft.price)?;
        let category = required("category", &draft.category)?;
        let property_type = draft
            .property_type
            .ok_or(ListingValidationError::MissingPropertyType)?;

        let images: Vec<String> = draft
            .images
            .into_iter()
            .map(|uri| uri.trim().to_string())
            .filter(|uri| !uri.is_empty())
            .collect();
        if images.is_empty() {
            return Err(ListingValidationError::MissingImages);
        }
        if images.len() > MAX_IMAGES {
            return Err(ListingValidationError::TooManyImages {
                max: MAX_IMAGES,
                found: images.len(),
            });
        }

        let location = draft.location.ok_or(ListingValidationError::MissingLocation)?;
        if location.coordinates().validate().is_err() {
            return Err(ListingValidationError::InvalidLocation);
        }

        let price = parse_amount(&raw_price)
            .ok_or_else(|| ListingValidationError::InvalidPrice(raw_price.clone()))?;

        let terms = match draft.listing_type {
            ListingType::Rent => rent_terms(&draft.rent)?,
            ListingType::Swap => swap_terms(&draft.swap)?,
        };

        let details = match property_type {
            PropertyType::House => PropertyDetails::House(house_details(&draft.house)?),
            PropertyType::Car => PropertyDetails::Car(car_details(&draft.car)?),
        };

        Ok(Listing {
            title,
            description,
            price,
            category,
            property_type,
            images,
            condition: draft.condition,
            seller_id: seller.id.clone(),
            seller_name: seller.name.clone(),
            location,
            contact: draft.contact,
            status: ListingStatus::Active,
            terms,
            details,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ListingValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ListingValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn optional_amount(
    field: &'static str,
    raw: &str,
) -> Result<Option<f64>, ListingValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_amount(raw)
        .map(Some)
        .ok_or_else(|| ListingValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn optional_count<T: std::str::FromStr>(
    field: &'static str,
    raw: &str,
) -> Result<Option<T>, ListingValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| ListingValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn rent_terms(rent: &RentDraft) -> Result<ListingTerms, ListingValidationError> {
    let rental_period = if rent.rental_period.trim().is_empty() {
        RentalPeriod::default()
    } else {
        RentalPeriod::parse(&rent.rental_period)
            .ok_or_else(|| ListingValidationError::InvalidRentalPeriod(rent.rental_period.clone()))?
    };

    let minimum_rental_period =
        optional_count::<u32>("minimum rental period", &rent.minimum_rental_period)?
            .unwrap_or(DEFAULT_MINIMUM_RENTAL_PERIOD);
    if minimum_rental_period == 0 {
        return Err(ListingValidationError::ZeroMinimumRentalPeriod);
    }

    Ok(ListingTerms::Rent {
        rental_period,
        minimum_rental_period,
        security_deposit: optional_amount("security deposit", &rent.security_deposit)?,
    })
}

fn swap_terms(swap: &SwapDraft) -> Result<ListingTerms, ListingValidationError> {
    Ok(ListingTerms::Swap {
        swap_preferences: swap.swap_preferences.trim().to_string(),
        swap_value: optional_amount("swap value", &swap.swap_value)?,
    })
}

fn house_details(house: &HouseDraft) -> Result<HouseDetails, ListingValidationError> {
    Ok(HouseDetails {
        bedrooms: optional_count("bedrooms", &house.bedrooms)?.unwrap_or(0),
        bathrooms: optional_count("bathrooms", &house.bathrooms)?.unwrap_or(0),
        area_sqm: optional_amount("area", &house.area)?,
        furnished: house.furnished,
        amenities: house
            .amenities
            .iter()
            .map(|amenity| amenity.trim().to_string())
            .filter(|amenity| !amenity.is_empty())
            .collect(),
    })
}

fn car_details(car: &CarDraft) -> Result<CarDetails, ListingValidationError> {
    let transmission = match car.transmission.trim().to_ascii_lowercase().as_str() {
        "automatic" | "auto" => Some(Transmission::Automatic),
        "manual" => Some(Transmission::Manual),
        _ => None,
    };
    let fuel_type = match car.fuel_type.trim().to_ascii_lowercase().as_str() {
        "petrol" | "gasoline" => Some(FuelType::Petrol),
        "diesel" => Some(FuelType::Diesel),
        "hybrid" => Some(FuelType::Hybrid),
        "electric" | "ev" => Some(FuelType::Electric),
        _ => None,
    };

    Ok(CarDetails {
        make: car.make.trim().to_string(),
        model: car.model.trim().to_string(),
        year: optional_count("year", &car.year)?,
        mileage_km: optional_count("mileage", &car.mileage)?,
        transmission,
        fuel_type,
    })
}
