//! Listing creation for rent and swap offers on houses and cars.
//!
//! The form draft is validated by `ListingGuard`, then published through `ListingService`
//! with a single document write. Nothing is written when validation fails.

pub mod domain;
pub mod form;
pub mod guard;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    categories_for, CarDetails, Condition, ContactInfo, FuelType, HouseDetails, Listing,
    ListingId, ListingRecord, ListingStatus, ListingTerms, ListingType, PropertyDetails,
    PropertyType, RentalPeriod, Seller, Transmission,
};
pub use form::{CarDraft, FormSection, HouseDraft, ListingDraft, RentDraft, SwapDraft};
pub use guard::{ListingGuard, ListingValidationError, MAX_IMAGES};
pub use router::{listing_router, ListingSubmission};
pub use service::{ListingService, ListingServiceError};
