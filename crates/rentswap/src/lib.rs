//! Listing creation, address book, help center, and device location services for the
//! RentSwap marketplace.

pub mod addresses;
pub mod alerts;
pub mod config;
pub mod error;
pub mod help;
pub mod links;
pub mod listings;
pub mod location;
pub mod store;
pub mod telemetry;
