//! Saved addresses for checkout and meet-ups.
//!
//! `AddressBook` owns the default-address rule; `AddressService` persists only the
//! entries an operation actually changed.

pub mod book;
pub mod domain;
pub mod router;
pub mod service;


pub use book::AddressBook;
pub use domain::{Address, AddressDraft, AddressError, AddressFields, AddressId};
pub use router::address_router;
pub use service::{AddressService, AddressServiceError};
