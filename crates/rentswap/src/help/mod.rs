//! Help center: FAQ catalog, support contacts, and outbound contact links.

mod catalog;
mod center;
mod router;

pub use catalog::{FaqCatalog, FaqEntry};
pub use center::{HelpCenter, SupportContacts};
pub use router::{help_router, FaqQuery};

use crate::links::LinkError;

#[derive(Debug, thiserror::Error)]
pub enum HelpError {
    #[error("unknown contact channel '{0}'")]
    UnknownChannel(String),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("failed to read FAQ catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid FAQ catalog data: {0}")]
    Catalog(#[from] csv::Error),
}
