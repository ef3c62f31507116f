// Core business logic lives here - the brain of the operation
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod source;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use filters::{apply_filters, FilterCriteria, PriceRange};
pub use models::Listing;
pub use source::{ListingSource, RemoteSource};
pub use store::{Action, FilterState, ListingStore, LoadPhase};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
