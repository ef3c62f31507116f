// HTTP client for the property-listings endpoint
pub mod listings;

// Re-export common types
pub use listings::{ApiListing, ListingsClient, ListingsError};
