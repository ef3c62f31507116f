use homescout_api::{ApiListing, ListingsClient};

use crate::{models::Listing, Error, Result};

/// Trait for listing sources - makes testing easier and keeps things flexible
///
/// The store only cares about getting a Vec<Listing>; whether that comes
/// from the real endpoint or a test stub is not its problem.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Listing>>;
}

/// The real thing: wraps the HTTP client from homescout-api
pub struct RemoteSource {
    client: ListingsClient,
}

impl RemoteSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: ListingsClient::new(endpoint),
        }
    }
}

#[async_trait::async_trait]
impl ListingSource for RemoteSource {
    async fn fetch_all(&self) -> Result<Vec<Listing>> {
        // Network trouble, bad status, garbled body - all one message to
        // the consumer
        let listings = self
            .client
            .fetch_listings(None)
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        Ok(listings.into_iter().map(api_to_listing).collect())
    }
}

/// Convert the wire shape to our internal Listing model
fn api_to_listing(raw: ApiListing) -> Listing {
    Listing {
        id: raw.id,
        name: raw.name,
        address: raw.address,
        city: raw.city,
        state: raw.state,
        category: raw.category,
        bed_rooms: raw.bed_rooms,
        bath_rooms: raw.bath_rooms,
        furnishings: raw.furnishings,
        price: raw.price,
        tenure: raw.tenure,
        is_auction: raw.is_auction,
    }
}
