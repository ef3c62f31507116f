use serde::{Deserialize, Serialize};

/// Property listing model - the star of the show
///
/// This is the shape the listings endpoint hands us, camelCase and all.
/// Listings are immutable input data: each successful fetch replaces the
/// whole set, nothing is ever patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// One of `PROPERTY_CATEGORIES`, kept as a string so an unknown
    /// category in the feed doesn't kill deserialization
    pub category: String,
    pub bed_rooms: u32,
    pub bath_rooms: u32,
    /// Sometimes missing from the feed; the filter treats an absent label
    /// as "unknown" rather than failing
    #[serde(default)]
    pub furnishings: Option<String>,
    pub price: f64,
    /// Carried through from the feed but not consulted by the filter
    #[serde(default)]
    pub tenure: Option<String>,
    #[serde(default)]
    pub is_auction: Option<bool>,
}

impl Listing {
    /// Furnishing label with the missing-field fallback applied
    pub fn furnishing_label(&self) -> &str {
        self.furnishings.as_deref().unwrap_or(UNKNOWN_FURNISHING)
    }
}

/// Label substituted when a listing has no furnishings field
pub const UNKNOWN_FURNISHING: &str = "unknown";

/// The closed set of category ids the UI offers
pub const PROPERTY_CATEGORIES: [&str; 4] =
    ["residential", "apartment", "commercial", "industrial"];

/// Bedroom filter tokens; "5+" is a sentinel meaning five or more
pub const BEDROOM_OPTIONS: [&str; 5] = ["1", "2", "3", "4", "5+"];

/// Bathroom filter tokens; "4+" is a sentinel meaning four or more
pub const BATHROOM_OPTIONS: [&str; 4] = ["1", "2", "3", "4+"];

pub const TENURE_OPTIONS: [&str; 2] = ["Freehold", "Leasehold"];

pub const FURNISHING_OPTIONS: [&str; 4] = [
    "furnished",
    "partially furnished",
    "unfurnished",
    "fully furnished",
];
