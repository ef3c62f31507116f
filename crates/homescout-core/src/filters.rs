use serde::{Deserialize, Serialize};

use crate::models::Listing;

/// Price bounds; a missing bound means unbounded on that side
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

/// Everything the user can narrow the listing set by
///
/// Each field defaults to "unconstrained" (empty string/vec/unset bounds),
/// and filtering with the default criteria is the identity on the listing
/// set. Token vecs are inclusive-OR within an axis, AND across axes.
///
/// `tenure` and `is_auction` are settable and counted in the active-filter
/// badge but the predicate never consults them - that matches the upstream
/// behavior, and changing it would silently alter results users already see.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_query: String,
    pub categories: Vec<String>,
    pub bedrooms: Vec<String>,
    pub bathrooms: Vec<String>,
    pub tenure: Vec<String>,
    pub furnishing: Vec<String>,
    pub is_auction: bool,
    pub price_range: PriceRange,
}

impl FilterCriteria {
    /// How many filters are active, for the UI badge
    ///
    /// Counts every selected token plus one for the auction flag and one if
    /// either price bound is set. Not consulted by the filter itself.
    pub fn active_filter_count(&self) -> usize {
        self.categories.len()
            + self.bedrooms.len()
            + self.bathrooms.len()
            + self.tenure.len()
            + self.furnishing.len()
            + usize::from(self.is_auction)
            + usize::from(self.price_range.is_set())
    }
}

/// Add the token if absent, remove it if present
pub(crate) fn toggle_token(tokens: &mut Vec<String>, value: String) {
    if let Some(pos) = tokens.iter().position(|t| *t == value) {
        tokens.remove(pos);
    } else {
        tokens.push(value);
    }
}

/// The filter function - recomputes the whole view from scratch
///
/// Pure and total: no caching, no incremental updates, relative listing
/// order preserved. A listing is kept iff it passes every axis that has an
/// active constraint; predicates short-circuit in the order below.
pub fn apply_filters(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| matches_criteria(listing, criteria))
        .cloned()
        .collect()
}

fn matches_criteria(listing: &Listing, criteria: &FilterCriteria) -> bool {
    // Search query: case-insensitive substring over the identifying fields,
    // any one match is enough
    if !criteria.search_query.is_empty() {
        let query = criteria.search_query.to_lowercase();
        let matches_search = [
            &listing.name,
            &listing.address,
            &listing.id,
            &listing.city,
            &listing.state,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query));

        if !matches_search {
            return false;
        }
    }

    if !criteria.categories.is_empty() && !criteria.categories.contains(&listing.category) {
        return false;
    }

    // Bedrooms: exact string match on the count, except the "5+" sentinel
    // which means five or more
    if !criteria.bedrooms.is_empty() {
        let beds = listing.bed_rooms.to_string();
        let matches_beds = criteria.bedrooms.iter().any(|token| {
            if token == "5+" {
                listing.bed_rooms >= 5
            } else {
                *token == beds
            }
        });
        if !matches_beds {
            return false;
        }
    }

    // Bathrooms: same scheme, sentinel is "4+"
    if !criteria.bathrooms.is_empty() {
        let baths = listing.bath_rooms.to_string();
        let matches_baths = criteria.bathrooms.iter().any(|token| {
            if token == "4+" {
                listing.bath_rooms >= 4
            } else {
                *token == baths
            }
        });
        if !matches_baths {
            return false;
        }
    }

    if !criteria.furnishing.is_empty()
        && !criteria
            .furnishing
            .iter()
            .any(|f| f == listing.furnishing_label())
    {
        return false;
    }

    if criteria.price_range.is_set() {
        let min = criteria.price_range.min.unwrap_or(0.0);
        let max = criteria.price_range.max.unwrap_or(f64::INFINITY);
        if listing.price < min || listing.price > max {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, beds: u32, price: f64, category: &str) -> Listing {
        Listing {
            id: id.to_string(),
            name: format!("Property {}", id),
            address: format!("{} Jalan Example", id),
            city: "Kuala Lumpur".to_string(),
            state: "Selangor".to_string(),
            category: category.to_string(),
            bed_rooms: beds,
            bath_rooms: 2,
            furnishings: Some("furnished".to_string()),
            price,
            tenure: None,
            is_auction: None,
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("A", 2, 200_000.0, "residential"),
            listing("B", 5, 900_000.0, "commercial"),
        ]
    }

    #[test]
    fn test_default_criteria_is_identity() {
        let listings = sample();
        let filtered = apply_filters(&listings, &FilterCriteria::default());
        assert_eq!(filtered, listings);
    }

    #[test]
    fn test_filtered_is_subset_and_order_preserved() {
        let listings = vec![
            listing("A", 1, 100_000.0, "residential"),
            listing("B", 2, 200_000.0, "residential"),
            listing("C", 3, 300_000.0, "commercial"),
        ];
        let criteria = FilterCriteria {
            categories: vec!["residential".to_string()],
            ..Default::default()
        };

        let filtered = apply_filters(&listings, &criteria);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "A");
        assert_eq!(filtered[1].id, "B");
    }

    #[test]
    fn test_category_filter() {
        let criteria = FilterCriteria {
            categories: vec!["residential".to_string()],
            ..Default::default()
        };
        let filtered = apply_filters(&sample(), &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "A");
    }

    #[test]
    fn test_bedroom_sentinel_five_plus() {
        let listings = vec![listing("X", 7, 500_000.0, "residential")];

        let five_plus = FilterCriteria {
            bedrooms: vec!["5+".to_string()],
            ..Default::default()
        };
        assert_eq!(apply_filters(&listings, &five_plus).len(), 1);

        let exactly_four = FilterCriteria {
            bedrooms: vec!["4".to_string()],
            ..Default::default()
        };
        assert!(apply_filters(&listings, &exactly_four).is_empty());
    }

    #[test]
    fn test_bedroom_set_matches_sample() {
        let criteria = FilterCriteria {
            bedrooms: vec!["5+".to_string()],
            ..Default::default()
        };
        let filtered = apply_filters(&sample(), &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "B");
    }

    #[test]
    fn test_bathroom_sentinel_four_plus() {
        let mut four_baths = listing("X", 2, 300_000.0, "residential");
        four_baths.bath_rooms = 4;
        let mut six_baths = listing("Y", 2, 300_000.0, "residential");
        six_baths.bath_rooms = 6;
        let listings = vec![four_baths, six_baths];

        let four_plus = FilterCriteria {
            bathrooms: vec!["4+".to_string()],
            ..Default::default()
        };
        assert_eq!(apply_filters(&listings, &four_plus).len(), 2);

        let exactly_three = FilterCriteria {
            bathrooms: vec!["3".to_string()],
            ..Default::default()
        };
        assert!(apply_filters(&listings, &exactly_three).is_empty());
    }

    #[test]
    fn test_price_range_bounds() {
        let listings = vec![listing("P", 3, 500_000.0, "residential")];

        let unbounded = FilterCriteria::default();
        assert_eq!(apply_filters(&listings, &unbounded).len(), 1);

        let inside = FilterCriteria {
            price_range: PriceRange {
                min: Some(100_000.0),
                max: Some(600_000.0),
            },
            ..Default::default()
        };
        assert_eq!(apply_filters(&listings, &inside).len(), 1);

        let below_min = FilterCriteria {
            price_range: PriceRange {
                min: Some(600_000.0),
                max: None,
            },
            ..Default::default()
        };
        assert!(apply_filters(&listings, &below_min).is_empty());
    }

    #[test]
    fn test_price_min_only_matches_sample() {
        let criteria = FilterCriteria {
            price_range: PriceRange {
                min: Some(300_000.0),
                max: None,
            },
            ..Default::default()
        };
        let filtered = apply_filters(&sample(), &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "B");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let criteria = FilterCriteria {
            search_query: "kl".to_string(),
            ..Default::default()
        };
        // "kl" appears inside "Kuala Lumpur" once lowercased
        let mut hit = listing("Z", 2, 100_000.0, "residential");
        hit.city = "KLang Valley".to_string();
        let filtered = apply_filters(&[hit], &criteria);
        assert_eq!(filtered.len(), 1);

        let upper = FilterCriteria {
            search_query: "KUALA".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&sample(), &upper).len(), 2);
    }

    #[test]
    fn test_search_matches_any_identifying_field() {
        let listings = sample();

        for query in ["Property A", "A Jalan", "A", "kuala", "selangor"] {
            let criteria = FilterCriteria {
                search_query: query.to_string(),
                ..Default::default()
            };
            assert!(
                !apply_filters(&listings, &criteria).is_empty(),
                "query {:?} should match",
                query
            );
        }

        let miss = FilterCriteria {
            search_query: "no such place".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&listings, &miss).is_empty());
    }

    #[test]
    fn test_furnishing_missing_label_is_unknown() {
        let mut bare = listing("U", 2, 100_000.0, "residential");
        bare.furnishings = None;
        let listings = vec![bare];

        let wants_unfurnished = FilterCriteria {
            furnishing: vec!["unfurnished".to_string()],
            ..Default::default()
        };
        assert!(apply_filters(&listings, &wants_unfurnished).is_empty());

        let wants_unknown = FilterCriteria {
            furnishing: vec!["unknown".to_string()],
            ..Default::default()
        };
        assert_eq!(apply_filters(&listings, &wants_unknown).len(), 1);
    }

    #[test]
    fn tenure_and_auction_do_not_restrict() {
        // Selectable, badge-counted, but the predicate ignores them
        let criteria = FilterCriteria {
            tenure: vec!["Freehold".to_string()],
            is_auction: true,
            ..Default::default()
        };
        let listings = sample();
        assert_eq!(apply_filters(&listings, &criteria), listings);
        assert_eq!(criteria.active_filter_count(), 2);
    }

    #[test]
    fn test_axes_combine_with_and() {
        let criteria = FilterCriteria {
            categories: vec!["residential".to_string()],
            bedrooms: vec!["5+".to_string()],
            ..Default::default()
        };
        // A is residential but 2 beds, B has 5 beds but is commercial
        assert!(apply_filters(&sample(), &criteria).is_empty());
    }

    #[test]
    fn test_active_filter_count() {
        let criteria = FilterCriteria {
            categories: vec!["residential".to_string(), "apartment".to_string()],
            bedrooms: vec!["3".to_string()],
            bathrooms: vec!["2".to_string()],
            furnishing: vec!["furnished".to_string()],
            price_range: PriceRange {
                min: Some(100_000.0),
                max: None,
            },
            ..Default::default()
        };
        // 2 categories + 1 bedroom + 1 bathroom + 1 furnishing + 1 price
        assert_eq!(criteria.active_filter_count(), 6);
        assert_eq!(FilterCriteria::default().active_filter_count(), 0);
    }

    #[test]
    fn test_toggle_token_round_trip() {
        let mut tokens = Vec::new();
        toggle_token(&mut tokens, "2".to_string());
        assert_eq!(tokens, vec!["2"]);
        toggle_token(&mut tokens, "3".to_string());
        assert_eq!(tokens, vec!["2", "3"]);
        toggle_token(&mut tokens, "2".to_string());
        assert_eq!(tokens, vec!["3"]);
    }
}
