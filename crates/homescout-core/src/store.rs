use serde::{Deserialize, Serialize};

use crate::filters::{apply_filters, toggle_token, FilterCriteria};
use crate::models::Listing;
use crate::source::ListingSource;

/// Where the one-and-only fetch stands
///
/// Pattern-match on this instead of juggling separate loading/error flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum LoadPhase {
    /// Nothing fetched yet
    #[default]
    Idle,
    /// Request in flight
    Pending,
    /// Last fetch succeeded
    Ready,
    /// Last fetch failed with this message
    Failed(String),
}

/// Every way the state can change
///
/// Criteria actions each touch exactly one field; the filtered view is
/// recomputed after any of them. Fetch actions bracket the async load.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchStarted,
    FetchFinished(Result<Vec<Listing>, String>),
    SetSearchQuery(String),
    ToggleCategory(String),
    ToggleBedroom(String),
    ToggleBathroom(String),
    SetBedrooms(Vec<String>),
    SetBathrooms(Vec<String>),
    SetTenure(Vec<String>),
    SetFurnishing(Vec<String>),
    SetIsAuction(bool),
    SetPriceMin(Option<f64>),
    SetPriceMax(Option<f64>),
    ApplyAll(FilterCriteria),
    Reset,
}

/// The whole application state: listings, criteria, derived view, phase
///
/// `filtered` is never mutated independently - it is always the result of
/// running the filter over `data` with the current `criteria`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub data: Vec<Listing>,
    pub filtered: Vec<Listing>,
    pub phase: LoadPhase,
    pub criteria: FilterCriteria,
}

impl FilterState {
    /// The explicit state transition: consume a state, produce the next one
    ///
    /// No hidden mutation anywhere else; every observable change goes
    /// through here.
    pub fn apply(mut self, action: Action) -> FilterState {
        match action {
            Action::FetchStarted => {
                self.phase = LoadPhase::Pending;
                return self;
            }
            Action::FetchFinished(Ok(listings)) => {
                tracing::debug!(count = listings.len(), "listings loaded");
                self.data = listings;
                self.phase = LoadPhase::Ready;
            }
            Action::FetchFinished(Err(message)) => {
                tracing::warn!(error = %message, "listings fetch failed");
                // Previously loaded data stays usable
                self.phase = LoadPhase::Failed(message);
                return self;
            }
            Action::SetSearchQuery(query) => self.criteria.search_query = query,
            Action::ToggleCategory(category) => {
                toggle_token(&mut self.criteria.categories, category)
            }
            Action::ToggleBedroom(bedroom) => toggle_token(&mut self.criteria.bedrooms, bedroom),
            Action::ToggleBathroom(bathroom) => {
                toggle_token(&mut self.criteria.bathrooms, bathroom)
            }
            Action::SetBedrooms(bedrooms) => self.criteria.bedrooms = bedrooms,
            Action::SetBathrooms(bathrooms) => self.criteria.bathrooms = bathrooms,
            Action::SetTenure(tenure) => self.criteria.tenure = tenure,
            Action::SetFurnishing(furnishing) => self.criteria.furnishing = furnishing,
            Action::SetIsAuction(is_auction) => self.criteria.is_auction = is_auction,
            Action::SetPriceMin(min) => self.criteria.price_range.min = min,
            Action::SetPriceMax(max) => self.criteria.price_range.max = max,
            Action::ApplyAll(criteria) => self.criteria = criteria,
            Action::Reset => {
                self.criteria = FilterCriteria::default();
                self.filtered = self.data.clone();
                return self;
            }
        }

        self.filtered = apply_filters(&self.data, &self.criteria);
        self
    }

    /// The current filtered view
    pub fn filtered_listings(&self) -> &[Listing] {
        &self.filtered
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Pending
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The state-owning object consumers hold - no global singleton
///
/// Owns the state and the listing source; all mutations run to completion
/// synchronously except `load_listings`, which is the one async operation.
/// Re-triggering a load while one is in flight is safe: every completion
/// replaces the listing set wholesale, so the last one simply wins.
pub struct ListingStore {
    state: FilterState,
    source: Box<dyn ListingSource>,
}

impl ListingStore {
    pub fn new(source: Box<dyn ListingSource>) -> Self {
        Self {
            state: FilterState::default(),
            source,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);
    }

    /// Fetch the listing set and fold the outcome into the state
    ///
    /// Failures land in `LoadPhase::Failed` with a best-effort message;
    /// retry is the caller's call (just invoke this again).
    pub async fn load_listings(&mut self) {
        self.dispatch(Action::FetchStarted);
        let outcome = self
            .source
            .fetch_all()
            .await
            .map_err(|e| e.to_string());
        self.dispatch(Action::FetchFinished(outcome));
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn filtered_listings(&self) -> &[Listing] {
        self.state.filtered_listings()
    }

    pub fn active_filter_count(&self) -> usize {
        self.state.criteria.active_filter_count()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.dispatch(Action::SetSearchQuery(query.into()));
    }

    pub fn toggle_category(&mut self, category: impl Into<String>) {
        self.dispatch(Action::ToggleCategory(category.into()));
    }

    pub fn toggle_bedroom(&mut self, bedroom: impl Into<String>) {
        self.dispatch(Action::ToggleBedroom(bedroom.into()));
    }

    pub fn toggle_bathroom(&mut self, bathroom: impl Into<String>) {
        self.dispatch(Action::ToggleBathroom(bathroom.into()));
    }

    pub fn set_bedrooms(&mut self, bedrooms: Vec<String>) {
        self.dispatch(Action::SetBedrooms(bedrooms));
    }

    pub fn set_bathrooms(&mut self, bathrooms: Vec<String>) {
        self.dispatch(Action::SetBathrooms(bathrooms));
    }

    pub fn set_tenure(&mut self, tenure: Vec<String>) {
        self.dispatch(Action::SetTenure(tenure));
    }

    pub fn set_furnishing(&mut self, furnishing: Vec<String>) {
        self.dispatch(Action::SetFurnishing(furnishing));
    }

    pub fn set_is_auction(&mut self, is_auction: bool) {
        self.dispatch(Action::SetIsAuction(is_auction));
    }

    pub fn set_price_min(&mut self, min: Option<f64>) {
        self.dispatch(Action::SetPriceMin(min));
    }

    pub fn set_price_max(&mut self, max: Option<f64>) {
        self.dispatch(Action::SetPriceMax(max));
    }

    /// Commit a batch of pending edits in one go
    pub fn apply_all(&mut self, criteria: FilterCriteria) {
        self.dispatch(Action::ApplyAll(criteria));
    }

    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }
}
