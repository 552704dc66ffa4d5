//! Catalog generation and queries
//!
//! A [`CatalogProvider`] turns a [`TripRequest`] into the three step
//! catalogs. Lookups never fail: unknown destinations fall back to generic
//! defaults. [`CatalogQuery`] narrows and orders a catalog for display.

mod fixtures;
mod model;

pub use fixtures::{FixtureCatalog, adjust_price_for_budget, normalize_destination};
pub use model::{
    Accommodation, Activity, CatalogItem, FeaturedTrip, ItineraryTemplateDay, JourneySegment,
    TransportDetails, TransportOption, parse_duration_minutes,
};

use std::cmp::Ordering;

use crate::request::{Preferences, TripRequest};
use crate::types::{SortKey, Step};

/// Source of catalog data for a trip request
pub trait CatalogProvider {
    fn activities(&self, request: &TripRequest) -> Vec<Activity>;

    fn accommodation(&self, request: &TripRequest) -> Vec<Accommodation>;

    /// Route-level transport options for the destination.
    fn transportation(&self, request: &TripRequest) -> Vec<TransportOption>;

    /// Legs of the journey (outbound, local, intercity, return), with
    /// route labels filled in for the request.
    fn journey_segments(&self, request: &TripRequest) -> Vec<JourneySegment>;

    /// Options for one journey segment, each tagged with `segment_id`.
    fn segment_options(&self, request: &TripRequest, segment_id: &str) -> Vec<TransportOption>;

    /// Route-level options followed by each segment's options in segment
    /// order. Ids already present are skipped.
    fn transport_catalog(&self, request: &TripRequest) -> Vec<TransportOption> {
        let mut options = self.transportation(request);
        for segment in self.journey_segments(request) {
            for option in self.segment_options(request, &segment.id) {
                if !options.iter().any(|o| o.id == option.id) {
                    options.push(option);
                }
            }
        }
        options
    }

    /// Day templates for the destination, possibly empty.
    fn itinerary_template(&self, request: &TripRequest) -> Vec<ItineraryTemplateDay>;

    fn featured_trips(&self) -> &[FeaturedTrip];

    /// First featured trip whose name or location mentions the destination.
    fn featured_trip_for(&self, request: &TripRequest) -> Option<&FeaturedTrip> {
        self.featured_trips()
            .iter()
            .find(|trip| trip.matches_destination(&request.destination))
    }
}

/// Filter and sort options for one catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    /// Allowed item types, compared case-insensitively. Empty allows all.
    pub types: Vec<String>,
    /// Ceiling on the item's total price
    pub max_price: Option<f64>,
    /// Inclusive total price range
    pub price_range: Option<(f64, f64)>,
    /// Minimum rating. Unrated items (transport) always pass.
    pub min_rating: Option<f64>,
    pub sort: SortKey,
}

impl CatalogQuery {
    /// Query a step's catalog with the matching preference list as type filter.
    pub fn for_step(step: Step, preferences: &Preferences) -> Self {
        let types = match step {
            Step::Activities => &preferences.activity_types,
            Step::Accommodation => &preferences.accommodation_types,
            Step::Transportation => &preferences.transport_preferences,
        };
        Self {
            types: types.clone(),
            ..Self::default()
        }
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some((min, max));
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether an item passes every filter of this query.
    pub fn matches<T: CatalogItem>(&self, item: &T) -> bool {
        if !self.types.is_empty()
            && !self
                .types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(item.kind()))
        {
            return false;
        }

        let price = item.total_price();
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        if let Some((min, max)) = self.price_range
            && (price < min || price > max)
        {
            return false;
        }

        match (self.min_rating, item.rating()) {
            (Some(min), Some(rating)) => rating >= min,
            _ => true,
        }
    }

    /// Filter then sort. The input order is kept for non-reordering keys and ties.
    pub fn apply<T: CatalogItem>(&self, items: Vec<T>) -> Vec<T> {
        let mut out: Vec<T> = items.into_iter().filter(|i| self.matches(i)).collect();
        sort_items(&mut out, self.sort);
        out
    }
}

/// Stable sort by `key`: rating high to low, price and duration low to high.
///
/// Items without a rating or readable duration sort last.
pub fn sort_items<T: CatalogItem>(items: &mut [T], key: SortKey) {
    match key {
        SortKey::Rating => items.sort_by(|a, b| descending(a.rating(), b.rating())),
        SortKey::Price => items.sort_by(|a, b| a.total_price().total_cmp(&b.total_price())),
        SortKey::Duration => items.sort_by(|a, b| {
            match (a.duration_minutes(), b.duration_minutes()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
        SortKey::Popularity | SortKey::ThemeMatch | SortKey::Convenience | SortKey::Location => {}
    }
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive substring search over an item's text fields.
///
/// A blank query returns every item.
pub fn search<'a, T: CatalogItem>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
