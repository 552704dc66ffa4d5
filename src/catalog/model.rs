//! Catalog records handed to the wizard steps.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::request::TripRequest;
use crate::types::TransportKind;

/// A number, an optional range upper bound, then the unit's first letter.
static DURATION_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:-\s*\d+\s*)?([hmd])").unwrap());

/// Common view over the three catalog record types, used by filtering,
/// sorting, search and cost aggregation.
pub trait CatalogItem {
    fn id(&self) -> &str;

    /// Fixture `type` string (e.g. `beach`, `villa`, `flight`).
    fn kind(&self) -> &str;

    fn rating(&self) -> Option<f64>;

    /// Price the traveller pays for this item over the whole trip.
    fn total_price(&self) -> f64;

    /// Duration in minutes, when the free-form duration text can be read.
    fn duration_minutes(&self) -> Option<u32> {
        None
    }

    /// Text fields matched by free-text search.
    fn search_fields(&self) -> Vec<&str>;
}

/// A bookable activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f64,
    pub price: f64,
    pub duration: String,
    pub date: NaiveDate,
    pub image: String,
    pub location: String,
    pub theme: String,
}

impl CatalogItem for Activity {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }

    fn total_price(&self) -> f64 {
        self.price
    }

    fn duration_minutes(&self) -> Option<u32> {
        parse_duration_minutes(&self.duration)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.kind.as_str(),
            self.location.as_str(),
        ]
    }
}

/// A place to stay, priced per night
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f64,
    pub price_per_night: f64,
    pub location: String,
    pub distance_to_beach: String,
    pub image: String,
    pub theme: String,
    pub total_nights: u32,
}

impl CatalogItem for Accommodation {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }

    fn total_price(&self) -> f64 {
        self.price_per_night * f64::from(self.total_nights)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.kind.as_str(),
            self.location.as_str(),
        ]
    }
}

/// Carrier details for flights
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// A way of getting there or getting around
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOption {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransportKind,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub price: f64,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<TransportDetails>,
    /// Journey segment id, for options offered per leg of the trip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

impl CatalogItem for TransportOption {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &str {
        self.kind.as_str()
    }

    fn rating(&self) -> Option<f64> {
        None
    }

    fn total_price(&self) -> f64 {
        self.price
    }

    fn duration_minutes(&self) -> Option<u32> {
        parse_duration_minutes(&self.duration)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.kind.as_str(),
            self.from.as_str(),
            self.to.as_str(),
        ]
    }
}

/// One leg of the journey that needs its own transport: outbound, local,
/// intercity or return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneySegment {
    pub id: String,
    pub title: String,
    /// Route label. Fixture routes may contain `{departure}` and `{destination}`.
    pub route: String,
    pub description: String,
    #[serde(default)]
    pub transport_types: Vec<TransportKind>,
}

impl JourneySegment {
    /// Fill the route placeholders from the request.
    pub fn for_request(mut self, request: &TripRequest) -> Self {
        self.route = self
            .route
            .replace("{departure}", request.departure_label())
            .replace("{destination}", &request.destination);
        self
    }
}

/// A curated trip shown on the home screen, also used as a catalog fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedTrip {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub image: String,
    pub types: Vec<String>,
    /// Rating as published, e.g. `"4.8"`.
    pub rating: String,
    pub activities: Vec<String>,
    /// Budget band label, e.g. `"Mid-range ($$)"`.
    pub budget: String,
    pub itinerary: Vec<String>,
}

impl FeaturedTrip {
    pub fn rating_value(&self) -> f64 {
        self.rating.trim().parse().unwrap_or(0.0)
    }

    /// Lower-cased first trip type, or `fallback`.
    pub fn primary_theme(&self, fallback: &str) -> String {
        self.types
            .first()
            .map(|t| t.to_lowercase())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Min/max spend of the budget band label.
    pub fn budget_range(&self) -> (f64, f64) {
        match self.budget.as_str() {
            "Budget ($)" => (500.0, 1500.0),
            "Mid-range ($$)" => (1500.0, 4000.0),
            "High-end ($$$)" => (4000.0, 8000.0),
            "Luxury ($$$$)" => (8000.0, 20000.0),
            _ => (1000.0, 5000.0),
        }
    }

    pub fn matches_destination(&self, destination: &str) -> bool {
        let needle = destination.trim().to_lowercase();
        !needle.is_empty()
            && (self.location.to_lowercase().contains(&needle)
                || self.name.to_lowercase().contains(&needle))
    }
}

/// One day of a destination's itinerary template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryTemplateDay {
    pub title: String,
    pub notes: String,
}

/// Read free-form durations like `"4 hours"`, `"12h 30m"`, `"45 minutes"`.
///
/// Ranges (`"2-3 hours"`) use the lower bound. Text without a number, or a
/// total that does not fit in `u32`, yields `None`.
pub fn parse_duration_minutes(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    let mut total: Option<u32> = None;

    for part in DURATION_PART.captures_iter(&lower) {
        let value: u32 = part[1].parse().ok()?;
        let minutes = match &part[2] {
            "h" => value.checked_mul(60)?,
            "d" => value.checked_mul(24 * 60)?,
            _ => value,
        };
        total = Some(total.unwrap_or(0).checked_add(minutes)?);
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration_minutes("4 hours"), Some(240));
        assert_eq!(parse_duration_minutes("12h 30m"), Some(750));
        assert_eq!(parse_duration_minutes("45 minutes"), Some(45));
        assert_eq!(parse_duration_minutes("2-3 hours"), Some(120));
        assert_eq!(parse_duration_minutes("24 hours"), Some(1440));
        assert_eq!(parse_duration_minutes("Daily"), None);
        assert_eq!(parse_duration_minutes("1 day"), Some(1440));
    }

    #[test]
    fn test_parse_duration_overflow_is_unreadable() {
        assert_eq!(parse_duration_minutes("99999999 hours"), None);
        assert_eq!(parse_duration_minutes("9999999 days"), None);
        assert_eq!(parse_duration_minutes("4294967295 minutes"), Some(u32::MAX));
        assert_eq!(parse_duration_minutes("4294967295 minutes 1 minute"), None);
        assert_eq!(parse_duration_minutes("99999999999 minutes"), None);
    }

    #[test]
    fn test_segment_route_placeholders() {
        let mut request = TripRequest::starting_on(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        request.destination = "Bali, Indonesia".into();
        request.departure_city = "Lisbon".into();

        let segment = JourneySegment {
            id: "outbound".into(),
            title: "Outbound Journey".into(),
            route: "{departure} → {destination}".into(),
            description: String::new(),
            transport_types: vec![TransportKind::Flight],
        };
        assert_eq!(segment.for_request(&request).route, "Lisbon → Bali, Indonesia");
    }

    #[test]
    fn test_accommodation_total_price() {
        let stay = Accommodation {
            id: "default-2".into(),
            name: "Boutique Hotel".into(),
            description: String::new(),
            kind: "hotel".into(),
            rating: 4.7,
            price_per_night: 120.0,
            location: "City Center".into(),
            distance_to_beach: "5km to beach".into(),
            image: String::new(),
            theme: "boutique".into(),
            total_nights: 7,
        };
        assert_eq!(stay.total_price(), 840.0);
    }

    #[test]
    fn test_transport_kind_text() {
        let t = TransportOption {
            id: "x".into(),
            kind: TransportKind::LocalTransport,
            name: "Car Rental".into(),
            description: String::new(),
            duration: "24 hours".into(),
            price: 35.0,
            from: "Airport".into(),
            to: "Various".into(),
            details: None,
            segment: None,
        };
        assert_eq!(t.kind(), "local_transport");
        assert_eq!(t.rating(), None);
    }

    #[test]
    fn test_featured_trip_helpers() {
        let trip = FeaturedTrip {
            id: 4,
            name: "Northern Lights Escape".into(),
            location: "Reykjavik, Iceland".into(),
            image: String::new(),
            types: vec!["Journey".into()],
            rating: "4.9".into(),
            activities: vec![],
            budget: "High-end ($$$)".into(),
            itinerary: vec![],
        };
        assert_eq!(trip.rating_value(), 4.9);
        assert_eq!(trip.primary_theme("general"), "journey");
        assert_eq!(trip.budget_range(), (4000.0, 8000.0));
        assert!(trip.matches_destination("iceland"));
        assert!(!trip.matches_destination(""));
    }
}
