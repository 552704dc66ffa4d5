//! Fixture-backed catalog
//!
//! Destination data is compiled in from `data/*.json`. A replacement
//! trip-planning file can be loaded at runtime; featured trips always come
//! from the embedded copy.

use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::CatalogProvider;
use super::model::{
    Accommodation, Activity, FeaturedTrip, ItineraryTemplateDay, JourneySegment,
    TransportDetails, TransportOption,
};
use crate::error::{PlannerError, Result};
use crate::request::{DEFAULT_BUDGET, TripRequest};
use crate::types::TransportKind;

const TRIP_PLANNING_DATA: &str = include_str!("../../data/trip-planning-data.json");
const FEATURED_TRIPS: &str = include_str!("../../data/featured-trips.json");

/// Bucket used when a destination normalizes to nothing.
pub const GENERAL_BUCKET: &str = "general";

static COUNTRY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*\w+$").unwrap());

/// Fixture key for a destination: `"Bali, Indonesia"` becomes `"bali"`.
pub fn normalize_destination(destination: &str) -> String {
    let lower = destination.trim().to_lowercase();
    let key: String = COUNTRY_SUFFIX
        .replace(&lower, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if key.is_empty() {
        GENERAL_BUCKET.to_string()
    } else {
        key
    }
}

/// Scale a fixture price with the budget, capped at twice the base price.
pub fn adjust_price_for_budget(base_price: f64, budget: f64) -> f64 {
    let multiplier = (budget / DEFAULT_BUDGET).min(2.0);
    (base_price * multiplier).round()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawActivity {
    id: String,
    name: String,
    description: String,
    #[serde(rename = "type")]
    kind: String,
    rating: f64,
    price: f64,
    duration: String,
    #[serde(default)]
    image: String,
    location: String,
    #[serde(default)]
    themes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAccommodation {
    id: String,
    name: String,
    description: String,
    #[serde(rename = "type")]
    kind: String,
    rating: f64,
    price_per_night: f64,
    location: String,
    #[serde(default)]
    distance_to_beach: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    themes: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TripPlanningData {
    activities: HashMap<String, Vec<RawActivity>>,
    accommodation: HashMap<String, Vec<RawAccommodation>>,
    transportation: HashMap<String, Vec<TransportOption>>,
    journey_segments: HashMap<String, Vec<JourneySegment>>,
    /// Per destination, then per journey segment id
    transport_options: HashMap<String, HashMap<String, Vec<TransportOption>>>,
    itinerary_templates: HashMap<String, Vec<ItineraryTemplateDay>>,
}

impl TripPlanningData {
    /// Reject destinations that list the same id twice in one category.
    fn check_unique_ids(&self) -> Result<()> {
        fn check<'a>(
            category: &str,
            map: impl Iterator<Item = (&'a String, Vec<&'a str>)>,
        ) -> Result<()> {
            for (destination, ids) in map {
                let mut seen = HashSet::new();
                for id in ids {
                    if !seen.insert(id) {
                        return Err(PlannerError::catalog(format!(
                            "duplicate {} id '{}' for destination '{}'",
                            category, id, destination
                        )));
                    }
                }
            }
            Ok(())
        }

        check(
            "activity",
            self.activities
                .iter()
                .map(|(d, v)| (d, v.iter().map(|a| a.id.as_str()).collect())),
        )?;
        check(
            "accommodation",
            self.accommodation
                .iter()
                .map(|(d, v)| (d, v.iter().map(|a| a.id.as_str()).collect())),
        )?;
        check(
            "journey segment",
            self.journey_segments
                .iter()
                .map(|(d, v)| (d, v.iter().map(|j| j.id.as_str()).collect())),
        )?;

        // Route-level and per-segment options share one transport catalog.
        let destinations: BTreeSet<&String> = self
            .transportation
            .keys()
            .chain(self.transport_options.keys())
            .collect();
        check(
            "transportation",
            destinations
                .into_iter()
                .map(|d| (d, self.transport_ids(d))),
        )
    }

    fn transport_ids(&self, destination: &str) -> Vec<&str> {
        let routes = self.transportation.get(destination).into_iter().flatten();
        let legs = self
            .transport_options
            .get(destination)
            .into_iter()
            .flat_map(|by_segment| by_segment.values().flatten());
        routes.chain(legs).map(|t| t.id.as_str()).collect()
    }
}

/// Catalog provider over static JSON fixtures
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    data: TripPlanningData,
    featured: Vec<FeaturedTrip>,
}

impl FixtureCatalog {
    /// Catalog over the compiled-in fixtures
    pub fn embedded() -> Result<Self> {
        Self::from_json(TRIP_PLANNING_DATA, FEATURED_TRIPS)
    }

    /// Parse trip-planning data and featured trips from JSON text.
    pub fn from_json(trip_planning_data: &str, featured_trips: &str) -> Result<Self> {
        let data: TripPlanningData = serde_json::from_str(trip_planning_data)?;
        data.check_unique_ids()?;
        let featured: Vec<FeaturedTrip> = serde_json::from_str(featured_trips)?;

        tracing::debug!(
            destinations = data.activities.len(),
            featured = featured.len(),
            "Loaded catalog fixtures"
        );

        Ok(Self { data, featured })
    }

    /// Load trip-planning data from a file, keeping the embedded featured trips.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PlannerError::catalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        tracing::info!("Loading catalog fixtures from {}", path.display());
        Self::from_json(&content, FEATURED_TRIPS)
    }

    /// Destination keys that have dedicated fixture data, sorted.
    pub fn destinations(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.data.activities.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    fn lookup<'a, T>(map: &'a HashMap<String, Vec<T>>, request: &TripRequest) -> &'a [T] {
        map.get(&normalize_destination(&request.destination))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl CatalogProvider for FixtureCatalog {
    fn activities(&self, request: &TripRequest) -> Vec<Activity> {
        let fixture = Self::lookup(&self.data.activities, request);
        if !fixture.is_empty() {
            return fixture
                .iter()
                .map(|raw| Activity {
                    id: raw.id.clone(),
                    name: raw.name.clone(),
                    description: raw.description.clone(),
                    kind: raw.kind.clone(),
                    rating: raw.rating,
                    price: adjust_price_for_budget(raw.price, request.budget),
                    duration: raw.duration.clone(),
                    date: request.start_date,
                    image: raw.image.clone(),
                    location: raw.location.clone(),
                    theme: first_theme(&raw.themes),
                })
                .collect();
        }

        if let Some(trip) = self.featured_trip_for(request) {
            tracing::debug!(trip = %trip.name, "Activities from featured trip");
            return featured_activities(trip, request);
        }

        default_activities(request)
    }

    fn accommodation(&self, request: &TripRequest) -> Vec<Accommodation> {
        let nights = request.total_nights();
        let fixture = Self::lookup(&self.data.accommodation, request);
        if !fixture.is_empty() {
            return fixture
                .iter()
                .map(|raw| Accommodation {
                    id: raw.id.clone(),
                    name: raw.name.clone(),
                    description: raw.description.clone(),
                    kind: raw.kind.clone(),
                    rating: raw.rating,
                    price_per_night: adjust_price_for_budget(raw.price_per_night, request.budget),
                    location: raw.location.clone(),
                    distance_to_beach: raw.distance_to_beach.clone(),
                    image: raw.image.clone(),
                    theme: first_theme(&raw.themes),
                    total_nights: nights,
                })
                .collect();
        }

        if let Some(trip) = self.featured_trip_for(request) {
            tracing::debug!(trip = %trip.name, "Accommodation from featured trip");
            return featured_accommodation(trip, request);
        }

        default_accommodation(request)
    }

    fn transportation(&self, request: &TripRequest) -> Vec<TransportOption> {
        let fixture = Self::lookup(&self.data.transportation, request);
        if !fixture.is_empty() {
            return fixture
                .iter()
                .map(|t| TransportOption {
                    price: adjust_price_for_budget(t.price, request.budget),
                    ..t.clone()
                })
                .collect();
        }

        default_transportation(request)
    }

    fn journey_segments(&self, request: &TripRequest) -> Vec<JourneySegment> {
        let fixture = Self::lookup(&self.data.journey_segments, request);
        if !fixture.is_empty() {
            return fixture
                .iter()
                .map(|segment| segment.clone().for_request(request))
                .collect();
        }

        default_journey_segments(request)
    }

    fn segment_options(&self, request: &TripRequest, segment_id: &str) -> Vec<TransportOption> {
        let fixture = self
            .data
            .transport_options
            .get(&normalize_destination(&request.destination))
            .and_then(|by_segment| by_segment.get(segment_id))
            .filter(|options| !options.is_empty());

        let options = match fixture {
            Some(options) => options
                .iter()
                .map(|t| TransportOption {
                    price: adjust_price_for_budget(t.price, request.budget),
                    ..t.clone()
                })
                .collect(),
            None => default_segment_options(request, segment_id),
        };

        options
            .into_iter()
            .map(|t| TransportOption {
                segment: Some(segment_id.to_string()),
                ..t
            })
            .collect()
    }

    fn itinerary_template(&self, request: &TripRequest) -> Vec<ItineraryTemplateDay> {
        Self::lookup(&self.data.itinerary_templates, request).to_vec()
    }

    fn featured_trips(&self) -> &[FeaturedTrip] {
        &self.featured
    }
}

fn first_theme(themes: &[String]) -> String {
    themes
        .first()
        .cloned()
        .unwrap_or_else(|| GENERAL_BUCKET.to_string())
}

/// Type, base price and duration of a featured-trip activity name.
fn featured_activity_profile(name: &str) -> (&'static str, f64, &'static str) {
    match name {
        "Surfing" => ("watersports", 45.0, "4 hours"),
        "Snorkeling" => ("watersports", 35.0, "3 hours"),
        "Yoga" => ("wellness", 25.0, "1 hour"),
        "Temple Visits" => ("culture", 15.0, "2 hours"),
        "Shopping" => ("leisure", 0.0, "3 hours"),
        "Sushi Making" => ("culture", 60.0, "2 hours"),
        "Cherry Blossom Viewing" => ("nature", 20.0, "2 hours"),
        "Sunset Viewing" => ("leisure", 30.0, "1 hour"),
        "Wine Tasting" => ("culture", 50.0, "3 hours"),
        "Beach Hopping" => ("beach", 25.0, "6 hours"),
        "Photography" => ("leisure", 40.0, "4 hours"),
        "Wildlife Spotting" => ("nature", 55.0, "6 hours"),
        "Zip-lining" => ("adventure", 80.0, "2 hours"),
        "Volcano Hiking" => ("adventure", 70.0, "8 hours"),
        "Coffee Tour" => ("culture", 35.0, "2 hours"),
        "Northern Lights" => ("nature", 100.0, "4 hours"),
        "Glacier Hiking" => ("adventure", 120.0, "6 hours"),
        "Blue Lagoon" => ("wellness", 90.0, "3 hours"),
        "Geyser Watching" => ("nature", 60.0, "2 hours"),
        "Camel Trekking" => ("adventure", 75.0, "4 hours"),
        "Desert Camping" => ("adventure", 100.0, "12 hours"),
        "Souk Shopping" => ("leisure", 0.0, "3 hours"),
        "Atlas Mountains" => ("nature", 80.0, "8 hours"),
        "Hiking" => ("adventure", 40.0, "4 hours"),
        "Bungee Jumping" => ("adventure", 150.0, "1 hour"),
        "Milford Sound" => ("nature", 85.0, "4 hours"),
        "Burj Khalifa" => ("leisure", 50.0, "2 hours"),
        "Desert Safari" => ("adventure", 90.0, "6 hours"),
        "Luxury Dining" => ("culture", 120.0, "2 hours"),
        "Palm Jumeirah" => ("leisure", 60.0, "4 hours"),
        "Gold Souk" => ("culture", 0.0, "2 hours"),
        _ => (GENERAL_BUCKET, 30.0, "2 hours"),
    }
}

fn featured_activities(trip: &FeaturedTrip, request: &TripRequest) -> Vec<Activity> {
    trip.activities
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let (kind, base_price, duration) = featured_activity_profile(name);
            Activity {
                id: format!("trip-{}-{}", trip.id, index + 1),
                name: name.clone(),
                description: format!("Experience {} in {}", name.to_lowercase(), trip.location),
                kind: kind.to_string(),
                rating: trip.rating_value(),
                price: adjust_price_for_budget(base_price, request.budget),
                duration: duration.to_string(),
                date: request.start_date,
                image: format!("https://picsum.photos/400/300?random={}-{}", trip.id, index),
                location: trip.location.clone(),
                theme: trip.primary_theme(GENERAL_BUCKET),
            }
        })
        .collect()
}

fn featured_accommodation(trip: &FeaturedTrip, request: &TripRequest) -> Vec<Accommodation> {
    let nights = request.total_nights();
    let (_, max_spend) = trip.budget_range();
    let avg_per_night = max_spend / f64::from(nights.max(1));
    let rating = trip.rating_value();

    vec![
        Accommodation {
            id: format!("trip-{}-acc-1", trip.id),
            name: format!("{} Resort", trip.name),
            description: format!("Premium accommodation in {}", trip.location),
            kind: "resort".into(),
            rating,
            price_per_night: adjust_price_for_budget((avg_per_night * 0.6).round(), request.budget),
            location: trip.location.clone(),
            distance_to_beach: "Beachfront".into(),
            image: trip.image.clone(),
            theme: trip.primary_theme("luxury"),
            total_nights: nights,
        },
        Accommodation {
            id: format!("trip-{}-acc-2", trip.id),
            name: format!("{} Hotel", trip.name),
            description: format!("Comfortable hotel in {}", trip.location),
            kind: "hotel".into(),
            rating: rating - 0.5,
            price_per_night: adjust_price_for_budget((avg_per_night * 0.4).round(), request.budget),
            location: trip.location.clone(),
            distance_to_beach: "2km to beach".into(),
            image: format!("https://picsum.photos/400/300?random={}-hotel", trip.id),
            theme: trip.primary_theme("comfort"),
            total_nights: nights,
        },
    ]
}

fn default_activities(request: &TripRequest) -> Vec<Activity> {
    let make = |id: &str,
                name: &str,
                description: &str,
                kind: &str,
                rating: f64,
                price: f64,
                duration: &str,
                location: &str,
                theme: &str| Activity {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        kind: kind.into(),
        rating,
        price: adjust_price_for_budget(price, request.budget),
        duration: duration.into(),
        date: request.start_date,
        image: format!("https://picsum.photos/400/300?random={}", kind),
        location: location.into(),
        theme: theme.into(),
    };

    vec![
        make(
            "default-1",
            "Beach Club",
            "Relax at a luxury beach club with stunning ocean views",
            "beach",
            4.8,
            45.0,
            "4 hours",
            "Coastal Area",
            "tropical",
        ),
        make(
            "default-2",
            "Cultural Tour",
            "Explore local culture and historical sites",
            "culture",
            4.6,
            25.0,
            "3 hours",
            "City Center",
            "cultural",
        ),
        make(
            "default-3",
            "Adventure Activity",
            "Exciting outdoor adventure experience",
            "adventure",
            4.9,
            65.0,
            "8 hours",
            "Mountain Area",
            "adventure",
        ),
    ]
}

fn default_accommodation(request: &TripRequest) -> Vec<Accommodation> {
    let nights = request.total_nights();
    vec![
        Accommodation {
            id: "default-1".into(),
            name: "Luxury Resort".into(),
            description: "5-star beachfront resort with all amenities".into(),
            kind: "resort".into(),
            rating: 5.0,
            price_per_night: adjust_price_for_budget(180.0, request.budget),
            location: "Beachfront".into(),
            distance_to_beach: "Beachfront".into(),
            image: "https://picsum.photos/400/300?random=resort".into(),
            theme: "luxury".into(),
            total_nights: nights,
        },
        Accommodation {
            id: "default-2".into(),
            name: "Boutique Hotel".into(),
            description: "Charming boutique hotel in city center".into(),
            kind: "hotel".into(),
            rating: 4.7,
            price_per_night: adjust_price_for_budget(120.0, request.budget),
            location: "City Center".into(),
            distance_to_beach: "5km to beach".into(),
            image: "https://picsum.photos/400/300?random=boutique".into(),
            theme: "boutique".into(),
            total_nights: nights,
        },
    ]
}

fn default_transportation(request: &TripRequest) -> Vec<TransportOption> {
    let from = request.departure_city.clone();
    let destination = &request.destination;
    let airport = format!("{} (Airport)", destination);
    let flight = |airline: &str, stops: u32| {
        Some(TransportDetails {
            airline: Some(airline.into()),
            stops: Some(stops),
            class: Some("Economy".into()),
        })
    };

    vec![
        TransportOption {
            id: "default-1".into(),
            kind: TransportKind::Flight,
            name: "Direct Flight".into(),
            description: format!("Direct flight from {} to {}", from, destination),
            duration: "12h 30m".into(),
            price: adjust_price_for_budget(850.0, request.budget),
            from: from.clone(),
            to: airport.clone(),
            details: flight("Major Airline", 0),
            segment: None,
        },
        TransportOption {
            id: "default-2".into(),
            kind: TransportKind::Flight,
            name: "Connecting Flight".into(),
            description: format!("Flight with one stop to {}", destination),
            duration: "16h 45m".into(),
            price: adjust_price_for_budget(720.0, request.budget),
            from,
            to: airport,
            details: flight("Budget Airline", 1),
            segment: None,
        },
        TransportOption {
            id: "default-3".into(),
            kind: TransportKind::LocalTransport,
            name: "Car Rental".into(),
            description: "Daily car rental for local transportation".into(),
            duration: "24 hours".into(),
            price: adjust_price_for_budget(35.0, request.budget),
            from: "Airport".into(),
            to: "Various".into(),
            details: None,
            segment: None,
        },
        TransportOption {
            id: "default-4".into(),
            kind: TransportKind::LocalTransport,
            name: "Airport Transfer".into(),
            description: "Private airport transfer service".into(),
            duration: "1 hour".into(),
            price: adjust_price_for_budget(25.0, request.budget),
            from: "Airport".into(),
            to: "Hotel".into(),
            details: None,
            segment: None,
        },
    ]
}

fn default_journey_segments(request: &TripRequest) -> Vec<JourneySegment> {
    let home = request.departure_label();
    let destination = &request.destination;
    let long_haul = vec![
        TransportKind::Flight,
        TransportKind::Boat,
        TransportKind::Train,
        TransportKind::Drive,
        TransportKind::Bus,
    ];

    vec![
        JourneySegment {
            id: "outbound".into(),
            title: "Outbound Journey".into(),
            route: format!("{} → {}", home, destination),
            description: "International travel to your destination".into(),
            transport_types: long_haul.clone(),
        },
        JourneySegment {
            id: "local".into(),
            title: "Local Transport".into(),
            route: format!("Within {}", destination),
            description: "Getting around during your stay".into(),
            transport_types: vec![TransportKind::LocalTransport, TransportKind::Rental],
        },
        JourneySegment {
            id: "intercity".into(),
            title: "Inter-city Travel".into(),
            route: "Various locations".into(),
            description: "Travel between different areas".into(),
            transport_types: vec![
                TransportKind::LocalTransport,
                TransportKind::Rental,
                TransportKind::Bus,
            ],
        },
        JourneySegment {
            id: "return".into(),
            title: "Return Journey".into(),
            route: format!("{} → {}", destination, home),
            description: "International travel back home".into(),
            transport_types: long_haul,
        },
    ]
}

/// Generic option for one of the default segment ids; other ids get none.
fn default_segment_options(request: &TripRequest, segment_id: &str) -> Vec<TransportOption> {
    let home = request.departure_label().to_string();
    let destination = request.destination.clone();
    let option = |id: &str,
                  kind: TransportKind,
                  name: &str,
                  description: String,
                  duration: &str,
                  price: f64| TransportOption {
        id: id.into(),
        kind,
        name: name.into(),
        description,
        duration: duration.into(),
        price: adjust_price_for_budget(price, request.budget),
        from: String::new(),
        to: String::new(),
        details: None,
        segment: None,
    };
    let economy = Some(TransportDetails {
        airline: Some("Major Airline".into()),
        stops: Some(0),
        class: Some("Economy".into()),
    });

    match segment_id {
        "outbound" => vec![TransportOption {
            from: home.clone(),
            to: destination.clone(),
            details: economy,
            ..option(
                "default-outbound-1",
                TransportKind::Flight,
                "Direct Flight",
                format!("Direct flight from {} to {}", home, destination),
                "12h 30m",
                450.0,
            )
        }],
        "local" => vec![TransportOption {
            from: destination.clone(),
            to: "Various".into(),
            ..option(
                "default-local-1",
                TransportKind::LocalTransport,
                "Local Transport",
                "Local transportation options".into(),
                "Daily",
                25.0,
            )
        }],
        "intercity" => vec![TransportOption {
            from: "Various".into(),
            to: "Various".into(),
            ..option(
                "default-intercity-1",
                TransportKind::LocalTransport,
                "Inter-city Transport",
                "Transport between different areas".into(),
                "2-3 hours",
                35.0,
            )
        }],
        "return" => vec![TransportOption {
            from: destination.clone(),
            to: home.clone(),
            details: economy,
            ..option(
                "default-return-1",
                TransportKind::Flight,
                "Return Flight",
                format!("Return flight from {} to {}", destination, home),
                "12h 30m",
                450.0,
            )
        }],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(destination: &str, budget: f64) -> TripRequest {
        let mut req = TripRequest::starting_on(NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
        req.destination = destination.into();
        req.departure_city = "Amsterdam".into();
        req.budget = budget;
        req
    }

    #[test]
    fn test_normalize_destination() {
        assert_eq!(normalize_destination("Bali, Indonesia"), "bali");
        assert_eq!(normalize_destination("New York"), "newyork");
        assert_eq!(normalize_destination("  "), "general");
        assert_eq!(normalize_destination("TOKYO , Japan"), "tokyo");
        assert_eq!(normalize_destination("Santorini"), "santorini");
    }

    #[test]
    fn test_adjust_price_for_budget() {
        assert_eq!(adjust_price_for_budget(100.0, 2000.0), 100.0);
        assert_eq!(adjust_price_for_budget(100.0, 4000.0), 200.0);
        assert_eq!(adjust_price_for_budget(100.0, 500.0), 25.0);
        assert_eq!(adjust_price_for_budget(100.0, 10000.0), 200.0);
        assert_eq!(adjust_price_for_budget(45.0, 0.0), 0.0);
    }

    #[test]
    fn test_embedded_fixtures_parse() {
        let catalog = FixtureCatalog::embedded().unwrap();
        assert!(catalog.destinations().contains(&"bali"));
        assert!(!catalog.featured_trips().is_empty());
    }

    #[test]
    fn test_destination_fixture_is_scaled() {
        let catalog = FixtureCatalog::embedded().unwrap();
        let base = catalog.activities(&request("Bali, Indonesia", 2000.0));
        let double = catalog.activities(&request("Bali, Indonesia", 4000.0));
        assert!(!base.is_empty());
        assert!(base.iter().all(|a| a.id.starts_with("bali-")));
        for (a, b) in base.iter().zip(&double) {
            assert_eq!(b.price, (a.price * 2.0).round());
        }
    }

    #[test]
    fn test_unknown_destination_uses_defaults() {
        let catalog = FixtureCatalog::embedded().unwrap();
        let req = request("Atlantis", 2000.0);

        let activities = catalog.activities(&req);
        assert_eq!(activities.len(), 3);
        assert_eq!(activities[0].name, "Beach Club");
        assert_eq!(activities[0].price, 45.0);

        let stays = catalog.accommodation(&req);
        assert_eq!(stays.len(), 2);
        assert_eq!(stays[1].price_per_night, 120.0);
        assert_eq!(stays[1].total_nights, 7);

        let transport = catalog.transportation(&req);
        assert_eq!(transport.len(), 4);
        assert_eq!(transport[0].from, "Amsterdam");
        assert_eq!(transport[0].to, "Atlantis (Airport)");
        assert_eq!(transport[2].kind, TransportKind::LocalTransport);
        assert!(catalog.itinerary_template(&req).is_empty());
    }

    #[test]
    fn test_featured_trip_fallback() {
        let catalog = FixtureCatalog::embedded().unwrap();
        let req = request("Iceland", 2000.0);
        let trip = catalog.featured_trip_for(&req).unwrap().clone();

        let activities = catalog.activities(&req);
        assert_eq!(activities.len(), trip.activities.len());
        assert_eq!(activities[0].id, format!("trip-{}-1", trip.id));
        assert_eq!(activities[0].location, trip.location);

        let stays = catalog.accommodation(&req);
        assert_eq!(stays.len(), 2);
        assert_eq!(stays[0].kind, "resort");
        assert_eq!(stays[1].rating, trip.rating_value() - 0.5);
        let (_, max) = trip.budget_range();
        assert_eq!(stays[0].price_per_night, (max / 7.0 * 0.6).round());

        // Transport has no featured fallback
        assert_eq!(catalog.transportation(&req)[0].id, "default-1");
    }

    #[test]
    fn test_default_journey_segments() {
        let catalog = FixtureCatalog::embedded().unwrap();
        let req = request("Atlantis", 1000.0);

        let segments = catalog.journey_segments(&req);
        let ids: Vec<&str> = segments.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["outbound", "local", "intercity", "return"]);
        assert_eq!(segments[0].route, "Amsterdam → Atlantis");
        assert_eq!(segments[3].route, "Atlantis → Amsterdam");

        let outbound = catalog.segment_options(&req, "outbound");
        assert_eq!(outbound.len(), 1);
        assert_eq!(outbound[0].id, "default-outbound-1");
        assert_eq!(outbound[0].price, 225.0);
        assert_eq!(outbound[0].segment.as_deref(), Some("outbound"));
        assert!(catalog.segment_options(&req, "ferry").is_empty());
    }

    #[test]
    fn test_fixture_segments_fall_back_per_segment() {
        let catalog = FixtureCatalog::embedded().unwrap();
        let req = request("Bali, Indonesia", 4000.0);

        let segments = catalog.journey_segments(&req);
        assert_eq!(segments[0].route, "Amsterdam → Bali, Indonesia");
        assert_eq!(segments[2].transport_types, vec![TransportKind::Boat]);

        let local = catalog.segment_options(&req, "local");
        assert_eq!(local[0].id, "bali-local-1");
        assert_eq!(local[0].price, 30.0);
        assert_eq!(local[0].kind, TransportKind::Rental);
        // No fixture for the outbound leg
        assert_eq!(catalog.segment_options(&req, "outbound")[0].id, "default-outbound-1");
    }

    #[test]
    fn test_transport_catalog_appends_segment_options() {
        let catalog = FixtureCatalog::embedded().unwrap();
        let req = request("Atlantis", 2000.0);
        let ids: Vec<String> = catalog
            .transport_catalog(&req)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "default-1",
                "default-2",
                "default-3",
                "default-4",
                "default-outbound-1",
                "default-local-1",
                "default-intercity-1",
                "default-return-1",
            ]
        );
    }

    #[test]
    fn test_segment_option_ids_must_not_repeat_routes() {
        let data = r#"{
            "transportation": {
                "x": [
                    {"id": "t1", "type": "flight", "name": "A", "description": "",
                     "duration": "2 hours", "price": 100, "from": "A", "to": "B"}
                ]
            },
            "transportOptions": {
                "x": {
                    "local": [
                        {"id": "t1", "type": "bus", "name": "B", "description": "",
                         "duration": "1 hour", "price": 5, "from": "B", "to": "C"}
                    ]
                }
            }
        }"#;
        let err = FixtureCatalog::from_json(data, "[]").unwrap_err();
        assert!(matches!(err, PlannerError::Catalog(_)));
    }

    #[test]
    fn test_featured_activity_profile() {
        assert_eq!(featured_activity_profile("Surfing"), ("watersports", 45.0, "4 hours"));
        assert_eq!(featured_activity_profile("Northern Lights").1, 100.0);
        assert_eq!(featured_activity_profile("Knitting"), ("general", 30.0, "2 hours"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let data = r#"{
            "activities": {
                "x": [
                    {"id": "a", "name": "A", "description": "", "type": "beach",
                     "rating": 4.0, "price": 10, "duration": "1 hour", "location": "L"},
                    {"id": "a", "name": "B", "description": "", "type": "beach",
                     "rating": 4.0, "price": 10, "duration": "1 hour", "location": "L"}
                ]
            }
        }"#;
        let err = FixtureCatalog::from_json(data, "[]").unwrap_err();
        assert!(matches!(err, PlannerError::Catalog(_)));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = FixtureCatalog::from_path("/nonexistent/trip-data.json").unwrap_err();
        assert!(matches!(err, PlannerError::Catalog(_)));
    }
}
