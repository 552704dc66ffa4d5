//! Holiday Planner Library
//!
//! Core of a terminal trip planner: a trip request drives three derived
//! catalogs (activities, accommodation, transportation), the user selects
//! items from each, and changes upstream clear the selections downstream.
//! The interactive front end lives in `app` and `ui`.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod cost;
pub mod currency;
pub mod error;
pub mod input;
pub mod itinerary;
pub mod plan;
pub mod policy;
pub mod refresh;
pub mod request;
pub mod session;
pub mod theme;
pub mod types;
pub mod ui;
pub mod wizard;

// Re-export main types for convenience
pub use catalog::{
    Accommodation, Activity, CatalogItem, CatalogProvider, CatalogQuery, FeaturedTrip,
    FixtureCatalog, JourneySegment, TransportOption, adjust_price_for_budget,
    normalize_destination,
};
pub use config::PlannerConfig;
pub use cost::CostSummary;
pub use currency::Currency;
pub use error::PlannerError;
pub use itinerary::ItineraryDay;
pub use plan::TripPlan;
pub use policy::{CascadePolicy, Invalidation, RefreshTimings, Trigger};
pub use refresh::{Clock, ManualClock, RefreshFlags, SystemClock};
pub use request::{PreferencesPatch, RequestPatch, RequestUpdate, TripRequest};
pub use session::{PlannerSession, SelectedItems, Selections};
pub use types::{SortKey, Step, StepSet, TransportKind};
pub use wizard::WizardStep;
