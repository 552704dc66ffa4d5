//! Trip request model
//!
//! The request is the single upstream input to every catalog. It is
//! replaced wholesale or patched field by field, and the difference between
//! the old and new request is what drives the cascade policy.

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default trip length in days.
pub const DEFAULT_DURATION_DAYS: u32 = 7;

/// Longest trip a request may describe, and the most itinerary days generated.
pub const MAX_DURATION_DAYS: u32 = 365;

/// Default budget; the price-scaling baseline.
pub const DEFAULT_BUDGET: f64 = 2000.0;

/// Traveller preferences used to filter the catalogs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub themes: Vec<String>,
    pub activity_types: Vec<String>,
    pub accommodation_types: Vec<String>,
    pub transport_preferences: Vec<String>,
}

/// A trip planning request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub destination: String,
    #[serde(default)]
    pub departure_city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: u32,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    pub budget: f64,
    #[serde(default)]
    pub preferences: Preferences,
}

fn default_adults() -> u32 {
    1
}

impl Default for TripRequest {
    fn default() -> Self {
        Self::starting_on(Local::now().date_naive())
    }
}

impl TripRequest {
    /// A default request for a trip starting on `start_date`.
    pub fn starting_on(start_date: NaiveDate) -> Self {
        let end_date = start_date
            .checked_add_days(Days::new(u64::from(DEFAULT_DURATION_DAYS)))
            .unwrap_or(start_date);
        Self {
            destination: String::new(),
            departure_city: String::new(),
            start_date,
            end_date,
            duration_days: DEFAULT_DURATION_DAYS,
            adults: 1,
            children: 0,
            budget: DEFAULT_BUDGET,
            preferences: Preferences::default(),
        }
    }

    /// Number of nights charged for accommodation
    pub fn total_nights(&self) -> u32 {
        self.duration_days
    }

    /// Total party size
    pub fn travellers(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Departure city for route labels, `Home` when unset.
    pub fn departure_label(&self) -> &str {
        match self.departure_city.trim() {
            "" => "Home",
            city => city,
        }
    }

    /// Apply an update, returning the request it produced.
    pub fn apply(&self, update: RequestUpdate) -> Self {
        match update {
            RequestUpdate::Replace(request) => request,
            RequestUpdate::Patch(patch) => {
                let mut next = self.clone();
                patch.apply_to(&mut next);
                next
            }
        }
    }

    /// Load a request from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read trip request from {:?}", path.as_ref()))?;

        let request: Self =
            serde_json::from_str(&content).context("Failed to parse trip request JSON")?;

        Ok(request)
    }

    /// Save the request to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize trip request")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write trip request to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Validate the request.
    ///
    /// The session accepts any request as-is; this is for request files and
    /// for the wizard before it saves a plan.
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            anyhow::bail!("Destination must be specified");
        }

        if self.adults < 1 {
            anyhow::bail!("At least one adult must travel");
        }

        if !self.budget.is_finite() || self.budget < 0.0 {
            anyhow::bail!("Budget must be a non-negative amount");
        }

        if self.duration_days < 1 || self.duration_days > MAX_DURATION_DAYS {
            anyhow::bail!(
                "Duration must be between 1 and {} days, got {}",
                MAX_DURATION_DAYS,
                self.duration_days
            );
        }

        if self.end_date < self.start_date {
            anyhow::bail!(
                "End date {} is before start date {}",
                self.end_date,
                self.start_date
            );
        }

        Ok(())
    }
}

/// Field-level patch of the preference lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferencesPatch {
    pub themes: Option<Vec<String>>,
    pub activity_types: Option<Vec<String>>,
    pub accommodation_types: Option<Vec<String>>,
    pub transport_preferences: Option<Vec<String>>,
}

/// Partial trip request. `None` fields keep the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestPatch {
    pub destination: Option<String>,
    pub departure_city: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<u32>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub budget: Option<f64>,
    pub preferences: Option<PreferencesPatch>,
}

impl RequestPatch {
    pub fn destination(value: impl Into<String>) -> Self {
        Self {
            destination: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn budget(value: f64) -> Self {
        Self {
            budget: Some(value),
            ..Self::default()
        }
    }

    pub fn duration_days(value: u32) -> Self {
        Self {
            duration_days: Some(value),
            ..Self::default()
        }
    }

    pub fn preferences(patch: PreferencesPatch) -> Self {
        Self {
            preferences: Some(patch),
            ..Self::default()
        }
    }

    fn apply_to(self, request: &mut TripRequest) {
        if let Some(v) = self.destination {
            request.destination = v;
        }
        if let Some(v) = self.departure_city {
            request.departure_city = v;
        }
        if let Some(v) = self.start_date {
            request.start_date = v;
        }
        if let Some(v) = self.end_date {
            request.end_date = v;
        }
        if let Some(v) = self.duration_days {
            request.duration_days = v;
        }
        if let Some(v) = self.adults {
            request.adults = v;
        }
        if let Some(v) = self.children {
            request.children = v;
        }
        if let Some(v) = self.budget {
            request.budget = v;
        }
        if let Some(prefs) = self.preferences {
            let target = &mut request.preferences;
            if let Some(v) = prefs.themes {
                target.themes = v;
            }
            if let Some(v) = prefs.activity_types {
                target.activity_types = v;
            }
            if let Some(v) = prefs.accommodation_types {
                target.accommodation_types = v;
            }
            if let Some(v) = prefs.transport_preferences {
                target.transport_preferences = v;
            }
        }
    }
}

/// An update to the session's request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestUpdate {
    /// Replace the request wholesale
    Replace(TripRequest),
    /// Merge the set fields into the current request
    Patch(RequestPatch),
}

impl From<RequestPatch> for RequestUpdate {
    fn from(patch: RequestPatch) -> Self {
        Self::Patch(patch)
    }
}

impl From<TripRequest> for RequestUpdate {
    fn from(request: TripRequest) -> Self {
        Self::Replace(request)
    }
}

/// Which request fields differ between two requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestChange {
    pub destination: bool,
    pub departure_city: bool,
    pub dates: bool,
    pub duration: bool,
    pub party: bool,
    pub budget: bool,
    pub themes: bool,
    pub activity_types: bool,
    pub accommodation_types: bool,
    pub transport_preferences: bool,
}

impl RequestChange {
    /// Field-by-field difference between `old` and `new`.
    pub fn between(old: &TripRequest, new: &TripRequest) -> Self {
        let (a, b) = (&old.preferences, &new.preferences);
        Self {
            destination: old.destination != new.destination,
            departure_city: old.departure_city != new.departure_city,
            dates: old.start_date != new.start_date || old.end_date != new.end_date,
            duration: old.duration_days != new.duration_days,
            party: old.adults != new.adults || old.children != new.children,
            // Bitwise so NaN budgets never register as a change on every update
            budget: old.budget.to_bits() != new.budget.to_bits(),
            themes: a.themes != b.themes,
            activity_types: a.activity_types != b.activity_types,
            accommodation_types: a.accommodation_types != b.accommodation_types,
            transport_preferences: a.transport_preferences != b.transport_preferences,
        }
    }

    /// Changes that invalidate every downstream catalog.
    pub fn is_major(&self) -> bool {
        self.destination
            || self.budget
            || self.duration
            || self.dates
            || self.themes
            || self.activity_types
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
