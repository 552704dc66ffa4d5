//! Finished trip plans
//!
//! A plan is a serializable snapshot of a session: the request, the
//! selected items, the itinerary and the cost summary.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cost::CostSummary;
use crate::itinerary::ItineraryDay;
use crate::request::TripRequest;
use crate::session::{CustomInputs, SelectedItems};

/// A snapshot of a planned trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub request: TripRequest,
    pub selections: SelectedItems,
    #[serde(default)]
    pub custom_inputs: CustomInputs,
    pub itinerary: Vec<ItineraryDay>,
    pub summary: CostSummary,
    /// Lower-cased theme of the trip, `general` when nothing better is known
    pub theme: String,
}

impl TripPlan {
    /// Plan id derived from the creation time
    pub fn make_id(created_at: &DateTime<Utc>) -> String {
        format!("plan-{}", created_at.timestamp_millis())
    }

    /// Load a plan from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read trip plan from {:?}", path.as_ref()))?;

        let plan: Self =
            serde_json::from_str(&content).context("Failed to parse trip plan JSON")?;

        Ok(plan)
    }

    /// Save the plan to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize trip plan")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write trip plan to {:?}", path.as_ref()))?;

        tracing::info!("Saved trip plan {} to {:?}", self.id, path.as_ref());
        Ok(())
    }
}
