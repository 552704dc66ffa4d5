//! Planner configuration file
//!
//! A JSON file with refresh timings, the display currency, an optional
//! replacement fixture file and defaults for new trip requests. Every field
//! is optional; a missing file means the built-in defaults.

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::FixtureCatalog;
use crate::currency::Currency;
use crate::policy::{MAX_REFRESH_MS, RefreshTimings};
use crate::request::{DEFAULT_BUDGET, DEFAULT_DURATION_DAYS, MAX_DURATION_DAYS, TripRequest};

/// Values used for fresh trip requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestDefaults {
    pub departure_city: String,
    pub duration_days: u32,
    pub adults: u32,
    pub budget: f64,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            departure_city: String::new(),
            duration_days: DEFAULT_DURATION_DAYS,
            adults: 1,
            budget: DEFAULT_BUDGET,
        }
    }
}

/// Planner configuration that can be saved/loaded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerConfig {
    /// Display currency; the locale decides when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    pub refresh: RefreshTimings,
    /// Trip-planning data to use instead of the built-in fixtures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_file: Option<PathBuf>,
    pub defaults: RequestDefaults,
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, ms) in self.refresh.entries() {
            if ms > MAX_REFRESH_MS {
                anyhow::bail!(
                    "Refresh timing {} is {}ms; the maximum is {}ms",
                    name,
                    ms,
                    MAX_REFRESH_MS
                );
            }
        }

        let d = &self.defaults;
        if d.adults < 1 {
            anyhow::bail!("Default adults must be at least 1");
        }
        if !d.budget.is_finite() || d.budget < 0.0 {
            anyhow::bail!("Default budget must be a non-negative amount");
        }
        if d.duration_days < 1 || d.duration_days > MAX_DURATION_DAYS {
            anyhow::bail!(
                "Default duration must be between 1 and {} days",
                MAX_DURATION_DAYS
            );
        }

        if let Some(path) = &self.fixture_file
            && path.as_os_str().is_empty()
        {
            anyhow::bail!("Fixture file path is empty");
        }

        Ok(())
    }

    /// Currency to display: the command line, then this file, then the locale.
    pub fn resolve_currency(&self, cli: Option<Currency>) -> Currency {
        cli.or(self.currency)
            .or_else(Currency::from_env)
            .unwrap_or_default()
    }

    /// A fresh request for a trip starting on `start_date`.
    pub fn default_request(&self, start_date: NaiveDate) -> TripRequest {
        let d = &self.defaults;
        let mut request = TripRequest::starting_on(start_date);
        request.departure_city = d.departure_city.clone();
        request.duration_days = d.duration_days;
        request.end_date = start_date
            .checked_add_days(Days::new(u64::from(d.duration_days)))
            .unwrap_or(start_date);
        request.adults = d.adults;
        request.budget = d.budget;
        request
    }

    /// The catalog this configuration points at
    pub fn catalog(&self) -> crate::error::Result<FixtureCatalog> {
        match &self.fixture_file {
            Some(path) => FixtureCatalog::from_path(path),
            None => FixtureCatalog::embedded(),
        }
    }
}
