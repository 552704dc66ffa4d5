//! Cascading invalidation rules
//!
//! Each trigger maps to the steps whose selections are cleared, the steps
//! whose refresh flags are raised, and how long the flags stay raised.
//! Rules are checked most-major first and the first match wins.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::request::RequestChange;
use crate::types::{Step, StepSet};

/// Upper bound accepted for any refresh window.
pub const MAX_REFRESH_MS: u64 = 60_000;

/// How long each kind of change keeps refresh flags raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshTimings {
    pub major_change_ms: u64,
    pub accommodation_types_ms: u64,
    pub transport_preferences_ms: u64,
    pub activity_toggle_ms: u64,
    pub accommodation_toggle_ms: u64,
}

impl Default for RefreshTimings {
    fn default() -> Self {
        Self {
            major_change_ms: 2000,
            accommodation_types_ms: 1000,
            transport_preferences_ms: 0,
            activity_toggle_ms: 1500,
            accommodation_toggle_ms: 1000,
        }
    }
}

impl RefreshTimings {
    /// Name and value of every window, for validation and display
    pub fn entries(&self) -> [(&'static str, u64); 5] {
        [
            ("majorChangeMs", self.major_change_ms),
            ("accommodationTypesMs", self.accommodation_types_ms),
            ("transportPreferencesMs", self.transport_preferences_ms),
            ("activityToggleMs", self.activity_toggle_ms),
            ("accommodationToggleMs", self.accommodation_toggle_ms),
        ]
    }
}

/// Something that may invalidate downstream state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The request changed; fields that differ are set
    RequestChanged(RequestChange),
    /// An item was selected or deselected in a step
    Toggled(Step),
}

/// Outcome of one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    pub cleared: StepSet,
    pub raised: StepSet,
    pub duration: Duration,
}

impl Invalidation {
    pub const NONE: Self = Self {
        cleared: StepSet::EMPTY,
        raised: StepSet::EMPTY,
        duration: Duration::ZERO,
    };

    fn clear_and_raise(steps: StepSet, ms: u64) -> Self {
        Self {
            cleared: steps,
            raised: steps,
            duration: Duration::from_millis(ms),
        }
    }

    pub fn is_none(&self) -> bool {
        self.cleared.is_empty() && self.raised.is_empty()
    }
}

/// The rule table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadePolicy {
    timings: RefreshTimings,
}

impl CascadePolicy {
    pub fn new(timings: RefreshTimings) -> Self {
        Self { timings }
    }

    pub fn timings(&self) -> &RefreshTimings {
        &self.timings
    }

    pub fn evaluate(&self, trigger: Trigger) -> Invalidation {
        let t = &self.timings;
        match trigger {
            Trigger::RequestChanged(change) if change.is_major() => {
                Invalidation::clear_and_raise(StepSet::ALL, t.major_change_ms)
            }
            Trigger::RequestChanged(change) if change.accommodation_types => {
                Invalidation::clear_and_raise(
                    StepSet::downstream_of(Step::Activities),
                    t.accommodation_types_ms,
                )
            }
            Trigger::RequestChanged(change) if change.transport_preferences => {
                Invalidation::clear_and_raise(
                    StepSet::EMPTY.with(Step::Transportation),
                    t.transport_preferences_ms,
                )
            }
            Trigger::RequestChanged(_) => Invalidation::NONE,
            Trigger::Toggled(Step::Activities) => Invalidation::clear_and_raise(
                StepSet::downstream_of(Step::Activities),
                t.activity_toggle_ms,
            ),
            Trigger::Toggled(Step::Accommodation) => Invalidation::clear_and_raise(
                StepSet::downstream_of(Step::Accommodation),
                t.accommodation_toggle_ms,
            ),
            Trigger::Toggled(Step::Transportation) => Invalidation::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(f: impl FnOnce(&mut RequestChange)) -> Trigger {
        let mut c = RequestChange::default();
        f(&mut c);
        Trigger::RequestChanged(c)
    }

    #[test]
    fn test_major_change_clears_everything() {
        let policy = CascadePolicy::default();
        for trigger in [
            change(|c| c.destination = true),
            change(|c| c.budget = true),
            change(|c| c.duration = true),
            change(|c| c.dates = true),
            change(|c| c.themes = true),
            change(|c| c.activity_types = true),
        ] {
            let inv = policy.evaluate(trigger);
            assert_eq!(inv.cleared, StepSet::ALL);
            assert_eq!(inv.raised, StepSet::ALL);
            assert_eq!(inv.duration, Duration::from_millis(2000));
        }
    }

    #[test]
    fn test_major_wins_over_preference_rules() {
        let policy = CascadePolicy::default();
        let inv = policy.evaluate(change(|c| {
            c.destination = true;
            c.accommodation_types = true;
            c.transport_preferences = true;
        }));
        assert_eq!(inv.cleared, StepSet::ALL);
    }

    #[test]
    fn test_preference_rules() {
        let policy = CascadePolicy::default();

        let inv = policy.evaluate(change(|c| c.accommodation_types = true));
        assert!(!inv.cleared.contains(Step::Activities));
        assert!(inv.cleared.contains(Step::Accommodation));
        assert!(inv.raised.contains(Step::Transportation));
        assert_eq!(inv.duration, Duration::from_millis(1000));

        let inv = policy.evaluate(change(|c| c.transport_preferences = true));
        assert_eq!(inv.cleared, StepSet::EMPTY.with(Step::Transportation));
        assert_eq!(inv.duration, Duration::ZERO);
    }

    #[test]
    fn test_minor_request_change_is_noop() {
        let policy = CascadePolicy::default();
        assert!(policy.evaluate(change(|c| c.party = true)).is_none());
        assert!(policy.evaluate(change(|c| c.departure_city = true)).is_none());
    }

    #[test]
    fn test_toggle_rules() {
        let policy = CascadePolicy::default();

        let inv = policy.evaluate(Trigger::Toggled(Step::Activities));
        assert_eq!(inv.cleared, StepSet::downstream_of(Step::Activities));
        assert_eq!(inv.duration, Duration::from_millis(1500));

        let inv = policy.evaluate(Trigger::Toggled(Step::Accommodation));
        assert_eq!(inv.cleared, StepSet::EMPTY.with(Step::Transportation));
        assert_eq!(inv.duration, Duration::from_millis(1000));

        assert_eq!(
            policy.evaluate(Trigger::Toggled(Step::Transportation)),
            Invalidation::NONE
        );
    }

    #[test]
    fn test_custom_timings() {
        let policy = CascadePolicy::new(RefreshTimings {
            major_change_ms: 50,
            ..RefreshTimings::default()
        });
        let inv = policy.evaluate(change(|c| c.destination = true));
        assert_eq!(inv.duration, Duration::from_millis(50));
    }

    #[test]
    fn test_timings_json_is_camel_case() {
        let t: RefreshTimings = serde_json::from_str(r#"{"majorChangeMs": 300}"#).unwrap();
        assert_eq!(t.major_change_ms, 300);
        assert_eq!(t.activity_toggle_ms, 1500);
    }
}
