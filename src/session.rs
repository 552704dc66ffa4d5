//! Wizard session state
//!
//! [`PlannerSession`] owns the trip request, the three selection sets, the
//! derived catalogs and the refresh timers. Every mutation goes through it
//! and is synchronous; the cascade policy runs as part of the mutation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;

use crate::catalog::{
    Accommodation, Activity, CatalogItem, CatalogProvider, CatalogQuery, JourneySegment,
    TransportOption, search,
};
use crate::cost::{CostSummary, sum_prices};
use crate::itinerary::{ItineraryDay, generate_itinerary};
use crate::plan::TripPlan;
use crate::policy::{CascadePolicy, Invalidation, Trigger};
use crate::refresh::{Clock, RefreshFlags, RefreshTimers, SystemClock};
use crate::request::{RequestChange, RequestUpdate, TripRequest};
use crate::types::{Step, StepSet};

/// Selected item ids per step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    pub activities: BTreeSet<String>,
    pub accommodation: BTreeSet<String>,
    pub transportation: BTreeSet<String>,
}

impl Selections {
    pub fn get(&self, step: Step) -> &BTreeSet<String> {
        match step {
            Step::Activities => &self.activities,
            Step::Accommodation => &self.accommodation,
            Step::Transportation => &self.transportation,
        }
    }

    fn get_mut(&mut self, step: Step) -> &mut BTreeSet<String> {
        match step {
            Step::Activities => &mut self.activities,
            Step::Accommodation => &mut self.accommodation,
            Step::Transportation => &mut self.transportation,
        }
    }

    pub fn contains(&self, step: Step, id: &str) -> bool {
        self.get(step).contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty() && self.accommodation.is_empty() && self.transportation.is_empty()
    }
}

/// Catalogs derived from the current request, after preference filtering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogs {
    pub activities: Vec<Activity>,
    pub accommodation: Vec<Accommodation>,
    /// Route-level options, then the options of each journey segment
    pub transportation: Vec<TransportOption>,
    pub journey: Vec<JourneySegment>,
}

impl Catalogs {
    fn build(provider: &dyn CatalogProvider, request: &TripRequest) -> Self {
        let prefs = &request.preferences;
        Self {
            activities: CatalogQuery::for_step(Step::Activities, prefs)
                .apply(provider.activities(request)),
            accommodation: CatalogQuery::for_step(Step::Accommodation, prefs)
                .apply(provider.accommodation(request)),
            transportation: CatalogQuery::for_step(Step::Transportation, prefs)
                .apply(provider.transport_catalog(request)),
            journey: provider.journey_segments(request),
        }
    }

    /// Journey segment with the given id
    pub fn segment(&self, id: &str) -> Option<&JourneySegment> {
        self.journey.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, step: Step, id: &str) -> bool {
        match step {
            Step::Activities => self.activities.iter().any(|i| i.id == id),
            Step::Accommodation => self.accommodation.iter().any(|i| i.id == id),
            Step::Transportation => self.transportation.iter().any(|i| i.id == id),
        }
    }

    /// Item ids of a step, in catalog order
    pub fn ids(&self, step: Step) -> Vec<&str> {
        match step {
            Step::Activities => self.activities.iter().map(|i| i.id()).collect(),
            Step::Accommodation => self.accommodation.iter().map(|i| i.id()).collect(),
            Step::Transportation => self.transportation.iter().map(|i| i.id()).collect(),
        }
    }

    pub fn len(&self, step: Step) -> usize {
        match step {
            Step::Activities => self.activities.len(),
            Step::Accommodation => self.accommodation.len(),
            Step::Transportation => self.transportation.len(),
        }
    }
}

/// The catalog records behind the current selections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedItems {
    pub activities: Vec<Activity>,
    pub accommodation: Vec<Accommodation>,
    pub transportation: Vec<TransportOption>,
}

/// Free-text notes entered per step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomInputs {
    pub activities: String,
    pub accommodation: String,
    pub transportation: String,
}

impl CustomInputs {
    pub fn get(&self, step: Step) -> &str {
        match step {
            Step::Activities => &self.activities,
            Step::Accommodation => &self.accommodation,
            Step::Transportation => &self.transportation,
        }
    }

    fn set(&mut self, step: Step, text: String) {
        match step {
            Step::Activities => self.activities = text,
            Step::Accommodation => self.accommodation = text,
            Step::Transportation => self.transportation = text,
        }
    }
}

/// Request and selection state of one planning session
pub struct PlannerSession {
    request: TripRequest,
    selections: Selections,
    catalogs: Catalogs,
    custom_inputs: CustomInputs,
    timers: RefreshTimers,
    policy: CascadePolicy,
    provider: Box<dyn CatalogProvider>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for PlannerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerSession")
            .field("request", &self.request)
            .field("selections", &self.selections)
            .field("timers", &self.timers)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl PlannerSession {
    /// Start a session on `request`, using the system clock and default timings.
    pub fn new(provider: Box<dyn CatalogProvider>, request: TripRequest) -> Self {
        let catalogs = Catalogs::build(provider.as_ref(), &request);
        tracing::debug!(
            destination = %request.destination,
            activities = catalogs.activities.len(),
            accommodation = catalogs.accommodation.len(),
            transportation = catalogs.transportation.len(),
            "Session started"
        );
        Self {
            request,
            selections: Selections::default(),
            catalogs,
            custom_inputs: CustomInputs::default(),
            timers: RefreshTimers::new(),
            policy: CascadePolicy::default(),
            provider,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_policy(mut self, policy: CascadePolicy) -> Self {
        self.policy = policy;
        self
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Merge a patch into the request (or replace it), regenerate the
    /// catalogs and apply the cascade for whatever fields changed.
    ///
    /// Returns the invalidation that was applied.
    pub fn update_request(&mut self, update: impl Into<RequestUpdate>) -> Invalidation {
        let next = self.request.apply(update.into());
        let change = RequestChange::between(&self.request, &next);
        if change.is_empty() {
            tracing::debug!("Request update changed nothing");
            return Invalidation::NONE;
        }

        self.request = next;
        self.catalogs = Catalogs::build(self.provider.as_ref(), &self.request);

        let invalidation = self.policy.evaluate(Trigger::RequestChanged(change));
        tracing::info!(
            destination = %self.request.destination,
            major = change.is_major(),
            "Trip request updated"
        );
        self.apply_invalidation(invalidation);
        self.prune_stale_selections();
        invalidation
    }

    /// Flip an item's membership in a step's selection set.
    ///
    /// Returns whether the item is selected afterwards. Ids that are not in
    /// the step's current catalog are ignored.
    pub fn toggle(&mut self, step: Step, id: &str) -> bool {
        if !self.catalogs.contains(step, id) {
            tracing::warn!("Ignoring toggle of unknown {} item '{}'", step, id);
            return false;
        }

        let set = self.selections.get_mut(step);
        let selected = if set.remove(id) {
            false
        } else {
            set.insert(id.to_string());
            true
        };
        tracing::debug!(%step, id, selected, "Toggled selection");

        let invalidation = self.policy.evaluate(Trigger::Toggled(step));
        self.apply_invalidation(invalidation);
        selected
    }

    pub fn toggle_activity(&mut self, id: &str) -> bool {
        self.toggle(Step::Activities, id)
    }

    pub fn toggle_accommodation(&mut self, id: &str) -> bool {
        self.toggle(Step::Accommodation, id)
    }

    pub fn toggle_transportation(&mut self, id: &str) -> bool {
        self.toggle(Step::Transportation, id)
    }

    pub fn set_custom_input(&mut self, step: Step, text: impl Into<String>) {
        self.custom_inputs.set(step, text.into());
    }

    /// Settle refresh flags whose window has passed.
    pub fn tick(&mut self) -> StepSet {
        let settled = self.timers.settle(self.clock.now());
        for step in settled.iter() {
            tracing::debug!(%step, "Refresh settled");
        }
        settled
    }

    fn apply_invalidation(&mut self, invalidation: Invalidation) {
        if invalidation.is_none() {
            return;
        }
        for step in invalidation.cleared.iter() {
            let set = self.selections.get_mut(step);
            if !set.is_empty() {
                tracing::debug!(%step, cleared = set.len(), "Cleared downstream selections");
                set.clear();
            }
        }
        self.timers
            .raise(invalidation.raised, self.clock.now(), invalidation.duration);
    }

    fn prune_stale_selections(&mut self) {
        for step in StepSet::ALL.iter() {
            let catalogs = &self.catalogs;
            let set = self.selections.get_mut(step);
            let before = set.len();
            set.retain(|id| catalogs.contains(step, id));
            if set.len() != before {
                tracing::debug!(%step, dropped = before - set.len(), "Dropped stale selections");
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn request(&self) -> &TripRequest {
        &self.request
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn custom_input(&self, step: Step) -> &str {
        self.custom_inputs.get(step)
    }

    pub fn policy(&self) -> &CascadePolicy {
        &self.policy
    }

    pub fn provider(&self) -> &dyn CatalogProvider {
        self.provider.as_ref()
    }

    pub fn refresh_flags(&self) -> RefreshFlags {
        self.timers.flags(self.clock.now())
    }

    pub fn is_refreshing(&self, step: Step) -> bool {
        self.timers.is_refreshing(step, self.clock.now())
    }

    /// When the next raised flag will settle, for bounding a poll timeout.
    pub fn next_refresh_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Catalog items whose ids are selected, in catalog order.
    pub fn get_filtered_selections(&self) -> SelectedItems {
        fn pick<T: CatalogItem + Clone>(items: &[T], ids: &BTreeSet<String>) -> Vec<T> {
            items
                .iter()
                .filter(|i| ids.contains(i.id()))
                .cloned()
                .collect()
        }

        SelectedItems {
            activities: pick(&self.catalogs.activities, &self.selections.activities),
            accommodation: pick(&self.catalogs.accommodation, &self.selections.accommodation),
            transportation: pick(&self.catalogs.transportation, &self.selections.transportation),
        }
    }

    pub fn calculate_total_cost(&self) -> f64 {
        let s = self.get_filtered_selections();
        sum_prices(&s.activities) + sum_prices(&s.accommodation) + sum_prices(&s.transportation)
    }

    pub fn cost_summary(&self) -> CostSummary {
        let s = self.get_filtered_selections();
        CostSummary::new(
            &s.activities,
            &s.accommodation,
            &s.transportation,
            self.request.budget,
        )
    }

    /// Ids of a step's catalog items matching a free-text query, in catalog order.
    pub fn search(&self, step: Step, query: &str) -> Vec<&str> {
        match step {
            Step::Activities => ids_of(search(&self.catalogs.activities, query)),
            Step::Accommodation => ids_of(search(&self.catalogs.accommodation, query)),
            Step::Transportation => ids_of(search(&self.catalogs.transportation, query)),
        }
    }

    pub fn itinerary(&self) -> Vec<ItineraryDay> {
        let template = self.provider.itinerary_template(&self.request);
        let featured_notes = self
            .provider
            .featured_trip_for(&self.request)
            .map(|trip| trip.itinerary.as_slice())
            .unwrap_or_default();
        generate_itinerary(&self.request, &template, featured_notes)
    }

    /// Theme of the trip: the matching featured trip's, else the first requested one.
    pub fn theme(&self) -> String {
        if let Some(trip) = self.provider.featured_trip_for(&self.request) {
            return trip.primary_theme("general");
        }
        self.request
            .preferences
            .themes
            .first()
            .map(|t| t.to_lowercase())
            .unwrap_or_else(|| "general".to_string())
    }

    /// Snapshot the session as a plan.
    pub fn plan(&self) -> TripPlan {
        let created_at = Utc::now();
        TripPlan {
            id: TripPlan::make_id(&created_at),
            created_at,
            request: self.request.clone(),
            selections: self.get_filtered_selections(),
            custom_inputs: self.custom_inputs.clone(),
            itinerary: self.itinerary(),
            summary: self.cost_summary(),
            theme: self.theme(),
        }
    }
}

fn ids_of<T: CatalogItem>(items: Vec<&T>) -> Vec<&str> {
    items.into_iter().map(|i| i.id()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FixtureCatalog;
    use crate::refresh::ManualClock;
    use crate::request::RequestPatch;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::time::Duration;

    fn session() -> (PlannerSession, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let mut request = TripRequest::starting_on(NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
        request.destination = "Atlantis".into();
        let session = PlannerSession::new(Box::new(FixtureCatalog::embedded().unwrap()), request)
            .with_clock(Box::new(Arc::clone(&clock)));
        (session, clock)
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let (mut s, _) = session();
        s.toggle_accommodation("default-1");
        assert!(!s.toggle_activity("no-such-id"));
        assert!(s.selections().activities.is_empty());
        // No cascade: accommodation kept
        assert!(s.selections().contains(Step::Accommodation, "default-1"));
    }

    #[test]
    fn test_unchanged_patch_has_no_cascade() {
        let (mut s, _) = session();
        s.toggle_activity("default-1");
        let inv = s.update_request(RequestPatch::destination("Atlantis"));
        assert!(inv.is_none());
        assert!(s.selections().contains(Step::Activities, "default-1"));
    }

    #[test]
    fn test_party_change_keeps_selections() {
        let (mut s, _) = session();
        s.toggle_activity("default-1");
        let inv = s.update_request(RequestPatch {
            adults: Some(3),
            ..RequestPatch::default()
        });
        assert!(inv.is_none());
        assert_eq!(s.request().adults, 3);
        assert!(s.selections().contains(Step::Activities, "default-1"));
        assert!(!s.refresh_flags().any());
    }

    #[test]
    fn test_tick_reports_settled_steps() {
        let (mut s, clock) = session();
        s.toggle_activity("default-2");
        assert!(s.tick().is_empty());
        assert!(s.next_refresh_deadline().is_some());

        clock.advance(Duration::from_millis(1500));
        assert_eq!(s.tick(), StepSet::downstream_of(Step::Activities));
        assert_eq!(s.next_refresh_deadline(), None);
    }

    #[test]
    fn test_search_returns_catalog_ids() {
        let (s, _) = session();
        assert_eq!(s.search(Step::Activities, "culture"), vec!["default-2"]);
        assert_eq!(s.search(Step::Transportation, "airport").len(), 4);
    }

    #[test]
    fn test_segment_options_are_selectable() {
        let (mut s, _) = session();
        assert_eq!(s.catalogs().journey.len(), 4);
        assert_eq!(
            s.catalogs().segment("local").map(|seg| seg.title.as_str()),
            Some("Local Transport")
        );

        assert!(s.toggle_transportation("default-return-1"));
        let picked = s.get_filtered_selections().transportation;
        assert_eq!(picked[0].segment.as_deref(), Some("return"));
        assert_eq!(s.calculate_total_cost(), 450.0);
    }

    #[test]
    fn test_custom_inputs() {
        let (mut s, _) = session();
        s.set_custom_input(Step::Accommodation, "Sea view please");
        assert_eq!(s.custom_input(Step::Accommodation), "Sea view please");
        assert_eq!(s.custom_input(Step::Activities), "");
    }
}
