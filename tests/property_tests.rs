//! Property-Based Tests for Holiday Planner
//!
//! Uses proptest for testing invariants over arbitrary inputs.
//!
//! These tests verify:
//! - Destination keys and price scaling
//! - Toggle parity for single ids and whole activity sequences
//! - Downstream clearing
//! - Cost totals against the budget

use chrono::NaiveDate;
use holiday_planner::{
    FixtureCatalog, ManualClock, PlannerSession, SortKey, Step, StepSet, TripRequest,
    adjust_price_for_budget, normalize_destination,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

fn bali_session(budget: f64) -> PlannerSession {
    let mut request = TripRequest::starting_on(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
    request.destination = "Bali, Indonesia".into();
    request.budget = budget;
    PlannerSession::new(Box::new(FixtureCatalog::embedded().unwrap()), request)
        .with_clock(Box::new(Arc::new(ManualClock::new())))
}

/// Strategy for generating steps
fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Activities),
        Just(Step::Accommodation),
        Just(Step::Transportation),
    ]
}

/// A toggle of one of the first four items of a Bali catalog
fn toggle_strategy() -> impl Strategy<Value = (Step, String)> {
    (step_strategy(), 1usize..=4).prop_map(|(step, n)| {
        let id = match step {
            Step::Activities => format!("bali-act-{}", n),
            Step::Accommodation => format!("bali-acc-{}", n),
            Step::Transportation => format!("bali-tr-{}", n),
        };
        (step, id)
    })
}

// =============================================================================
// Enum Property Tests
// =============================================================================

proptest! {
    /// Step: parsing ignores case
    #[test]
    fn step_parse_ignores_case(step in step_strategy(), upper in any::<bool>()) {
        let s = step.to_string();
        let s = if upper { s.to_uppercase() } else { s };
        let parsed: Step = s.parse().expect("Should parse");
        prop_assert_eq!(step, parsed);
    }

    /// SortKey: only rating, price and duration reorder
    #[test]
    fn sort_key_reorders(key in prop_oneof![
        Just(SortKey::Popularity),
        Just(SortKey::Rating),
        Just(SortKey::Price),
        Just(SortKey::Duration),
        Just(SortKey::ThemeMatch),
        Just(SortKey::Convenience),
        Just(SortKey::Location),
    ]) {
        let expected = matches!(key, SortKey::Rating | SortKey::Price | SortKey::Duration);
        prop_assert_eq!(key.reorders(), expected);
    }
}

// =============================================================================
// Catalog Property Tests
// =============================================================================

proptest! {
    /// Destination keys are never empty and contain no whitespace
    #[test]
    fn destination_key_is_compact(destination in "[ a-zA-Z,]{0,30}") {
        let key = normalize_destination(&destination);
        prop_assert!(!key.is_empty());
        prop_assert!(!key.chars().any(char::is_whitespace));
        prop_assert_eq!(key.to_lowercase(), key.clone());
    }

    /// A trailing country suffix never changes the key
    #[test]
    fn country_suffix_is_ignored(city in "[A-Za-z]{1,12}", country in "[A-Za-z]{1,12}") {
        prop_assert_eq!(
            normalize_destination(&format!("{}, {}", city, country)),
            normalize_destination(&city)
        );
    }

    /// Scaled prices are at most double and grow with the budget
    #[test]
    fn price_scaling_is_capped_and_monotone(
        base in 0.0f64..5000.0,
        budget in 0.0f64..20000.0,
        extra in 0.0f64..5000.0,
    ) {
        let price = adjust_price_for_budget(base, budget);
        prop_assert!(price >= 0.0);
        prop_assert!(price <= (base * 2.0).round());
        prop_assert!(adjust_price_for_budget(base, budget + extra) >= price);
    }

    /// The baseline budget leaves prices as they are, up to rounding
    #[test]
    fn baseline_budget_keeps_price(base in 0u32..10000) {
        let base = f64::from(base);
        prop_assert_eq!(adjust_price_for_budget(base, 2000.0), base);
    }
}

// =============================================================================
// Session Property Tests
// =============================================================================

proptest! {
    /// Toggling a transport id n times leaves it selected iff n is odd
    #[test]
    fn transport_toggle_parity(n in 1usize..=4, times in 0usize..8) {
        let mut s = bali_session(2000.0);
        s.toggle_activity("bali-act-1");
        s.toggle_accommodation("bali-acc-1");
        let id = format!("bali-tr-{}", n);

        for _ in 0..times {
            s.toggle_transportation(&id);
        }

        prop_assert_eq!(s.selections().contains(Step::Transportation, &id), times % 2 == 1);
        prop_assert!(s.selections().contains(Step::Activities, "bali-act-1"));
        prop_assert!(s.selections().contains(Step::Accommodation, "bali-acc-1"));
    }

    /// The activity set holds exactly the ids toggled an odd number of times
    #[test]
    fn activity_set_matches_odd_toggle_counts(
        picks in prop::collection::vec(1usize..=6, 0..24),
    ) {
        let mut s = bali_session(2000.0);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for n in &picks {
            let id = format!("bali-act-{}", n);
            s.toggle_activity(&id);
            *counts.entry(id).or_default() += 1;
        }

        let expected: BTreeSet<String> = counts
            .into_iter()
            .filter(|(_, count)| count % 2 == 1)
            .map(|(id, _)| id)
            .collect();
        prop_assert_eq!(&s.selections().activities, &expected);
    }

    /// After any toggle every step downstream of it is empty
    #[test]
    fn toggles_clear_downstream(toggles in prop::collection::vec(toggle_strategy(), 1..20)) {
        let mut s = bali_session(2000.0);
        for (step, id) in &toggles {
            s.toggle(*step, id);
            for downstream in StepSet::downstream_of(*step).iter() {
                prop_assert!(s.selections().get(downstream).is_empty());
            }
        }
    }

    /// The total is the sum of the categories and decides `within_budget`
    #[test]
    fn cost_summary_is_consistent(
        budget in 1u32..6000,
        toggles in prop::collection::vec(toggle_strategy(), 0..12),
    ) {
        let mut s = bali_session(f64::from(budget));
        for (step, id) in &toggles {
            s.toggle(*step, id);
        }

        let summary = s.cost_summary();
        prop_assert_eq!(
            summary.total,
            summary.activities + summary.accommodation + summary.transportation
        );
        prop_assert_eq!(summary.total, s.calculate_total_cost());
        prop_assert_eq!(summary.within_budget, summary.total <= summary.budget);
        prop_assert!((0.0..=1.0).contains(&summary.spent_ratio()));
    }
}
