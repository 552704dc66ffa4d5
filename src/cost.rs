//! Cost aggregation against the trip budget

use serde::{Deserialize, Serialize};

use crate::catalog::{Accommodation, Activity, CatalogItem, TransportOption};
use crate::currency::Currency;

/// Sum of the total prices of `items`.
pub fn sum_prices<T: CatalogItem>(items: &[T]) -> f64 {
    items.iter().map(|item| item.total_price()).sum()
}

/// Per-category totals of the selected items
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub activities: f64,
    pub accommodation: f64,
    pub transportation: f64,
    pub total: f64,
    pub budget: f64,
    pub within_budget: bool,
    /// Budget left over; negative when over budget
    pub remaining: f64,
}

impl CostSummary {
    pub fn new(
        activities: &[Activity],
        accommodation: &[Accommodation],
        transportation: &[TransportOption],
        budget: f64,
    ) -> Self {
        let a = sum_prices(activities);
        let b = sum_prices(accommodation);
        let c = sum_prices(transportation);
        let total = a + b + c;
        let selected = activities.len() + accommodation.len() + transportation.len();

        let within_budget = if budget > 0.0 {
            total <= budget
        } else {
            selected == 0
        };

        Self {
            activities: a,
            accommodation: b,
            transportation: c,
            total,
            budget,
            within_budget,
            remaining: budget - total,
        }
    }

    /// Share of the budget spent, as a ratio clamped to `0.0..=1.0`.
    pub fn spent_ratio(&self) -> f64 {
        if self.budget > 0.0 {
            (self.total / self.budget).clamp(0.0, 1.0)
        } else if self.total > 0.0 {
            1.0
        } else {
            0.0
        }
    }

    /// Human-readable breakdown, one line per row.
    pub fn render(&self, currency: Currency) -> Vec<String> {
        let fmt = |v: f64| currency.format_amount(v);
        let status = if self.within_budget {
            format!("Within budget ({} remaining)", fmt(self.remaining))
        } else {
            format!("Over budget by {}", fmt(-self.remaining))
        };

        vec![
            format!("Activities:     {:>12}", fmt(self.activities)),
            format!("Accommodation:  {:>12}", fmt(self.accommodation)),
            format!("Transportation: {:>12}", fmt(self.transportation)),
            format!("Total:          {:>12}", fmt(self.total)),
            format!("Budget:         {:>12}", fmt(self.budget)),
            status,
        ]
    }
}
