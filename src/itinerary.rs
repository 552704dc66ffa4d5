//! Day-by-day itinerary

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::ItineraryTemplateDay;
use crate::request::{MAX_DURATION_DAYS, TripRequest};

/// One day of the trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub notes: String,
}

impl ItineraryDay {
    /// `"Title: notes"`, or just the notes when the day has no title.
    pub fn summary(&self) -> String {
        match &self.title {
            Some(title) => format!("{}: {}", title, self.notes),
            None => self.notes.clone(),
        }
    }
}

/// Build one entry per day of `request.duration_days`, dated from the start date.
/// At most [`MAX_DURATION_DAYS`] days are generated.
///
/// Each day comes from the destination template when it covers that day,
/// then from the featured trip's notes, then from generic arrival, middle
/// and departure days.
pub fn generate_itinerary(
    request: &TripRequest,
    template: &[ItineraryTemplateDay],
    featured_notes: &[String],
) -> Vec<ItineraryDay> {
    let days = request.duration_days.min(MAX_DURATION_DAYS);
    (0..days)
        .map(|i| {
            let date = request
                .start_date
                .checked_add_days(Days::new(u64::from(i)))
                .unwrap_or(request.start_date);
            let index = i as usize;

            if let Some(day) = template.get(index) {
                return ItineraryDay {
                    date,
                    title: Some(day.title.clone()),
                    notes: day.notes.clone(),
                };
            }
            if let Some(note) = featured_notes.get(index) {
                return ItineraryDay {
                    date,
                    title: None,
                    notes: note.clone(),
                };
            }

            let (title, notes) = if i == 0 {
                (
                    "Arrival Day".to_string(),
                    "Arrival → Check-in → Welcome dinner".to_string(),
                )
            } else if i + 1 == days {
                (
                    "Departure Day".to_string(),
                    "Final day → Check-out → Departure".to_string(),
                )
            } else {
                (
                    format!("Day {}", i + 1),
                    format!("Day {} activities and exploration", i + 1),
                )
            };
            ItineraryDay {
                date,
                title: Some(title),
                notes,
            }
        })
        .collect()
}
