//! Application state definitions
//!
//! Contains the wizard's view state (cursor positions, search queries,
//! overlays) and the editable request fields of the destination screen.
//! Planning state itself lives in the session the app owns.

use chrono::{Days, NaiveDate};
use ratatui::widgets::ListState;
use strum::{EnumIter, IntoEnumIterator};

use crate::error::{PlannerError, Result};
use crate::request::{MAX_DURATION_DAYS, PreferencesPatch, RequestPatch, TripRequest};
use crate::types::Step;
use crate::wizard::WizardStep;

/// Fields shown on the destination screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum RequestField {
    Destination,
    DepartureCity,
    StartDate,
    Duration,
    Adults,
    Children,
    Budget,
    Themes,
    ActivityTypes,
    AccommodationTypes,
    TransportPreferences,
}

impl RequestField {
    pub fn count() -> usize {
        Self::iter().count()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Destination => "Destination",
            Self::DepartureCity => "Departing From",
            Self::StartDate => "Start Date",
            Self::Duration => "Duration (days)",
            Self::Adults => "Adults",
            Self::Children => "Children",
            Self::Budget => "Budget",
            Self::Themes => "Themes",
            Self::ActivityTypes => "Activity Types",
            Self::AccommodationTypes => "Accommodation Types",
            Self::TransportPreferences => "Transport",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Destination => "e.g. Bali, Indonesia",
            Self::DepartureCity => "e.g. London",
            Self::StartDate => "YYYY-MM-DD",
            Self::Duration => "7",
            Self::Adults => "1",
            Self::Children => "0",
            Self::Budget => "2000",
            Self::Themes => "comma separated, e.g. beach, culture",
            Self::ActivityTypes => "comma separated, e.g. tour, adventure",
            Self::AccommodationTypes => "comma separated, e.g. hotel, villa",
            Self::TransportPreferences => "comma separated, e.g. flight, train",
        }
    }

    /// Current value as editable text
    pub fn current_value(&self, request: &TripRequest) -> String {
        let prefs = &request.preferences;
        match self {
            Self::Destination => request.destination.clone(),
            Self::DepartureCity => request.departure_city.clone(),
            Self::StartDate => request.start_date.format("%Y-%m-%d").to_string(),
            Self::Duration => request.duration_days.to_string(),
            Self::Adults => request.adults.to_string(),
            Self::Children => request.children.to_string(),
            Self::Budget => format!("{:.0}", request.budget),
            Self::Themes => prefs.themes.join(", "),
            Self::ActivityTypes => prefs.activity_types.join(", "),
            Self::AccommodationTypes => prefs.accommodation_types.join(", "),
            Self::TransportPreferences => prefs.transport_preferences.join(", "),
        }
    }

    /// Parse user input into a patch against `request`.
    ///
    /// Date and duration edits keep the end date consistent with the
    /// start date plus the duration.
    pub fn parse(&self, input: &str, request: &TripRequest) -> Result<RequestPatch> {
        let input = input.trim();
        let mut patch = RequestPatch::default();
        match self {
            Self::Destination => patch.destination = Some(input.to_string()),
            Self::DepartureCity => patch.departure_city = Some(input.to_string()),
            Self::StartDate => {
                let start = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
                    PlannerError::validation(format!("'{}' is not a YYYY-MM-DD date", input))
                })?;
                patch.start_date = Some(start);
                patch.end_date = Some(end_date(start, request.duration_days));
            }
            Self::Duration => {
                let days = parse_count(input, self.label())?;
                if days < 1 {
                    return Err(PlannerError::validation("Duration must be at least 1 day"));
                }
                if days > MAX_DURATION_DAYS {
                    return Err(PlannerError::validation(format!(
                        "Duration must be at most {} days",
                        MAX_DURATION_DAYS
                    )));
                }
                patch.duration_days = Some(days);
                patch.end_date = Some(end_date(request.start_date, days));
            }
            Self::Adults => {
                let adults = parse_count(input, self.label())?;
                if adults < 1 {
                    return Err(PlannerError::validation("At least one adult is required"));
                }
                patch.adults = Some(adults);
            }
            Self::Children => patch.children = Some(parse_count(input, self.label())?),
            Self::Budget => patch.budget = Some(parse_amount(input)?),
            Self::Themes => {
                patch.preferences = Some(PreferencesPatch {
                    themes: Some(split_list(input)),
                    ..PreferencesPatch::default()
                })
            }
            Self::ActivityTypes => {
                patch.preferences = Some(PreferencesPatch {
                    activity_types: Some(split_list(input)),
                    ..PreferencesPatch::default()
                })
            }
            Self::AccommodationTypes => {
                patch.preferences = Some(PreferencesPatch {
                    accommodation_types: Some(split_list(input)),
                    ..PreferencesPatch::default()
                })
            }
            Self::TransportPreferences => {
                patch.preferences = Some(PreferencesPatch {
                    transport_preferences: Some(split_list(input)),
                    ..PreferencesPatch::default()
                })
            }
        }
        Ok(patch)
    }
}

fn end_date(start: NaiveDate, days: u32) -> NaiveDate {
    start
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(start)
}

fn parse_count(input: &str, label: &str) -> Result<u32> {
    input
        .parse::<u32>()
        .map_err(|_| PlannerError::validation(format!("{} must be a whole number", label)))
}

fn parse_amount(input: &str) -> Result<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(PlannerError::validation(format!(
            "'{}' is not a valid budget",
            input
        ))),
    }
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// A text or selection dialog waiting for a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingEdit {
    Field(RequestField),
    FeaturedTrip,
    Search(Step),
    Note(Step),
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current wizard screen
    pub step: WizardStep,
    /// Cursor on the destination screen
    pub field_list: ListState,
    /// Cursor per catalog step
    pub catalog_lists: [ListState; 3],
    /// Search query per catalog step
    pub searches: [String; 3],
    /// Scroll offset of the review screen
    pub review_scroll: u16,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// What the open dialog is editing
    pub pending_edit: Option<PendingEdit>,
}

impl Default for AppState {
    fn default() -> Self {
        let mut field_list = ListState::default();
        field_list.select(Some(0));
        Self {
            step: WizardStep::default(),
            field_list,
            catalog_lists: Default::default(),
            searches: Default::default(),
            review_scroll: 0,
            status_message: "Welcome! Fill in your trip and press Tab to continue".to_string(),
            help_visible: false,
            pending_edit: None,
        }
    }
}

impl AppState {
    pub fn search(&self, step: Step) -> &str {
        &self.searches[step.index()]
    }

    pub fn catalog_list(&self, step: Step) -> &ListState {
        &self.catalog_lists[step.index()]
    }

    pub fn catalog_list_mut(&mut self, step: Step) -> &mut ListState {
        &mut self.catalog_lists[step.index()]
    }

    /// Highlighted request field on the destination screen
    pub fn current_field(&self) -> Option<RequestField> {
        self.field_list.selected().and_then(RequestField::from_index)
    }
}

/// Move a list cursor by `delta` rows within `len` items.
pub fn move_cursor(list: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        list.select(None);
        return;
    }
    let current = list.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    list.select(Some(next as usize));
}
