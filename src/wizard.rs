//! Wizard navigation
//!
//! The planner walks through five screens. The three middle screens each
//! edit one catalog [`Step`]; the first edits the request and the last
//! reviews the plan.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::types::Step;

/// Screens of the planning wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WizardStep {
    /// Destination, dates, party size, budget and preferences.
    #[default]
    Destination,
    Activities,
    Accommodation,
    Transportation,
    /// Selected items, cost summary and itinerary.
    Review,
}

impl WizardStep {
    /// Get the next step in the wizard sequence.
    ///
    /// Returns `None` on the review screen.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Destination => Some(Self::Activities),
            Self::Activities => Some(Self::Accommodation),
            Self::Accommodation => Some(Self::Transportation),
            Self::Transportation => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// Get the previous step in the wizard sequence.
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Destination => None,
            Self::Activities => Some(Self::Destination),
            Self::Accommodation => Some(Self::Activities),
            Self::Transportation => Some(Self::Accommodation),
            Self::Review => Some(Self::Transportation),
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.previous().is_some()
    }

    /// Get the display title for this step.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Destination => "Where are you going?",
            Self::Activities => "Choose Activities",
            Self::Accommodation => "Choose Accommodation",
            Self::Transportation => "Choose Transportation",
            Self::Review => "Review Your Trip",
        }
    }

    /// Get the step number (1-indexed for display).
    pub fn step_number(&self) -> usize {
        match self {
            Self::Destination => 1,
            Self::Activities => 2,
            Self::Accommodation => 3,
            Self::Transportation => 4,
            Self::Review => 5,
        }
    }

    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 5;

    /// The catalog step this screen edits, if any
    pub fn catalog_step(&self) -> Option<Step> {
        match self {
            Self::Activities => Some(Step::Activities),
            Self::Accommodation => Some(Step::Accommodation),
            Self::Transportation => Some(Step::Transportation),
            Self::Destination | Self::Review => None,
        }
    }
}

impl From<Step> for WizardStep {
    fn from(step: Step) -> Self {
        match step {
            Step::Activities => Self::Activities,
            Step::Accommodation => Self::Accommodation,
            Step::Transportation => Self::Transportation,
        }
    }
}
