//! Type-safe planning types
//!
//! Stringly-typed step names, sort keys and transport kinds from the
//! fixture data are parsed into these enums at the edges.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A selectable wizard step that owns a catalog and a selection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Step {
    Activities,
    Accommodation,
    Transportation,
}

impl Step {
    /// Position in the upstream-to-downstream order.
    pub const fn index(self) -> usize {
        match self {
            Self::Activities => 0,
            Self::Accommodation => 1,
            Self::Transportation => 2,
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Activities => "Activities",
            Self::Accommodation => "Accommodation",
            Self::Transportation => "Transportation",
        }
    }
}

/// A small set of steps, used by the cascade policy for cleared and raised steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSet {
    bits: u8,
}

impl StepSet {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const ALL: Self = Self { bits: 0b111 };

    /// Every step strictly downstream of `step`.
    pub fn downstream_of(step: Step) -> Self {
        Step::iter()
            .filter(|s| s.index() > step.index())
            .collect()
    }

    pub fn with(mut self, step: Step) -> Self {
        self.bits |= 1 << step.index();
        self
    }

    pub fn contains(&self, step: Step) -> bool {
        self.bits & (1 << step.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Step> + '_ {
        Step::iter().filter(move |s| self.contains(*s))
    }
}

impl FromIterator<Step> for StepSet {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

/// Catalog sort order.
///
/// Only `Rating`, `Price` and `Duration` reorder; the remaining keys are
/// accepted and leave the fixture order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortKey {
    #[default]
    Popularity,
    Rating,
    Price,
    Duration,
    ThemeMatch,
    Convenience,
    Location,
}

impl SortKey {
    /// Whether sorting by this key changes the fixture order
    pub fn reorders(&self) -> bool {
        matches!(self, Self::Rating | Self::Price | Self::Duration)
    }
}

/// Transport option kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransportKind {
    #[default]
    Flight,
    Train,
    Bus,
    Boat,
    Drive,
    Rental,
    LocalTransport,
}

impl TransportKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Train => "train",
            Self::Bus => "bus",
            Self::Boat => "boat",
            Self::Drive => "drive",
            Self::Rental => "rental",
            Self::LocalTransport => "local_transport",
        }
    }
}
