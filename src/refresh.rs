//! Refresh flags as per-step deadlines
//!
//! Raising a flag records a deadline for that step; the flag reads true
//! until the deadline passes. A new raise for a step replaces its pending
//! deadline, so only the most recent raise decides when the flag clears.

use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::types::{Step, StepSet};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Share it through an `Arc` to keep a
/// handle after giving it to a session.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Snapshot of the per-step refresh flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshFlags {
    pub activities: bool,
    pub accommodation: bool,
    pub transportation: bool,
}

impl RefreshFlags {
    pub fn get(&self, step: Step) -> bool {
        match step {
            Step::Activities => self.activities,
            Step::Accommodation => self.accommodation,
            Step::Transportation => self.transportation,
        }
    }

    pub fn any(&self) -> bool {
        self.activities || self.accommodation || self.transportation
    }
}

/// Pending refresh deadline per step
#[derive(Debug, Clone, Default)]
pub struct RefreshTimers {
    deadlines: [Option<Instant>; 3],
}

impl RefreshTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise `steps` until `now + duration`, replacing any pending deadline.
    ///
    /// A zero duration still records a deadline; the flag reads false from
    /// the first check onwards.
    pub fn raise(&mut self, steps: StepSet, now: Instant, duration: Duration) {
        let deadline = now + duration;
        for step in steps.iter() {
            self.deadlines[step.index()] = Some(deadline);
        }
    }

    pub fn is_refreshing(&self, step: Step, now: Instant) -> bool {
        self.deadlines[step.index()].is_some_and(|deadline| now < deadline)
    }

    pub fn flags(&self, now: Instant) -> RefreshFlags {
        RefreshFlags {
            activities: self.is_refreshing(Step::Activities, now),
            accommodation: self.is_refreshing(Step::Accommodation, now),
            transportation: self.is_refreshing(Step::Transportation, now),
        }
    }

    /// Clear every expired deadline, returning the steps that settled.
    pub fn settle(&mut self, now: Instant) -> StepSet {
        let mut settled = StepSet::EMPTY;
        for (index, slot) in self.deadlines.iter_mut().enumerate() {
            if slot.is_some_and(|deadline| now >= deadline) {
                *slot = None;
                if let Some(step) = step_at(index) {
                    settled = settled.with(step);
                }
            }
        }
        settled
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().flatten().min().copied()
    }
}

fn step_at(index: usize) -> Option<Step> {
    match index {
        0 => Some(Step::Activities),
        1 => Some(Step::Accommodation),
        2 => Some(Step::Transportation),
        _ => None,
    }
}
