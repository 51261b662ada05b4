//! Faculty unavailability model.
//!
//! Records, per faculty member and per shift half, the dates on which that
//! member cannot serve. Faculty without an entry are available everywhere;
//! the map grows only when a date is marked.
//!
//! Date sets are ordered (`BTreeSet`) so iteration — and therefore every
//! diagnostic message derived from it — is deterministic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::Shift;

/// Blocked dates for one faculty member, split by shift half.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockedDates {
    /// Dates on which the first half is blocked.
    pub first_half: BTreeSet<NaiveDate>,
    /// Dates on which the second half is blocked.
    pub second_half: BTreeSet<NaiveDate>,
}

impl BlockedDates {
    /// Blocked dates for one shift half.
    pub fn for_shift(&self, shift: Shift) -> &BTreeSet<NaiveDate> {
        match shift {
            Shift::FirstHalf => &self.first_half,
            Shift::SecondHalf => &self.second_half,
        }
    }

    fn for_shift_mut(&mut self, shift: Shift) -> &mut BTreeSet<NaiveDate> {
        match shift {
            Shift::FirstHalf => &mut self.first_half,
            Shift::SecondHalf => &mut self.second_half,
        }
    }

    /// Total number of blocked (date, shift) pairs.
    pub fn total(&self) -> usize {
        self.first_half.len() + self.second_half.len()
    }
}

/// Per-faculty unavailability, keyed by faculty name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnavailabilityMap {
    entries: HashMap<String, BlockedDates>,
}

impl UnavailabilityMap {
    /// Creates an empty map (everyone available everywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a faculty member unavailable for one (date, shift).
    pub fn mark(&mut self, name: impl Into<String>, shift: Shift, date: NaiveDate) {
        self.entries
            .entry(name.into())
            .or_default()
            .for_shift_mut(shift)
            .insert(date);
    }

    /// Clears a previously marked (date, shift). No-op if absent.
    pub fn clear(&mut self, name: &str, shift: Shift, date: NaiveDate) {
        if let Some(blocked) = self.entries.get_mut(name) {
            blocked.for_shift_mut(shift).remove(&date);
        }
    }

    /// Whether the member is unavailable for the given date and shift half.
    pub fn is_unavailable(&self, name: &str, date: NaiveDate, shift: Shift) -> bool {
        self.entries
            .get(name)
            .map(|blocked| blocked.for_shift(shift).contains(&date))
            .unwrap_or(false)
    }

    /// Blocked dates for one member and shift half, ascending.
    pub fn blocked_dates(&self, name: &str, shift: Shift) -> Vec<NaiveDate> {
        self.entries
            .get(name)
            .map(|blocked| blocked.for_shift(shift).iter().copied().collect())
            .unwrap_or_default()
    }

    /// Total blocked (date, shift) pairs for one member.
    pub fn blocked_count(&self, name: &str) -> usize {
        self.entries.get(name).map(BlockedDates::total).unwrap_or(0)
    }
}
