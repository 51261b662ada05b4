//! Exam schedule model: days, shift halves, and derived slots.
//!
//! An exam day carries a calendar date and the invigilator headcount
//! required in each half. A *slot* is the derived unit of demand: one
//! (date, shift) pair with a positive requirement. Slots, not days, are
//! what the solver fills.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half of an exam day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Shift {
    /// Morning session.
    FirstHalf,
    /// Afternoon session.
    SecondHalf,
}

impl Shift {
    /// The opposite half of the same day.
    pub fn other(self) -> Self {
        match self {
            Shift::FirstHalf => Shift::SecondHalf,
            Shift::SecondHalf => Shift::FirstHalf,
        }
    }

    /// Stable human label, as it appears in diagnostics and reports.
    pub fn label(self) -> &'static str {
        match self {
            Shift::FirstHalf => "First Half",
            Shift::SecondHalf => "Second Half",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One exam day with the required headcount per half.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDay {
    /// Calendar date (unique within a schedule).
    pub date: NaiveDate,
    /// Invigilators required in the first half.
    pub first_half: u32,
    /// Invigilators required in the second half.
    pub second_half: u32,
}

impl ExamDay {
    /// Creates an exam day.
    pub fn new(date: NaiveDate, first_half: u32, second_half: u32) -> Self {
        Self {
            date,
            first_half,
            second_half,
        }
    }

    /// Requirement for one half.
    pub fn required_for(&self, shift: Shift) -> u32 {
        match shift {
            Shift::FirstHalf => self.first_half,
            Shift::SecondHalf => self.second_half,
        }
    }

    /// Combined requirement across both halves.
    pub fn total_required(&self) -> u32 {
        self.first_half + self.second_half
    }
}

/// One unit of demand: a (date, shift) pair requiring `required` invigilators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Exam date.
    pub date: NaiveDate,
    /// Shift half.
    pub shift: Shift,
    /// Invigilators required.
    pub required: u32,
}

/// Expands a schedule into slots, in schedule order with the first half
/// before the second half of each day. Halves requiring zero invigilators
/// produce no slot.
pub fn expand_slots(schedule: &[ExamDay]) -> Vec<Slot> {
    let mut slots = Vec::new();
    for day in schedule {
        for shift in [Shift::FirstHalf, Shift::SecondHalf] {
            let required = day.required_for(shift);
            if required > 0 {
                slots.push(Slot {
                    date: day.date,
                    shift,
                    required,
                });
            }
        }
    }
    slots
}
