//! Per-faculty duty aggregates.
//!
//! Computes the figures a duty chart report is built from: how many
//! duties each member carries in each half, on which dates, and what
//! they declared unavailable. Rendering (spreadsheets, documents) is the
//! reporting collaborator's job; this module only aggregates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DutyAssignment, Faculty, Shift, UnavailabilityMap};

/// Duty and unavailability aggregates for one faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultySummary {
    /// Faculty name.
    pub faculty: String,
    /// First-half duty count.
    pub first_half_duties: u32,
    /// Second-half duty count.
    pub second_half_duties: u32,
    /// Total duty count.
    pub total_duties: u32,
    /// First-half duty dates, ascending.
    pub first_half_dates: Vec<NaiveDate>,
    /// Second-half duty dates, ascending.
    pub second_half_dates: Vec<NaiveDate>,
    /// Declared first-half unavailable dates, ascending.
    pub first_half_unavailable: Vec<NaiveDate>,
    /// Declared second-half unavailable dates, ascending.
    pub second_half_unavailable: Vec<NaiveDate>,
    /// Total declared unavailable (date, shift) pairs.
    pub total_unavailable: u32,
}

impl FacultySummary {
    /// Computes one row per roster member, in roster order, assigned
    /// or not.
    pub fn calculate(
        roster: &[Faculty],
        assignment: &DutyAssignment,
        unavailability: &UnavailabilityMap,
    ) -> Vec<FacultySummary> {
        roster
            .iter()
            .map(|f| {
                let first_half_dates = assignment.dates_for(&f.name, Shift::FirstHalf);
                let second_half_dates = assignment.dates_for(&f.name, Shift::SecondHalf);
                FacultySummary {
                    faculty: f.name.clone(),
                    first_half_duties: first_half_dates.len() as u32,
                    second_half_duties: second_half_dates.len() as u32,
                    total_duties: (first_half_dates.len() + second_half_dates.len()) as u32,
                    first_half_dates,
                    second_half_dates,
                    first_half_unavailable: unavailability
                        .blocked_dates(&f.name, Shift::FirstHalf),
                    second_half_unavailable: unavailability
                        .blocked_dates(&f.name, Shift::SecondHalf),
                    total_unavailable: unavailability.blocked_count(&f.name) as u32,
                }
            })
            .collect()
    }
}

/// Advisory lines for members whose duties lean heavily into one half:
/// more than `(max_duties + 1) / 2` duties in a single half.
///
/// Advisory only — never part of validation.
pub fn half_balance_warnings(roster: &[Faculty], assignment: &DutyAssignment) -> Vec<String> {
    let mut warnings = Vec::new();
    for faculty in roster {
        let limit = (faculty.max_duties + 1) / 2;
        for shift in [Shift::FirstHalf, Shift::SecondHalf] {
            let count = assignment.dates_for(&faculty.name, shift).len() as u32;
            if count > limit {
                warnings.push(format!(
                    "{} has {} {} duties, exceeding the per-half limit of {}",
                    faculty.name, count, shift, limit
                ));
            }
        }
    }
    warnings
}
