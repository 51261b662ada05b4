//! Support for interactive assignment editing.
//!
//! A manual editor changes one slot at a time against a *working*
//! assignment. This module answers the one engine-side question that
//! screen needs: who may be offered for a slot right now?
//!
//! Eligibility per member: not blocked for that (date, shift), not
//! serving the other half of the same date, and under quota counting the
//! whole working table. Members already occupying the slot stay offered
//! regardless — deselecting them must remain possible even when the
//! table around them is over quota.

use chrono::NaiveDate;

use crate::models::{DutyAssignment, Faculty, Shift, UnavailabilityMap};

/// Faculty offerable for (date, shift) against the working assignment,
/// sorted and deduplicated.
pub fn eligible_faculty(
    date: NaiveDate,
    shift: Shift,
    working: &DutyAssignment,
    roster: &[Faculty],
    unavailability: &UnavailabilityMap,
) -> Vec<String> {
    let counts = working.duty_counts();
    let mut eligible: Vec<String> = roster
        .iter()
        .filter(|f| {
            working.is_assigned(&f.name, date, shift)
                || (!unavailability.is_unavailable(&f.name, date, shift)
                    && !working.is_assigned(&f.name, date, shift.other())
                    && counts.get(&f.name).copied().unwrap_or(0) < f.max_duties)
        })
        .map(|f| f.name.clone())
        .collect();
    eligible.sort();
    eligible.dedup();
    eligible
}
