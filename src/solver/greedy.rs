//! Single-pass greedy fallback.
//!
//! Used when the exhaustive search proves no complete assignment exists.
//! Walks the same difficulty-sorted slot order with the same
//! load-balancing unit order, takes the first units that fit each slot's
//! remaining headcount, and never backtracks. Slots that cannot be
//! filled are recorded and the pass continues.
//!
//! Best effort, not maximal: a unit spent early may starve a later slot
//! that only it could serve. The result is still valid against every
//! per-member rule and is reproducible for identical inputs.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use super::search::{available_units, ordered_slots, SearchContext, SearchState};
use crate::catalog::AssignmentUnit;
use crate::models::{DutyAssignment, DutyRow, ExamDay, Faculty, Shift, UnavailabilityMap};

/// A slot the greedy pass could not fill to its requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnderfilledSlot {
    /// Exam date.
    pub date: NaiveDate,
    /// Shift half.
    pub shift: Shift,
    /// Invigilators required.
    pub required: u32,
    /// Invigilators actually placed.
    pub assigned: u32,
}

/// Fills as much of the schedule as a single forward pass allows.
///
/// Returns the partial assignment and the slots left under requirement.
/// An entirely empty assignment means the pass made no progress at all.
pub fn solve_greedy(
    units: &[AssignmentUnit],
    roster: &[Faculty],
    unavailability: &UnavailabilityMap,
    schedule: &[ExamDay],
) -> (DutyAssignment, Vec<UnderfilledSlot>) {
    let ctx = SearchContext::new(units, roster, unavailability);
    let slots = ordered_slots(&ctx, schedule);

    let mut state = SearchState::new();
    let mut rows = Vec::new();
    let mut underfilled = Vec::new();

    for slot in &slots {
        let available = available_units(&ctx, &state, slot.date, slot.shift);
        let mut remaining = slot.required;
        for unit in available {
            if remaining == 0 {
                break;
            }
            if unit.size() > remaining {
                continue;
            }
            if unit
                .members()
                .iter()
                .any(|m| state.is_occupied(slot.date, slot.shift, m))
            {
                continue;
            }
            state.commit(unit, slot.date, slot.shift);
            for member in unit.members() {
                rows.push(DutyRow::new(slot.date, slot.shift, member));
            }
            remaining -= unit.size();
        }
        if remaining > 0 {
            debug!(
                "greedy: underfilled {} {}: required {}, assigned {}",
                slot.date.format("%d-%m-%Y"),
                slot.shift,
                slot.required,
                slot.required - remaining
            );
            underfilled.push(UnderfilledSlot {
                date: slot.date,
                shift: slot.shift,
                required: slot.required,
                assigned: slot.required - remaining,
            });
        }
    }

    (DutyAssignment::from_rows(rows), underfilled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::models::FacultyGroup;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn roster(quotas: &[(&str, u32)]) -> Vec<Faculty> {
        quotas
            .iter()
            .map(|(n, q)| Faculty::new(*n).with_max_duties(*q))
            .collect()
    }

    #[test]
    fn test_fills_what_it_can() {
        // demand 6, capacity 4: every slot gets as much as remains
        let roster = roster(&[("A", 1), ("B", 1), ("C", 1), ("D", 1)]);
        let units = build_catalog(&roster, &[]).unwrap();
        let schedule = vec![ExamDay::new(d(10), 2, 2), ExamDay::new(d(11), 2, 0)];

        let (assignment, underfilled) =
            solve_greedy(&units, &roster, &UnavailabilityMap::new(), &schedule);
        assert_eq!(assignment.len(), 4);
        assert_eq!(underfilled.len(), 1);
        assert_eq!(underfilled[0].required, 2);
        assert_eq!(underfilled[0].assigned, 0);
    }

    #[test]
    fn test_underfill_does_not_abort_later_slots() {
        // the impossible middle slot must not stop the pass
        let roster = roster(&[("A", 2), ("B", 2)]);
        let mut unavail = UnavailabilityMap::new();
        unavail.mark("A", Shift::SecondHalf, d(10));
        unavail.mark("B", Shift::SecondHalf, d(10));
        let units = build_catalog(&roster, &[]).unwrap();
        let schedule = vec![ExamDay::new(d(10), 2, 1), ExamDay::new(d(11), 2, 0)];

        let (assignment, underfilled) = solve_greedy(&units, &roster, &unavail, &schedule);
        assert_eq!(
            underfilled,
            vec![UnderfilledSlot {
                date: d(10),
                shift: Shift::SecondHalf,
                required: 1,
                assigned: 0,
            }]
        );
        assert_eq!(assignment.faculty_for_slot(d(10), Shift::FirstHalf).len(), 2);
        assert_eq!(assignment.faculty_for_slot(d(11), Shift::FirstHalf).len(), 2);
    }

    #[test]
    fn test_respects_member_rules() {
        let roster = roster(&[("A", 1), ("B", 3), ("C", 3)]);
        let mut unavail = UnavailabilityMap::new();
        unavail.mark("C", Shift::FirstHalf, d(10));
        let units = build_catalog(&roster, &[]).unwrap();
        let schedule = vec![ExamDay::new(d(10), 2, 2)];

        let (assignment, _) = solve_greedy(&units, &roster, &unavail, &schedule);
        assert!(!assignment.is_assigned("C", d(10), Shift::FirstHalf));
        for (name, count) in assignment.duty_counts() {
            let quota = roster.iter().find(|f| f.name == name).unwrap().max_duties;
            assert!(count <= quota);
        }
        // nobody on both halves
        for f in ["A", "B", "C"] {
            assert!(
                !(assignment.is_assigned(f, d(10), Shift::FirstHalf)
                    && assignment.is_assigned(f, d(10), Shift::SecondHalf))
            );
        }
    }

    #[test]
    fn test_oversized_group_left_out() {
        // slot needs 1; the pair is skipped, the single serves, and the
        // slot is complete
        let roster = roster(&[("A", 1), ("B", 1), ("C", 1)]);
        let groups = vec![FacultyGroup::new(["A", "B"])];
        let units = build_catalog(&roster, &groups).unwrap();
        let schedule = vec![ExamDay::new(d(10), 1, 0)];

        let (assignment, underfilled) =
            solve_greedy(&units, &roster, &UnavailabilityMap::new(), &schedule);
        assert!(underfilled.is_empty());
        assert_eq!(assignment.faculty_for_slot(d(10), Shift::FirstHalf), vec!["C"]);
    }

    #[test]
    fn test_no_progress_returns_empty() {
        let roster = roster(&[("A", 0)]);
        let units = build_catalog(&roster, &[]).unwrap();
        let schedule = vec![ExamDay::new(d(10), 1, 0)];

        let (assignment, underfilled) =
            solve_greedy(&units, &roster, &UnavailabilityMap::new(), &schedule);
        assert!(assignment.is_empty());
        assert_eq!(underfilled.len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let roster = roster(&[("A", 1), ("B", 1), ("C", 1)]);
        let units = build_catalog(&roster, &[]).unwrap();
        let schedule = vec![ExamDay::new(d(10), 2, 2)];

        let first = solve_greedy(&units, &roster, &UnavailabilityMap::new(), &schedule);
        let second = solve_greedy(&units, &roster, &UnavailabilityMap::new(), &schedule);
        assert_eq!(first, second);
    }
}
