//! Exhaustive backtracking search.
//!
//! # Algorithm
//!
//! 1. Expand the schedule into slots and sort them by *difficulty* —
//!    the number of units currently placeable in each slot, ascending —
//!    so the most constrained slot is decided first. Ties keep schedule
//!    order (stable sort).
//! 2. For each slot, list the placeable units sorted by the members'
//!    current duty load (ascending, stable), then pick units whose
//!    member counts sum to exactly the slot's requirement.
//! 3. Commit each pick into the search state, recurse, and undo the
//!    commit exactly on backtrack.
//!
//! A unit is placeable in (date, shift) iff every member is not blocked
//! for that half, has remaining quota, and does not already serve the
//! other half of the same date. Everything — slot order, unit order,
//! pick enumeration — is deterministic, so identical inputs always yield
//! the identical first solution.
//!
//! # Reference
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach",
//! Ch. 6: backtracking search, minimum-remaining-values ordering.

use chrono::NaiveDate;
use log::debug;
use std::collections::{HashMap, HashSet};

use crate::catalog::AssignmentUnit;
use crate::models::{
    expand_slots, DutyAssignment, DutyRow, ExamDay, Faculty, Shift, Slot, UnavailabilityMap,
};

/// Immutable inputs shared by every recursion level.
pub(super) struct SearchContext<'a> {
    units: &'a [AssignmentUnit],
    quotas: HashMap<&'a str, u32>,
    unavailability: &'a UnavailabilityMap,
}

impl<'a> SearchContext<'a> {
    pub(super) fn new(
        units: &'a [AssignmentUnit],
        roster: &'a [Faculty],
        unavailability: &'a UnavailabilityMap,
    ) -> Self {
        Self {
            units,
            quotas: roster.iter().map(|f| (f.name.as_str(), f.max_duties)).collect(),
            unavailability,
        }
    }

    fn quota(&self, name: &str) -> u32 {
        self.quotas.get(name).copied().unwrap_or(0)
    }
}

/// Mutable search state: duty counts and slot occupancy.
///
/// Every `commit` is paired with an `undo` on the backtrack path, so the
/// state is exactly restored when a branch is abandoned. Local to one
/// solve call — nothing leaks between runs.
pub(super) struct SearchState {
    duty_counts: HashMap<String, u32>,
    occupied: HashMap<(NaiveDate, Shift), HashSet<String>>,
}

impl SearchState {
    pub(super) fn new() -> Self {
        Self {
            duty_counts: HashMap::new(),
            occupied: HashMap::new(),
        }
    }

    fn duty_count(&self, name: &str) -> u32 {
        self.duty_counts.get(name).copied().unwrap_or(0)
    }

    /// Combined duty load of a unit's members.
    pub(super) fn unit_load(&self, unit: &AssignmentUnit) -> u32 {
        unit.members().iter().map(|m| self.duty_count(m)).sum()
    }

    pub(super) fn is_occupied(&self, date: NaiveDate, shift: Shift, name: &str) -> bool {
        self.occupied
            .get(&(date, shift))
            .map(|names| names.contains(name))
            .unwrap_or(false)
    }

    pub(super) fn commit(&mut self, unit: &AssignmentUnit, date: NaiveDate, shift: Shift) {
        for member in unit.members() {
            *self.duty_counts.entry(member.clone()).or_insert(0) += 1;
            self.occupied
                .entry((date, shift))
                .or_default()
                .insert(member.clone());
        }
    }

    pub(super) fn undo(&mut self, unit: &AssignmentUnit, date: NaiveDate, shift: Shift) {
        for member in unit.members() {
            if let Some(count) = self.duty_counts.get_mut(member) {
                *count -= 1;
            }
            if let Some(names) = self.occupied.get_mut(&(date, shift)) {
                names.remove(member);
            }
        }
    }
}

/// Whether every member of the unit can serve (date, shift): not blocked,
/// under quota, and not on the other half of the same date.
pub(super) fn unit_is_available(
    ctx: &SearchContext<'_>,
    state: &SearchState,
    unit: &AssignmentUnit,
    date: NaiveDate,
    shift: Shift,
) -> bool {
    unit.members().iter().all(|member| {
        !ctx.unavailability.is_unavailable(member, date, shift)
            && state.duty_count(member) < ctx.quota(member)
            && !state.is_occupied(date, shift.other(), member)
    })
}

/// Units placeable in (date, shift), sorted by ascending member duty load.
/// The sort is stable, so ties keep catalog order.
pub(super) fn available_units<'a>(
    ctx: &SearchContext<'a>,
    state: &SearchState,
    date: NaiveDate,
    shift: Shift,
) -> Vec<&'a AssignmentUnit> {
    let mut available: Vec<&AssignmentUnit> = ctx
        .units
        .iter()
        .filter(|u| unit_is_available(ctx, state, u, date, shift))
        .collect();
    available.sort_by_key(|u| state.unit_load(u));
    available
}

/// Slots sorted most-constrained-first: ascending count of units placeable
/// against a fresh state. Ties keep schedule order.
pub(super) fn ordered_slots(ctx: &SearchContext<'_>, schedule: &[ExamDay]) -> Vec<Slot> {
    let fresh = SearchState::new();
    let mut slots = expand_slots(schedule);
    slots.sort_by_key(|slot| {
        ctx.units
            .iter()
            .filter(|u| unit_is_available(ctx, &fresh, u, slot.date, slot.shift))
            .count()
    });
    slots
}

/// Searches for a complete assignment.
///
/// Returns the first solution in the deterministic search order, or
/// `None` when the space is exhausted. Worst case is combinatorial; a
/// production deployment wanting a bound should add an iteration budget
/// and fail over to [`solve_greedy`](super::solve_greedy).
pub fn solve_exhaustive(
    units: &[AssignmentUnit],
    roster: &[Faculty],
    unavailability: &UnavailabilityMap,
    schedule: &[ExamDay],
) -> Option<DutyAssignment> {
    let ctx = SearchContext::new(units, roster, unavailability);
    let slots = ordered_slots(&ctx, schedule);
    debug!(
        "exhaustive search over {} slots, {} units",
        slots.len(),
        units.len()
    );

    let mut state = SearchState::new();
    let mut rows = Vec::new();
    if fill_from(&ctx, &mut state, &slots, 0, &mut rows) {
        Some(DutyAssignment::from_rows(rows))
    } else {
        None
    }
}

fn fill_from(
    ctx: &SearchContext<'_>,
    state: &mut SearchState,
    slots: &[Slot],
    index: usize,
    rows: &mut Vec<DutyRow>,
) -> bool {
    let Some(slot) = slots.get(index) else {
        return true;
    };
    let available = available_units(ctx, state, slot.date, slot.shift);
    pick_units(ctx, state, slots, index, *slot, &available, 0, slot.required, rows)
}

/// Picks units for one slot until their member counts sum to `remaining`,
/// scanning `available` from `start` so each unit is considered at most
/// once per slot. Commits are undone on the backtrack path.
#[allow(clippy::too_many_arguments)]
fn pick_units(
    ctx: &SearchContext<'_>,
    state: &mut SearchState,
    slots: &[Slot],
    index: usize,
    slot: Slot,
    available: &[&AssignmentUnit],
    start: usize,
    remaining: u32,
    rows: &mut Vec<DutyRow>,
) -> bool {
    if remaining == 0 {
        return fill_from(ctx, state, slots, index + 1, rows);
    }
    for (offset, &unit) in available[start..].iter().enumerate() {
        if unit.size() > remaining {
            continue;
        }
        // units never share members after catalog validation, but an
        // already-placed member would silently double-fill the slot
        if unit
            .members()
            .iter()
            .any(|m| state.is_occupied(slot.date, slot.shift, m))
        {
            continue;
        }
        state.commit(unit, slot.date, slot.shift);
        let mark = rows.len();
        for member in unit.members() {
            rows.push(DutyRow::new(slot.date, slot.shift, member));
        }
        if pick_units(
            ctx,
            state,
            slots,
            index,
            slot,
            available,
            start + offset + 1,
            remaining - unit.size(),
            rows,
        ) {
            return true;
        }
        rows.truncate(mark);
        state.undo(unit, slot.date, slot.shift);
    }
    false
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

    fn units(roster: &[Faculty], groups: &[FacultyGroup]) -> Vec<AssignmentUnit> {
        build_catalog(roster, groups).unwrap()
    }

    #[test]
    fn test_simple_complete_assignment() {
        let roster = roster(&[("A", 3), ("B", 3), ("C", 3), ("D", 3), ("E", 3)]);
        let units = units(&roster, &[]);
        let schedule = vec![ExamDay::new(d(10), 2, 2), ExamDay::new(d(11), 2, 2)];

        let assignment =
            solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &schedule).unwrap();
        assert_eq!(assignment.len(), 8);
        for day in &schedule {
            for shift in [Shift::FirstHalf, Shift::SecondHalf] {
                assert_eq!(assignment.faculty_for_slot(day.date, shift).len(), 2);
            }
        }
    }

    #[test]
    fn test_quota_respected() {
        let roster = roster(&[("A", 1), ("B", 1), ("C", 1), ("D", 1)]);
        let units = units(&roster, &[]);
        let schedule = vec![ExamDay::new(d(10), 2, 2)];

        let assignment =
            solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &schedule).unwrap();
        for (name, count) in assignment.duty_counts() {
            let quota = roster.iter().find(|f| f.name == name).unwrap().max_duties;
            assert!(count <= quota, "{name} over quota");
        }
    }

    #[test]
    fn test_no_member_on_both_halves() {
        let roster = roster(&[("A", 2), ("B", 2), ("C", 2), ("D", 2)]);
        let units = units(&roster, &[]);
        let schedule = vec![ExamDay::new(d(10), 2, 2)];

        let assignment =
            solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &schedule).unwrap();
        for f in ["A", "B", "C", "D"] {
            let both = assignment.is_assigned(f, d(10), Shift::FirstHalf)
                && assignment.is_assigned(f, d(10), Shift::SecondHalf);
            assert!(!both, "{f} serves both halves");
        }
    }

    #[test]
    fn test_same_day_exclusion_forces_failure() {
        // one member with quota 2 cannot cover both halves of one day
        let roster = roster(&[("A", 2)]);
        let units = units(&roster, &[]);
        let schedule = vec![ExamDay::new(d(10), 1, 1)];

        assert!(solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &schedule).is_none());
    }

    #[test]
    fn test_unavailability_respected() {
        let roster = roster(&[("A", 4), ("B", 4), ("C", 4)]);
        let mut unavail = UnavailabilityMap::new();
        unavail.mark("A", Shift::FirstHalf, d(10));
        let units = units(&roster, &[]);
        let schedule = vec![ExamDay::new(d(10), 2, 2)];

        let assignment = solve_exhaustive(&units, &roster, &unavail, &schedule).unwrap();
        assert!(!assignment.is_assigned("A", d(10), Shift::FirstHalf));
    }

    #[test]
    fn test_tight_capacity_uses_everyone_fully() {
        // 4 members, quota 2 each = 8 capacity for 8 duties: every quota
        // must be exactly consumed
        let roster = roster(&[("A", 2), ("B", 2), ("C", 2), ("D", 2)]);
        let units = units(&roster, &[]);
        let schedule = vec![ExamDay::new(d(10), 2, 2), ExamDay::new(d(11), 2, 2)];

        let assignment =
            solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &schedule).unwrap();
        let counts = assignment.duty_counts();
        for f in ["A", "B", "C", "D"] {
            assert_eq!(counts[f], 2, "{f} must be fully used");
        }
    }

    #[test]
    fn test_group_fills_slot_exactly() {
        // group of 3 plus 2 singles, quota 1, one slot needing 3:
        // the whole group serves, the singles stay home
        let roster = roster(&[("A", 1), ("B", 1), ("C", 1), ("D", 1), ("E", 1)]);
        let groups = vec![FacultyGroup::new(["A", "B", "C"])];
        let units = units(&roster, &groups);
        let schedule = vec![ExamDay::new(d(10), 3, 0)];

        let assignment =
            solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &schedule).unwrap();
        let mut slot: Vec<&str> = assignment.faculty_for_slot(d(10), Shift::FirstHalf);
        slot.sort();
        assert_eq!(slot, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_group_never_split() {
        let roster = roster(&[("A", 2), ("B", 2), ("C", 2), ("D", 2)]);
        let groups = vec![FacultyGroup::new(["A", "B"])];
        let units = units(&roster, &groups);
        let schedule = vec![ExamDay::new(d(10), 2, 2), ExamDay::new(d(11), 2, 0)];

        let assignment =
            solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &schedule).unwrap();
        for day in [d(10), d(11)] {
            for shift in [Shift::FirstHalf, Shift::SecondHalf] {
                let slot = assignment.faculty_for_slot(day, shift);
                let a = slot.contains(&"A");
                let b = slot.contains(&"B");
                assert_eq!(a, b, "group split on {day} {shift}");
            }
        }
    }

    #[test]
    fn test_group_too_big_for_slot_is_skipped() {
        // slot needs 1; the pair cannot squeeze in, the single serves
        let roster = roster(&[("A", 1), ("B", 1), ("C", 1)]);
        let groups = vec![FacultyGroup::new(["A", "B"])];
        let units = units(&roster, &groups);
        let schedule = vec![ExamDay::new(d(10), 1, 0)];

        let assignment =
            solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &schedule).unwrap();
        assert_eq!(assignment.faculty_for_slot(d(10), Shift::FirstHalf), vec!["C"]);
    }

    #[test]
    fn test_no_solution_reported() {
        // one slot needs 2 but only B is free that morning
        let roster = roster(&[("A", 1), ("B", 1)]);
        let mut unavail = UnavailabilityMap::new();
        unavail.mark("A", Shift::FirstHalf, d(10));
        let units = units(&roster, &[]);
        let schedule = vec![ExamDay::new(d(10), 2, 0)];

        assert!(solve_exhaustive(&units, &roster, &unavail, &schedule).is_none());
    }

    #[test]
    fn test_backtracking_recovers_from_bad_first_choice() {
        // day 11 is tried first (fewer options) and takes E, the only
        // single that can complete day 10's group packing; day 10 then has
        // no way to sum to 3, so the search must back out and give day 11
        // F instead
        let roster = roster(&[("A", 1), ("B", 1), ("C", 1), ("D", 1), ("E", 1), ("F", 1)]);
        let groups = vec![FacultyGroup::new(["A", "B"]), FacultyGroup::new(["C", "D"])];
        let mut unavail = UnavailabilityMap::new();
        unavail.mark("F", Shift::FirstHalf, d(10));
        for blocked in ["A", "B", "C", "D"] {
            unavail.mark(blocked, Shift::FirstHalf, d(11));
        }
        let units = units(&roster, &groups);
        let schedule = vec![ExamDay::new(d(10), 3, 0), ExamDay::new(d(11), 1, 0)];

        let assignment = solve_exhaustive(&units, &roster, &unavail, &schedule).unwrap();
        assert_eq!(assignment.faculty_for_slot(d(11), Shift::FirstHalf), vec!["F"]);
        let mut day10: Vec<&str> = assignment.faculty_for_slot(d(10), Shift::FirstHalf);
        day10.sort();
        assert_eq!(day10, vec!["A", "B", "E"]);
    }

    #[test]
    fn test_deterministic_output() {
        let roster = roster(&[("A", 2), ("B", 2), ("C", 2), ("D", 2), ("E", 2)]);
        let groups = vec![FacultyGroup::new(["D", "E"])];
        let units = units(&roster, &groups);
        let schedule = vec![ExamDay::new(d(10), 2, 2), ExamDay::new(d(11), 2, 1)];

        let first =
            solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &schedule).unwrap();
        let second =
            solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &schedule).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_schedule_yields_empty_assignment() {
        let roster = roster(&[("A", 1)]);
        let units = units(&roster, &[]);
        let assignment =
            solve_exhaustive(&units, &roster, &UnavailabilityMap::new(), &[]).unwrap();
        assert!(assignment.is_empty());
    }
}
