//! Assignment auditing.
//!
//! Re-checks a duty assignment table against every rule, independently of
//! how the table was produced — solver output, greedy fallback, a manually
//! edited table, or rows re-imported from an external summary. All checks
//! always run so the caller sees the full picture:
//!
//! - Unavailability conflicts
//! - Quota overruns
//! - Group cohesion (all members together or none)
//! - Required headcount per scheduled slot
//! - Same-day double-booking (more than one row on one date)
//!
//! Double-booking is special: the solver never generates it, so its
//! appearance signals manual editing. It is reported like everything else
//! but also itemized separately, and excluded from
//! [`ValidationReport::hard_violations`], so callers can downgrade it to a
//! warning instead of blocking acceptance.

use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::models::{DutyAssignment, ExamDay, Faculty, FacultyGroup, Shift, UnavailabilityMap};

/// Categories of assignment rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// A member serves a (date, shift) they declared blocked.
    Unavailability,
    /// A member's duty count exceeds their quota.
    QuotaExceeded,
    /// Part of a group serves a slot without the rest.
    GroupSplit,
    /// A slot's row count differs from its requirement.
    HeadcountMismatch,
    /// A member appears more than once on one date (soft).
    DoubleBooking,
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A (faculty, date) pair with more than one duty row on that date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleBooking {
    /// The doubly booked member.
    pub faculty: String,
    /// The date served twice.
    pub date: NaiveDate,
}

/// Full audit result.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Every violation found, in check order.
    pub violations: Vec<Violation>,
    /// The double-booked pairs, itemized for severity downgrading.
    pub double_bookings: Vec<DoubleBooking>,
}

impl ValidationReport {
    /// Whether no check produced a violation of any kind.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations that should block silent acceptance — everything except
    /// the soft double-booking class.
    pub fn hard_violations(&self) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.kind != ViolationKind::DoubleBooking)
            .collect()
    }

    /// All violation messages, in check order.
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }
}

/// Audits an assignment against the roster, unavailability, groups, and
/// schedule. Every check runs; nothing short-circuits.
pub fn validate(
    assignment: &DutyAssignment,
    roster: &[Faculty],
    unavailability: &UnavailabilityMap,
    groups: &[FacultyGroup],
    schedule: &[ExamDay],
) -> ValidationReport {
    let mut report = ValidationReport::default();

    // lookup: slot → names assigned there
    let by_slot = assignment
        .rows
        .iter()
        .map(|r| ((r.date, r.shift), r.faculty.as_str()))
        .into_group_map();

    // 1. Unavailability conflicts, in row order.
    for row in &assignment.rows {
        if unavailability.is_unavailable(&row.faculty, row.date, row.shift) {
            report.violations.push(Violation::new(
                ViolationKind::Unavailability,
                format!(
                    "{} is assigned on {} {} but marked as unavailable",
                    row.faculty,
                    row.date.format("%d-%m-%Y"),
                    row.shift
                ),
            ));
        }
    }

    // 2. Quota overruns, in roster order.
    let counts = assignment.duty_counts();
    for faculty in roster {
        let count = counts.get(&faculty.name).copied().unwrap_or(0);
        if count > faculty.max_duties {
            report.violations.push(Violation::new(
                ViolationKind::QuotaExceeded,
                format!(
                    "{} has {} duties assigned, exceeding maximum of {}",
                    faculty.name, count, faculty.max_duties
                ),
            ));
        }
    }

    // 3. Group cohesion: per group, per slot where any member appears.
    let mut seen_slots: Vec<(NaiveDate, Shift)> = Vec::new();
    let mut seen: HashSet<(NaiveDate, Shift)> = HashSet::new();
    for row in &assignment.rows {
        if seen.insert((row.date, row.shift)) {
            seen_slots.push((row.date, row.shift));
        }
    }
    for group in groups {
        let members = group.sorted_members();
        for &(date, shift) in &seen_slots {
            let names = &by_slot[&(date, shift)];
            let present = members
                .iter()
                .filter(|m| names.contains(&m.as_str()))
                .count();
            if present > 0 && present < members.len() {
                report.violations.push(Violation::new(
                    ViolationKind::GroupSplit,
                    format!(
                        "group {} not assigned together on {} {}",
                        group.members.join(", "),
                        date.format("%d-%m-%Y"),
                        shift
                    ),
                ));
            }
        }
    }

    // 4. Required headcount, in schedule order. Zero-requirement halves
    // are checked too: a row landing there is a mismatch.
    for day in schedule {
        for shift in [Shift::FirstHalf, Shift::SecondHalf] {
            let required = day.required_for(shift);
            let assigned = by_slot
                .get(&(day.date, shift))
                .map(|names| names.len() as u32)
                .unwrap_or(0);
            if assigned != required {
                report.violations.push(Violation::new(
                    ViolationKind::HeadcountMismatch,
                    format!(
                        "{} faculty assigned on {} {}, required: {}",
                        assigned,
                        day.date.format("%d-%m-%Y"),
                        shift,
                        required
                    ),
                ));
            }
        }
    }

    // 5. Same-day double-booking, in roster order, dates ascending.
    // Counts rows per date rather than distinct halves, so a member
    // duplicated within one slot (possible in re-imported tables) is
    // caught here too.
    for faculty in roster {
        let mut per_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for row in assignment.rows.iter().filter(|r| r.faculty == faculty.name) {
            *per_date.entry(row.date).or_insert(0) += 1;
        }
        for (date, _) in per_date.into_iter().filter(|&(_, count)| count > 1) {
            report.violations.push(Violation::new(
                ViolationKind::DoubleBooking,
                format!(
                    "{} is assigned to both shifts on {}",
                    faculty.name,
                    date.format("%d-%m-%Y")
                ),
            ));
            report.double_bookings.push(DoubleBooking {
                faculty: faculty.name.clone(),
                date,
            });
        }
    }

    report
}
