//! Duty assignment solving.
//!
//! Two strategies over the same assignable-unit catalog:
//!
//! - `solve_exhaustive`: most-constrained-slot-first backtracking that
//!   finds a complete assignment whenever one exists.
//! - `solve_greedy`: single forward pass, used as the fallback when the
//!   search proves the schedule unsatisfiable; reports underfilled slots.
//!
//! [`assign_duties`] wires them together behind the feasibility gate: an
//! infeasible schedule is rejected before any search runs.
//!
//! Both strategies are deterministic and synchronous. No time or
//! iteration budget is enforced; the search worst case is combinatorial.

mod greedy;
mod search;

pub use greedy::{solve_greedy, UnderfilledSlot};
pub use search::solve_exhaustive;

use log::info;

use crate::catalog::{build_catalog, CatalogError};
use crate::feasibility::{analyze, FeasibilityReport};
use crate::models::{DutyAssignment, ExamDay, Faculty, FacultyGroup, UnavailabilityMap};

/// Result of a full assignment run.
#[derive(Debug, Clone)]
pub enum SolverOutcome {
    /// Every slot filled to its requirement.
    Complete(DutyAssignment),
    /// Exhaustive search failed; the greedy pass placed what it could.
    Partial {
        /// Rows the greedy pass produced.
        assignment: DutyAssignment,
        /// Slots left under requirement.
        underfilled: Vec<UnderfilledSlot>,
    },
    /// Capacity pre-checks failed; no search was attempted.
    Infeasible(FeasibilityReport),
    /// Neither strategy placed a single duty.
    Exhausted,
}

/// Runs the full assignment pipeline: feasibility gate, exhaustive
/// search, greedy fallback.
///
/// # Errors
/// Returns a [`CatalogError`] when the group configuration is invalid
/// (overlapping, undersized, or unknown-member groups).
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use duty_roster::models::{ExamDay, Faculty, UnavailabilityMap};
/// use duty_roster::solver::{assign_duties, SolverOutcome};
///
/// let roster = vec![
///     Faculty::new("Rao").with_max_duties(2),
///     Faculty::new("Sen").with_max_duties(2),
/// ];
/// let schedule = vec![ExamDay::new(
///     NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     1,
///     1,
/// )];
///
/// let outcome = assign_duties(&roster, &UnavailabilityMap::new(), &[], &schedule).unwrap();
/// assert!(matches!(outcome, SolverOutcome::Complete(_)));
/// ```
pub fn assign_duties(
    roster: &[Faculty],
    unavailability: &UnavailabilityMap,
    groups: &[FacultyGroup],
    schedule: &[ExamDay],
) -> Result<SolverOutcome, CatalogError> {
    let units = build_catalog(roster, groups)?;

    let report = analyze(roster, unavailability, schedule);
    if !report.is_feasible() {
        info!("assignment aborted: schedule failed feasibility checks");
        return Ok(SolverOutcome::Infeasible(report));
    }

    info!(
        "searching: {} faculty, {} units, {} exam days",
        roster.len(),
        units.len(),
        schedule.len()
    );
    if let Some(assignment) = solve_exhaustive(&units, roster, unavailability, schedule) {
        info!("exhaustive search succeeded: {} rows", assignment.len());
        return Ok(SolverOutcome::Complete(assignment));
    }

    info!("exhaustive search exhausted, running greedy fallback");
    let (assignment, underfilled) = solve_greedy(&units, roster, unavailability, schedule);
    if assignment.is_empty() {
        info!("greedy fallback made no progress");
        return Ok(SolverOutcome::Exhausted);
    }
    info!(
        "greedy fallback placed {} rows, {} slot(s) underfilled",
        assignment.len(),
        underfilled.len()
    );
    Ok(SolverOutcome::Partial {
        assignment,
        underfilled,
    })
}
