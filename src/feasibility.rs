//! Pre-search feasibility analysis.
//!
//! Three necessary-condition checks, cheapest and most global first, each
//! contributing human-readable diagnostic lines:
//!
//! 1. **Global capacity** — total required duties vs. the sum of quotas.
//!    Failure aborts the analysis; the remaining checks are pointless.
//! 2. **Slot capacity** — per (date, shift), faculty not blocked for that
//!    half and holding a positive quota vs. the slot's requirement.
//! 3. **Day capacity** — per day, faculty blocked for *neither* half and
//!    holding a positive quota vs. the day's combined requirement. This
//!    deliberately ignores the one-half-per-day exclusion, so it is a
//!    looser filter than the search itself; the solver gives the
//!    authoritative answer.
//!
//! A failing report means the solver must not run. A passing report does
//! not guarantee a solution exists.

use log::debug;

use crate::models::{expand_slots, ExamDay, Faculty, Shift, UnavailabilityMap};

/// Outcome of the feasibility analysis.
#[derive(Debug, Clone)]
pub struct FeasibilityReport {
    /// Whether every check passed.
    pub feasible: bool,
    /// Ordered diagnostic lines, one or more per check performed.
    pub diagnostics: Vec<String>,
}

impl FeasibilityReport {
    /// Whether the schedule passed every capacity check.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }
}

/// Runs the capacity pre-checks against a schedule.
pub fn analyze(
    roster: &[Faculty],
    unavailability: &UnavailabilityMap,
    schedule: &[ExamDay],
) -> FeasibilityReport {
    let mut diagnostics = Vec::new();
    let slots = expand_slots(schedule);

    // 1. Global capacity.
    let total_required: u32 = slots.iter().map(|s| s.required).sum();
    let total_available: u32 = roster.iter().map(|f| f.max_duties).sum();
    diagnostics.push(format!("total required duties: {total_required}"));
    diagnostics.push(format!(
        "total available duties (sum of max duties): {total_available}"
    ));
    if total_required > total_available {
        diagnostics.push(
            "total required duties exceed total available duties; assignment is impossible"
                .to_string(),
        );
        debug!("feasibility: global capacity check failed ({total_required} > {total_available})");
        return FeasibilityReport {
            feasible: false,
            diagnostics,
        };
    }

    let mut feasible = true;

    // 2. Per-slot capacity.
    for slot in &slots {
        let available = roster
            .iter()
            .filter(|f| {
                !unavailability.is_unavailable(&f.name, slot.date, slot.shift) && f.max_duties > 0
            })
            .count() as u32;
        diagnostics.push(format!(
            "{} {}: required = {}, available = {}",
            slot.date.format("%d-%m-%Y"),
            slot.shift,
            slot.required,
            available
        ));
        if slot.required > available {
            diagnostics.push(format!(
                "not enough available faculty for {} {}: required {}, available {}",
                slot.date.format("%d-%m-%Y"),
                slot.shift,
                slot.required,
                available
            ));
            feasible = false;
        }
    }

    // 3. Per-day capacity (both-halves view).
    for day in schedule {
        let available = roster
            .iter()
            .filter(|f| {
                !unavailability.is_unavailable(&f.name, day.date, Shift::FirstHalf)
                    && !unavailability.is_unavailable(&f.name, day.date, Shift::SecondHalf)
                    && f.max_duties > 0
            })
            .count() as u32;
        diagnostics.push(format!(
            "{}: total required = {}, available = {}",
            day.date.format("%d-%m-%Y"),
            day.total_required(),
            available
        ));
        if day.total_required() > available {
            diagnostics.push(format!(
                "not enough available faculty for {}: required {}, available {}",
                day.date.format("%d-%m-%Y"),
                day.total_required(),
                available
            ));
            feasible = false;
        }
    }

    debug!(
        "feasibility: {} ({} diagnostic lines)",
        if feasible { "passed" } else { "failed" },
        diagnostics.len()
    );
    FeasibilityReport {
        feasible,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

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
    fn test_global_capacity_failure_short_circuits() {
        let roster = roster(&[("A", 1), ("B", 1)]);
        let schedule = vec![ExamDay::new(d(10), 2, 2)];

        let report = analyze(&roster, &UnavailabilityMap::new(), &schedule);
        assert!(!report.is_feasible());
        // aborted before the per-slot lines: totals plus the failure line only
        assert_eq!(report.diagnostics.len(), 3);
        assert!(report.diagnostics[2].contains("impossible"));
    }

    #[test]
    fn test_slot_capacity_failure() {
        // one day needing 3 in the first half, only 2 with positive quota
        let roster = roster(&[("A", 2), ("B", 2), ("C", 0)]);
        let schedule = vec![ExamDay::new(d(10), 3, 0)];

        let report = analyze(&roster, &UnavailabilityMap::new(), &schedule);
        assert!(!report.is_feasible());
        assert!(report
            .diagnostics
            .iter()
            .any(|m| m.contains("not enough available faculty for 10-03-2025 First Half")));
    }

    #[test]
    fn test_unavailability_reduces_slot_count() {
        let roster = roster(&[("A", 2), ("B", 2)]);
        let mut unavail = UnavailabilityMap::new();
        unavail.mark("A", Shift::FirstHalf, d(10));
        let schedule = vec![ExamDay::new(d(10), 2, 0)];

        let report = analyze(&roster, &unavail, &schedule);
        assert!(!report.is_feasible());
    }

    #[test]
    fn test_day_capacity_failure() {
        // each half individually coverable, but only two members free all day
        let mut unavail = UnavailabilityMap::new();
        unavail.mark("A", Shift::FirstHalf, d(10));
        unavail.mark("B", Shift::SecondHalf, d(10));
        let roster = roster(&[("A", 2), ("B", 2), ("C", 2), ("D", 2)]);
        let schedule = vec![ExamDay::new(d(10), 2, 2)];

        let report = analyze(&roster, &unavail, &schedule);
        assert!(!report.is_feasible());
        assert!(report
            .diagnostics
            .iter()
            .any(|m| m.contains("not enough available faculty for 10-03-2025:")));
    }

    #[test]
    fn test_feasible_schedule() {
        let roster = roster(&[("A", 3), ("B", 3), ("C", 3)]);
        let schedule = vec![ExamDay::new(d(10), 2, 2), ExamDay::new(d(11), 2, 2)];

        let report = analyze(&roster, &UnavailabilityMap::new(), &schedule);
        assert!(report.is_feasible());
        assert!(report.diagnostics[0].contains("total required duties: 8"));
    }

    #[test]
    fn test_empty_schedule_is_feasible() {
        let report = analyze(&roster(&[("A", 1)]), &UnavailabilityMap::new(), &[]);
        assert!(report.is_feasible());
    }
}
