//! Duty assignment (solution) model.
//!
//! An assignment is a flat table of (date, shift, faculty) rows — the form
//! the solver produces, the validator audits, and a manual editor mutates.
//! Each regeneration supersedes the previous table; nothing is merged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Shift;

/// One duty: a faculty member serving one (date, shift).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyRow {
    /// Exam date.
    pub date: NaiveDate,
    /// Shift half.
    pub shift: Shift,
    /// Assigned faculty name.
    pub faculty: String,
}

impl DutyRow {
    /// Creates a duty row.
    pub fn new(date: NaiveDate, shift: Shift, faculty: impl Into<String>) -> Self {
        Self {
            date,
            shift,
            faculty: faculty.into(),
        }
    }
}

/// A complete (or partial) duty assignment table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    /// Assignment rows, in production order.
    pub rows: Vec<DutyRow>,
}

impl DutyAssignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an assignment from rows.
    pub fn from_rows(rows: Vec<DutyRow>) -> Self {
        Self { rows }
    }

    /// Appends a row.
    pub fn push(&mut self, row: DutyRow) {
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Duty count per faculty name.
    pub fn duty_counts(&self) -> HashMap<String, u32> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for row in &self.rows {
            *counts.entry(row.faculty.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Duty count for one faculty member.
    pub fn count_for(&self, name: &str) -> u32 {
        self.rows.iter().filter(|r| r.faculty == name).count() as u32
    }

    /// Faculty names occupying one slot, in row order.
    pub fn faculty_for_slot(&self, date: NaiveDate, shift: Shift) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.date == date && r.shift == shift)
            .map(|r| r.faculty.as_str())
            .collect()
    }

    /// Whether the member occupies the given slot.
    pub fn is_assigned(&self, name: &str, date: NaiveDate, shift: Shift) -> bool {
        self.rows
            .iter()
            .any(|r| r.faculty == name && r.date == date && r.shift == shift)
    }

    /// Duty dates for one member in one shift half, ascending.
    pub fn dates_for(&self, name: &str, shift: Shift) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .rows
            .iter()
            .filter(|r| r.faculty == name && r.shift == shift)
            .map(|r| r.date)
            .collect();
        dates.sort();
        dates
    }
}
