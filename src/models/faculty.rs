//! Faculty (invigilator) model.
//!
//! A faculty member is the atomic assignee: a unique name and a duty quota.
//! Roster columns the engine does not interpret (phone, email, designation)
//! ride along as opaque attributes so a reporting layer can enrich
//! assignment rows by name lookup.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Duty quota applied when a roster entry does not specify one.
pub const DEFAULT_MAX_DUTIES: u32 = 3;

/// A faculty member available for invigilation duty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique identifier (trimmed, non-empty).
    pub name: String,
    /// Maximum number of duty rows this member may receive across the schedule.
    pub max_duties: u32,
    /// Uninterpreted roster columns (phone, email, designation, ...).
    pub attributes: HashMap<String, String>,
}

impl Faculty {
    /// Creates a faculty member with the default quota.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_duties: DEFAULT_MAX_DUTIES,
            attributes: HashMap::new(),
        }
    }

    /// Sets the duty quota.
    pub fn with_max_duties(mut self, max_duties: u32) -> Self {
        self.max_duties = max_duties;
        self
    }

    /// Adds an uninterpreted roster attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns a roster attribute, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Normalizes a roster: trims names, drops blank entries, drops duplicate
/// names keeping the first occurrence.
///
/// Returns the kept roster (input order preserved) and human-readable notes
/// describing what was removed. Quotas and attributes are untouched.
pub fn clean_roster(roster: Vec<Faculty>) -> (Vec<Faculty>, Vec<String>) {
    let mut kept = Vec::with_capacity(roster.len());
    let mut notes = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut blank = 0usize;

    for mut entry in roster {
        let trimmed = entry.name.trim().to_string();
        if trimmed.is_empty() {
            blank += 1;
            continue;
        }
        entry.name = trimmed;
        if !seen.insert(entry.name.clone()) {
            notes.push(format!("duplicate faculty name removed: {}", entry.name));
            continue;
        }
        kept.push(entry);
    }

    if blank > 0 {
        notes.push(format!("{blank} entry(ies) with missing names removed"));
    }
    (kept, notes)
}
