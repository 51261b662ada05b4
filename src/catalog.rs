//! Assignable-unit catalog.
//!
//! Converts a roster and its groups into the atoms the solver places:
//! every group becomes one multi-member unit, every ungrouped faculty a
//! singleton. Every roster member appears in exactly one unit — the
//! invariant the whole search rests on — so group configurations that
//! would break it (overlap, unknown members, undersized groups) are
//! rejected here as configuration errors instead of being allowed to
//! corrupt the search.
//!
//! Unit order is stable for identical inputs: groups in input order
//! (members sorted), then singletons in roster order. The solver's
//! determinism depends on this.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::models::{Faculty, FacultyGroup};

/// An indivisible assignment atom: one faculty member, or a whole group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentUnit {
    members: Vec<String>,
}

impl AssignmentUnit {
    /// Creates a group unit. Members are stored sorted.
    pub fn group(members: Vec<String>) -> Self {
        let mut members = members;
        members.sort();
        members.dedup();
        Self { members }
    }

    /// Creates a single-member unit.
    pub fn singleton(name: impl Into<String>) -> Self {
        Self {
            members: vec![name.into()],
        }
    }

    /// Member names (sorted for groups).
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Number of members.
    pub fn size(&self) -> u32 {
        self.members.len() as u32
    }

    /// Whether this unit is a multi-member group.
    pub fn is_group(&self) -> bool {
        self.members.len() > 1
    }
}

/// Group configuration errors detected while building the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A group has fewer than two distinct members.
    #[error("group [{}] needs at least 2 distinct members", .members.join(", "))]
    UndersizedGroup {
        /// The offending group's members as configured.
        members: Vec<String>,
    },
    /// A group names someone not on the roster.
    #[error("group member '{member}' is not on the faculty roster")]
    UnknownMember {
        /// The unknown name.
        member: String,
    },
    /// A faculty member appears in more than one group.
    #[error("faculty '{member}' belongs to more than one group")]
    OverlappingGroups {
        /// The doubly grouped name.
        member: String,
    },
}

/// Builds the unit catalog: all groups (members sorted, groups in input
/// order) followed by every ungrouped faculty as a singleton, in roster
/// order.
///
/// # Errors
/// Rejects groups with fewer than two distinct members, groups naming
/// faculty absent from the roster, and faculty grouped more than once.
pub fn build_catalog(
    roster: &[Faculty],
    groups: &[FacultyGroup],
) -> Result<Vec<AssignmentUnit>, CatalogError> {
    let roster_names: HashSet<&str> = roster.iter().map(|f| f.name.as_str()).collect();

    let mut units = Vec::with_capacity(groups.len() + roster.len());
    let mut grouped: HashSet<String> = HashSet::new();

    for group in groups {
        let members = group.sorted_members();
        if members.len() < 2 {
            return Err(CatalogError::UndersizedGroup {
                members: group.members.clone(),
            });
        }
        for member in &members {
            if !roster_names.contains(member.as_str()) {
                return Err(CatalogError::UnknownMember {
                    member: member.clone(),
                });
            }
            if !grouped.insert(member.clone()) {
                return Err(CatalogError::OverlappingGroups {
                    member: member.clone(),
                });
            }
        }
        units.push(AssignmentUnit::group(members));
    }

    for faculty in roster {
        if !grouped.contains(&faculty.name) {
            units.push(AssignmentUnit::singleton(&faculty.name));
        }
    }

    Ok(units)
}
