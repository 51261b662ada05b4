//! Faculty group model.
//!
//! A group is a cohort of faculty who serve together or not at all: on any
//! (date, shift) either every member is assigned or none is. Groups are
//! treated as indivisible units by the catalog builder and solver.

use serde::{Deserialize, Serialize};

/// An all-or-nothing cohort of faculty (two or more members).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyGroup {
    /// Member names, as configured.
    pub members: Vec<String>,
}

impl FacultyGroup {
    /// Creates a group from member names.
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the group contains the given faculty.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Member names sorted and deduplicated, for stable unit comparison.
    pub fn sorted_members(&self) -> Vec<String> {
        let mut members = self.members.clone();
        members.sort();
        members.dedup();
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let g = FacultyGroup::new(["Rao", "Sen"]);
        assert!(g.contains("Rao"));
        assert!(!g.contains("Bose"));
    }

    #[test]
    fn test_sorted_members_is_stable() {
        let a = FacultyGroup::new(["Sen", "Rao"]);
        let b = FacultyGroup::new(["Rao", "Sen"]);
        assert_eq!(a.sorted_members(), b.sorted_members());
    }

    #[test]
    fn test_sorted_members_dedupes() {
        let g = FacultyGroup::new(["Rao", "Rao", "Sen"]);
        assert_eq!(g.sorted_members(), vec!["Rao".to_string(), "Sen".to_string()]);
    }
}
