// Member roster: the two performer groups and their union.
//
// The groups must be non-empty and disjoint; `all()` is group A followed by
// group B, so iteration order is stable for seeded generation.

use crate::PoolError;
use serde::Deserialize;

/// One named group of performers.
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    /// Display label, e.g. the group's stage name.
    pub label: String,
    pub members: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    group_a: Group,
    group_b: Group,
}

/// Both groups plus their precomputed union.
#[derive(Debug, Clone)]
pub struct MemberRoster {
    group_a: Group,
    group_b: Group,
    all: Vec<String>,
}

impl MemberRoster {
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        let file: RosterFile = serde_json::from_str(json)?;
        Self::new(file.group_a, file.group_b)
    }

    /// Build a roster, rejecting empty or overlapping groups.
    pub fn new(group_a: Group, group_b: Group) -> Result<Self, PoolError> {
        for group in [&group_a, &group_b] {
            if group.members.is_empty() {
                return Err(PoolError::EmptyPool(format!("members.{}", group.label)));
            }
        }
        if let Some(dup) = group_a
            .members
            .iter()
            .find(|m| group_b.members.contains(m))
        {
            return Err(PoolError::OverlappingGroups(dup.clone()));
        }
        let all = group_a
            .members
            .iter()
            .chain(&group_b.members)
            .cloned()
            .collect();
        Ok(MemberRoster {
            group_a,
            group_b,
            all,
        })
    }

    pub fn group_a(&self) -> &Group {
        &self.group_a
    }

    pub fn group_b(&self) -> &Group {
        &self.group_b
    }

    /// Every member, group A first.
    pub fn all(&self) -> &[String] {
        &self.all
    }

    pub fn contains(&self, name: &str) -> bool {
        self.all.iter().any(|m| m == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(label: &str, members: &[&str]) -> Group {
        Group {
            label: label.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_roster_union_order() {
        let roster = MemberRoster::new(group("A", &["Jisoo", "Lisa"]), group("B", &["Asa"])).unwrap();
        assert_eq!(roster.all(), ["Jisoo", "Lisa", "Asa"]);
        assert!(roster.contains("Asa"));
        assert!(!roster.contains("asa"));
    }

    #[test]
    fn test_roster_rejects_overlap() {
        let err = MemberRoster::new(group("A", &["Jisoo", "Asa"]), group("B", &["Asa"])).unwrap_err();
        assert!(matches!(err, PoolError::OverlappingGroups(ref name) if name == "Asa"));
    }

    #[test]
    fn test_roster_rejects_empty_group() {
        let err = MemberRoster::new(group("A", &["Jisoo"]), group("B", &[])).unwrap_err();
        assert!(matches!(err, PoolError::EmptyPool(_)));
    }
}
