//! Group and group-collection models.
//!
//! A [`GroupSet`] is the fixed collection of capacity-bounded groups owned
//! by exactly one placement run. It answers admission queries (room left,
//! no excluded pair) and performs the only membership mutation in the
//! crate. A new run always starts from a fresh, empty set.

use serde::{Deserialize, Serialize};

use crate::graph::ExclusionRelation;

/// A size-bounded set of co-placed individuals.
///
/// Member order is insertion order; it carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Member identifiers.
    pub members: Vec<String>,
}

impl Group {
    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the given identifier is a member.
    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }
}

/// The fixed collection of groups for one placement run.
///
/// Capacity is uniform across groups. Admission checks never mutate;
/// [`GroupSet::place`] and [`GroupSet::place_unit`] are the only writers.
#[derive(Debug, Clone)]
pub struct GroupSet {
    groups: Vec<Group>,
    capacity: usize,
}

impl GroupSet {
    /// Creates `count` empty groups with the given per-group capacity.
    pub fn new(count: usize, capacity: usize) -> Self {
        Self {
            groups: vec![Group::default(); count],
            capacity,
        }
    }

    /// Number of groups.
    #[inline]
    pub fn count(&self) -> usize {
        self.groups.len()
    }

    /// Per-group capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Group at an index.
    #[inline]
    pub fn group(&self, index: usize) -> &Group {
        &self.groups[index]
    }

    /// Remaining capacity of a group.
    #[inline]
    pub fn remaining(&self, index: usize) -> usize {
        self.capacity - self.groups[index].len()
    }

    /// Whether a group can admit one individual: room for one more and no
    /// excluded pair with any current member.
    pub fn admits(&self, index: usize, id: &str, exclusions: &ExclusionRelation) -> bool {
        self.remaining(index) >= 1 && self.conflict_free(index, id, exclusions)
    }

    /// Whether a group can admit a whole unit: room for all of it, no
    /// excluded pair against current members, and no excluded pair inside
    /// the unit itself (a conflicted unit is unplaceable anywhere).
    pub fn admits_unit(&self, index: usize, unit: &[&str], exclusions: &ExclusionRelation) -> bool {
        self.remaining(index) >= unit.len()
            && unit
                .iter()
                .all(|id| self.conflict_free(index, id, exclusions))
            && !exclusions.has_internal_conflict(unit.iter().copied())
    }

    /// Adds one individual to a group.
    ///
    /// Callers check [`GroupSet::admits`] first; this performs no check.
    pub fn place(&mut self, index: usize, id: impl Into<String>) {
        self.groups[index].members.push(id.into());
    }

    /// Adds a whole unit to a group.
    pub fn place_unit(&mut self, index: usize, unit: &[&str]) {
        for id in unit {
            self.groups[index].members.push((*id).to_string());
        }
    }

    /// Consumes the set, yielding the final group list.
    pub fn into_groups(self) -> Vec<Group> {
        self.groups
    }

    fn conflict_free(&self, index: usize, id: &str, exclusions: &ExclusionRelation) -> bool {
        self.groups[index]
            .members
            .iter()
            .all(|member| !exclusions.is_excluded(member, id))
    }
}
