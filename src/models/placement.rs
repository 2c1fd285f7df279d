//! Placement (solution) model.
//!
//! A placement maps individual identifiers to group indices and carries
//! the final group member lists. The mapping is partial: identifiers
//! absent from it are unplaced and listed separately, in input order.
//!
//! Invariants, upheld by the placement strategies and asserted in their
//! tests:
//! - no group exceeds its capacity;
//! - no group contains an excluded pair;
//! - every identifier is mapped to at most one group, and a mapped
//!   identifier appears in exactly that group's member list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Group;

/// The result of one placement run.
///
/// `assignments` uses a `BTreeMap` so serialized output is byte-stable,
/// which the determinism guarantee (same input, same seed, same result)
/// relies on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    /// Identifier → group index. Partial: unplaced identifiers are absent.
    pub assignments: BTreeMap<String, usize>,
    /// Final group member lists, indexed by group.
    pub groups: Vec<Group>,
    /// Per-group capacity this run was bounded by.
    pub capacity: usize,
    /// Identifiers left unplaced, in input order.
    pub unplaced: Vec<String>,
}

impl Placement {
    /// Group index for an identifier, if placed.
    #[inline]
    pub fn group_of(&self, id: &str) -> Option<usize> {
        self.assignments.get(id).copied()
    }

    /// Whether an identifier was placed.
    #[inline]
    pub fn is_placed(&self, id: &str) -> bool {
        self.assignments.contains_key(id)
    }

    /// Number of placed individuals.
    #[inline]
    pub fn placed_count(&self) -> usize {
        self.assignments.len()
    }

    /// Member counts per group.
    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(|g| g.len()).collect()
    }

    /// Whether two identifiers share a group (both must be placed).
    pub fn co_located(&self, a: &str, b: &str) -> bool {
        match (self.group_of(a), self.group_of(b)) {
            (Some(ga), Some(gb)) => ga == gb,
            _ => false,
        }
    }
}
