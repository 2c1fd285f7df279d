//! Outcome classification.
//!
//! Pure derivation over a completed (possibly partial) placement:
//! who was left out, who was placed but got none of their declared
//! affinities, and a per-slot satisfaction tag for every individual.
//! Running it twice on the same placement yields identical output.
//!
//! # Derived sets
//!
//! | Set | Definition |
//! |-----|-----------|
//! | Unplaced | No group mapping |
//! | Unsatisfied | Mapped, zero affinities co-located |
//! | Manual review | Unplaced ∪ unsatisfied, input order |

use serde::{Deserialize, Serialize};

use crate::models::{Individual, Placement, MAX_AFFINITIES};

/// Satisfaction tag for one affinity slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    /// The slot was not filled in.
    Empty,
    /// The referenced affinity shares the individual's group.
    Satisfied,
    /// The referenced affinity is elsewhere, or one of the pair is
    /// unplaced.
    Unsatisfied,
}

/// Per-slot satisfaction tags for one individual.
///
/// `slots` always has [`MAX_AFFINITIES`] entries, padded with
/// [`SlotStatus::Empty`], mirroring the fixed slot layout of the input
/// records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAnnotation {
    /// Individual identifier.
    pub id: String,
    /// One tag per affinity slot.
    pub slots: Vec<SlotStatus>,
}

impl SlotAnnotation {
    /// Whether at least one slot is satisfied.
    pub fn any_satisfied(&self) -> bool {
        self.slots.iter().any(|s| *s == SlotStatus::Satisfied)
    }
}

/// Classification of a placement's outcome.
///
/// All lists preserve input order. Unplaced and unsatisfied are disjoint
/// by construction (unsatisfied requires a mapping), so the manual-review
/// list is their concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Identifiers with no group mapping.
    pub unplaced: Vec<String>,
    /// Identifiers placed with none of their affinities co-located.
    /// Includes placed individuals who declared no affinity at all.
    pub unsatisfied: Vec<String>,
    /// Per-slot satisfaction, one entry per individual.
    pub annotations: Vec<SlotAnnotation>,
    /// Unplaced and unsatisfied identifiers needing human follow-up.
    pub manual_review: Vec<String>,
}

impl Classification {
    /// Fraction of placed individuals with at least one affinity
    /// co-located. `1.0` when nobody is placed.
    pub fn satisfaction_rate(&self, placed_count: usize) -> f64 {
        if placed_count == 0 {
            return 1.0;
        }
        let satisfied = placed_count - self.unsatisfied.len();
        satisfied as f64 / placed_count as f64
    }

    /// Whether any individual needs follow-up.
    pub fn needs_review(&self) -> bool {
        !self.manual_review.is_empty()
    }
}

/// Derives the outcome classification for a placement.
///
/// Pure: reads the placement and the original records, mutates nothing.
pub fn classify(individuals: &[Individual], placement: &Placement) -> Classification {
    let mut unplaced = Vec::new();
    let mut unsatisfied = Vec::new();
    let mut annotations = Vec::with_capacity(individuals.len());

    for ind in individuals {
        let own_group = placement.group_of(&ind.id);

        let mut slots = Vec::with_capacity(MAX_AFFINITIES);
        for friend in &ind.affinities {
            let satisfied = match own_group {
                Some(g) => placement.group_of(friend) == Some(g),
                None => false,
            };
            slots.push(if satisfied {
                SlotStatus::Satisfied
            } else {
                SlotStatus::Unsatisfied
            });
        }
        slots.resize(MAX_AFFINITIES, SlotStatus::Empty);

        let any_satisfied = slots.contains(&SlotStatus::Satisfied);
        match own_group {
            None => unplaced.push(ind.id.clone()),
            Some(_) if !any_satisfied => unsatisfied.push(ind.id.clone()),
            Some(_) => {}
        }

        annotations.push(SlotAnnotation {
            id: ind.id.clone(),
            slots,
        });
    }

    // Disjoint sets, both in input order
    let mut manual_review = unplaced.clone();
    manual_review.extend(unsatisfied.iter().cloned());

    Classification {
        unplaced,
        unsatisfied,
        annotations,
        manual_review,
    }
}
