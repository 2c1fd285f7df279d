//! Friend-maximizing greedy placer.
//!
//! Places individuals one at a time, in a seeded random order. Each
//! individual goes through a decision ladder, stopping at the first rung
//! that succeeds:
//!
//! 1. **Attach**: join the group of an already-placed affinity, trying
//!    affinities in declared slot order.
//! 2. **Co-place**: pick a not-yet-placed affinity (declared order) and a
//!    group that admits both, placing the pair together.
//! 3. **Solo** (opt-in via config): take the best group alone.
//! 4. Otherwise the individual stays unplaced.
//!
//! Group preference for rungs 2 and 3: most of the individual's
//! affinities already present, then smallest current population, then
//! lowest index. For an individual with no placed affinities this
//! reduces to least-populated-first with index ties, which keeps load
//! balanced.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::ExclusionRelation;
use crate::models::{GroupSet, Individual, Placement, ResolvedBounds};

/// Places individuals one at a time, preferring groups that already hold
/// their declared affinities.
#[derive(Debug, Clone)]
pub struct FriendPlacer {
    bounds: ResolvedBounds,
    allow_solo: bool,
}

impl FriendPlacer {
    /// Creates a placer for the given bounds.
    ///
    /// `allow_solo` enables rung 3 of the ladder; without it an
    /// individual with no co-placeable affinity stays unplaced.
    pub fn new(bounds: ResolvedBounds, allow_solo: bool) -> Self {
        Self { bounds, allow_solo }
    }

    /// Runs the placement pass. Always completes; failures are recorded
    /// in the unplaced list rather than aborting the run.
    pub fn place<R: Rng>(
        &self,
        individuals: &[Individual],
        exclusions: &ExclusionRelation,
        rng: &mut R,
    ) -> Placement {
        let known: HashMap<&str, usize> = individuals
            .iter()
            .enumerate()
            .map(|(i, ind)| (ind.id.as_str(), i))
            .collect();

        let mut order: Vec<usize> = (0..individuals.len()).collect();
        order.shuffle(rng);

        let mut groups = GroupSet::new(self.bounds.group_count, self.bounds.capacity);
        let mut assignments: BTreeMap<String, usize> = BTreeMap::new();

        for &i in &order {
            let ind = &individuals[i];
            if assignments.contains_key(&ind.id) {
                continue; // co-placed alongside an earlier individual
            }
            self.place_one(ind, &known, exclusions, &mut groups, &mut assignments);
        }

        let unplaced = individuals
            .iter()
            .filter(|ind| !assignments.contains_key(&ind.id))
            .map(|ind| ind.id.clone())
            .collect();

        Placement {
            assignments,
            groups: groups.into_groups(),
            capacity: self.bounds.capacity,
            unplaced,
        }
    }

    fn place_one(
        &self,
        ind: &Individual,
        known: &HashMap<&str, usize>,
        exclusions: &ExclusionRelation,
        groups: &mut GroupSet,
        assignments: &mut BTreeMap<String, usize>,
    ) {
        // Rung 1: attach to a placed affinity, declared order
        for friend in &ind.affinities {
            if let Some(&g) = assignments.get(friend.as_str()) {
                if groups.admits(g, &ind.id, exclusions) {
                    groups.place(g, ind.id.clone());
                    assignments.insert(ind.id.clone(), g);
                    return;
                }
            }
        }

        // Rung 2: co-place with an unplaced affinity, declared order
        for friend in &ind.affinities {
            if assignments.contains_key(friend.as_str())
                || !known.contains_key(friend.as_str())
                || *friend == ind.id
            {
                continue;
            }
            let unit = [ind.id.as_str(), friend.as_str()];
            let slot = {
                let view: &GroupSet = groups;
                preferred_group(view, ind, assignments, |g| {
                    view.admits_unit(g, &unit, exclusions)
                })
            };
            if let Some(g) = slot {
                groups.place_unit(g, &unit);
                assignments.insert(ind.id.clone(), g);
                assignments.insert(friend.clone(), g);
                return;
            }
        }

        // Rung 3: solo, when permitted
        if self.allow_solo {
            let slot = {
                let view: &GroupSet = groups;
                preferred_group(view, ind, assignments, |g| {
                    view.admits(g, &ind.id, exclusions)
                })
            };
            if let Some(g) = slot {
                groups.place(g, ind.id.clone());
                assignments.insert(ind.id.clone(), g);
            }
        }
    }
}

/// Best admissible group for an individual: most declared affinities
/// already present, then smallest population, then lowest index.
fn preferred_group<F>(
    groups: &GroupSet,
    ind: &Individual,
    assignments: &BTreeMap<String, usize>,
    admissible: F,
) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    (0..groups.count()).filter(|&g| admissible(g)).min_by_key(|&g| {
        let friends_present = ind
            .affinities
            .iter()
            .filter(|f| assignments.get(f.as_str()) == Some(&g))
            .count();
        (Reverse(friends_present), groups.group(g).len(), g)
    })
}
