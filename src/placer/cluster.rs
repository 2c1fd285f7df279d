//! Whole-cluster first-fit packer.
//!
//! # Algorithm
//!
//! 1. Extract the connected components of the affinity graph.
//! 2. Shuffle them with the run's seeded rng (removes the bias toward
//!    components discovered first).
//! 3. For each cluster, scan groups in index order and place the whole
//!    cluster into the first group with enough room and no excluded pair
//!    (against current members or inside the cluster itself).
//!
//! A cluster is never split across groups. Placed clusters are never
//! moved or evicted: this is a first-fit heuristic, not an optimal
//! bin-packing solver, and it can strand partitions that backtracking
//! would find.
//!
//! # Complexity
//! O(k * g * n) where k=clusters, g=groups, n=members checked per scan.
//!
//! # Reference
//! Johnson (1973), "Near-optimal bin packing algorithms" (first-fit);
//! Garey & Johnson (1979), bin packing NP-hardness.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use super::PlacementError;
use crate::graph::{AffinityGraph, ExclusionRelation};
use crate::models::{FeasibilityMode, GroupSet, Placement, ResolvedBounds};

/// Packs whole affinity clusters into groups, first-fit.
#[derive(Debug, Clone)]
pub struct ClusterPacker {
    bounds: ResolvedBounds,
    mode: FeasibilityMode,
}

impl ClusterPacker {
    /// Creates a packer for the given bounds and feasibility mode.
    pub fn new(bounds: ResolvedBounds, mode: FeasibilityMode) -> Self {
        Self { bounds, mode }
    }

    /// Runs the packing pass.
    ///
    /// In [`FeasibilityMode::Strict`], the first unplaceable cluster
    /// aborts the run with [`PlacementError::Infeasible`] and no partial
    /// result. In [`FeasibilityMode::Fallback`], unplaceable clusters
    /// land in the unplaced list and the run always completes.
    pub fn pack<R: Rng>(
        &self,
        graph: &AffinityGraph,
        exclusions: &ExclusionRelation,
        rng: &mut R,
    ) -> Result<Placement, PlacementError> {
        let mut clusters = graph.clusters();
        clusters.shuffle(rng);

        let mut groups = GroupSet::new(self.bounds.group_count, self.bounds.capacity);
        let mut assignments = BTreeMap::new();
        let mut unplaced_nodes: Vec<usize> = Vec::new();

        for cluster in &clusters {
            let unit: Vec<&str> = cluster.iter().map(|&n| graph.id(n)).collect();
            let slot =
                (0..groups.count()).find(|&g| groups.admits_unit(g, &unit, exclusions));

            match slot {
                Some(g) => {
                    groups.place_unit(g, &unit);
                    for id in &unit {
                        assignments.insert((*id).to_string(), g);
                    }
                }
                None => match self.mode {
                    FeasibilityMode::Strict => {
                        let mut members = cluster.clone();
                        members.sort_unstable();
                        return Err(PlacementError::Infeasible {
                            unit: members.iter().map(|&n| graph.id(n).to_string()).collect(),
                        });
                    }
                    FeasibilityMode::Fallback => unplaced_nodes.extend(cluster),
                },
            }
        }

        // Input order, regardless of shuffle order
        unplaced_nodes.sort_unstable();
        let unplaced = unplaced_nodes
            .into_iter()
            .map(|n| graph.id(n).to_string())
            .collect();

        Ok(Placement {
            assignments,
            groups: groups.into_groups(),
            capacity: self.bounds.capacity,
            unplaced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Individual;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn bounds(group_count: usize, capacity: usize) -> ResolvedBounds {
        ResolvedBounds {
            group_count,
            capacity,
        }
    }

    fn pack(
        individuals: &[Individual],
        b: ResolvedBounds,
        mode: FeasibilityMode,
        seed: u64,
    ) -> Result<Placement, PlacementError> {
        let graph = AffinityGraph::build(individuals);
        let exclusions = ExclusionRelation::build(individuals);
        let mut rng = SmallRng::seed_from_u64(seed);
        ClusterPacker::new(b, mode).pack(&graph, &exclusions, &mut rng)
    }

    #[test]
    fn test_cluster_never_split() {
        let individuals = vec![
            Individual::new("a").with_affinity("b"),
            Individual::new("b").with_affinity("c"),
            Individual::new("c"),
            Individual::new("d"),
            Individual::new("e"),
        ];
        for seed in 0..20 {
            let p = pack(&individuals, bounds(2, 3), FeasibilityMode::Fallback, seed).unwrap();
            // {a, b, c} either share one group or are jointly unplaced
            match p.group_of("a") {
                Some(g) => {
                    assert_eq!(p.group_of("b"), Some(g));
                    assert_eq!(p.group_of("c"), Some(g));
                }
                None => {
                    assert!(!p.is_placed("b"));
                    assert!(!p.is_placed("c"));
                }
            }
        }
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let individuals: Vec<Individual> =
            (0..9).map(|i| Individual::new(format!("p{i}"))).collect();
        for seed in 0..10 {
            let p = pack(&individuals, bounds(3, 3), FeasibilityMode::Fallback, seed).unwrap();
            assert!(p.group_sizes().iter().all(|&s| s <= 3));
            assert_eq!(p.placed_count(), 9);
            assert!(p.unplaced.is_empty());
        }
    }

    #[test]
    fn test_exclusion_never_co_located() {
        let individuals = vec![
            Individual::new("a").with_exclusion("b"),
            Individual::new("b"),
            Individual::new("c"),
            Individual::new("d"),
        ];
        let excl = ExclusionRelation::build(&individuals);
        for seed in 0..20 {
            let p = pack(&individuals, bounds(2, 2), FeasibilityMode::Fallback, seed).unwrap();
            for group in &p.groups {
                for (i, x) in group.members.iter().enumerate() {
                    for y in &group.members[i + 1..] {
                        assert!(!excl.is_excluded(x, y), "{x} and {y} share a group");
                    }
                }
            }
        }
    }

    #[test]
    fn test_strict_mode_reports_infeasible() {
        // Scenario: one affinity cluster of 3 with an internal mutual
        // exclusion, a single group of capacity 2
        let individuals = vec![
            Individual::new("a").with_affinity("b").with_exclusion("c"),
            Individual::new("b").with_affinity("c"),
            Individual::new("c").with_exclusion("a"),
        ];
        let err = pack(&individuals, bounds(1, 2), FeasibilityMode::Strict, 7).unwrap_err();
        match err {
            PlacementError::Infeasible { unit } => {
                assert_eq!(unit, vec!["a", "b", "c"]);
            }
            other => panic!("expected Infeasible, got {other:?}"),
        }
    }

    #[test]
    fn test_fallback_mode_completes_partially() {
        let individuals = vec![
            Individual::new("a").with_affinity("b").with_exclusion("c"),
            Individual::new("b").with_affinity("c"),
            Individual::new("c").with_exclusion("a"),
        ];
        let p = pack(&individuals, bounds(1, 2), FeasibilityMode::Fallback, 7).unwrap();
        // the size-3 cluster cannot fit anywhere; everyone is unplaced
        assert_eq!(p.placed_count(), 0);
        assert_eq!(p.unplaced, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let individuals: Vec<Individual> = (0..12)
            .map(|i| {
                let mut p = Individual::new(format!("p{i}"));
                if i % 3 == 0 && i > 0 {
                    p = p.with_affinity(format!("p{}", i - 1));
                }
                p
            })
            .collect();
        let a = pack(&individuals, bounds(4, 3), FeasibilityMode::Fallback, 99).unwrap();
        let b = pack(&individuals, bounds(4, 3), FeasibilityMode::Fallback, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_fit_takes_lowest_index_group() {
        let individuals = vec![Individual::new("only")];
        let p = pack(&individuals, bounds(3, 2), FeasibilityMode::Fallback, 0).unwrap();
        assert_eq!(p.group_of("only"), Some(0));
    }

    #[test]
    fn test_empty_population() {
        let p = pack(&[], bounds(2, 5), FeasibilityMode::Strict, 0).unwrap();
        assert_eq!(p.placed_count(), 0);
        assert!(p.unplaced.is_empty());
        assert_eq!(p.groups.len(), 2);
    }
}
