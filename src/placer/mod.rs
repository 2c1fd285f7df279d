//! Placement strategies and the run entry point.
//!
//! Two strategies implement the same contract — partition under
//! exclusion and capacity constraints, maximizing affinity co-location —
//! and never run together; [`GroupingConfig`](crate::models::GroupingConfig)
//! selects one per run:
//!
//! - [`ClusterPacker`]: first-fit packing of whole affinity clusters.
//! - [`FriendPlacer`]: per-individual greedy placement, friend-first.
//!
//! [`place`] is the front door: validate, resolve bounds, build the
//! relationship structures, seed the rng, run the strategy, classify.
//!
//! # Usage
//!
//! ```
//! use cohort_partition::models::{CapacityRule, GroupingConfig, Individual, Strategy};
//! use cohort_partition::placer;
//!
//! let roster = vec![
//!     Individual::new("alice").with_affinity("bob"),
//!     Individual::new("bob"),
//!     Individual::new("carol").with_exclusion("alice"),
//!     Individual::new("dave"),
//! ];
//! let config = GroupingConfig::fixed_groups(2)
//!     .with_capacity(CapacityRule::Absolute(3))
//!     .with_strategy(Strategy::FriendMaximizing)
//!     .with_solo_placement(true)
//!     .with_seed(42);
//!
//! let outcome = placer::place(&roster, &config).unwrap();
//! assert!(outcome.placement.co_located("alice", "bob"));
//! ```

mod cluster;
mod greedy;

pub use cluster::ClusterPacker;
pub use greedy::FriendPlacer;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::classify::{classify, Classification};
use crate::graph::{AffinityGraph, ExclusionRelation};
use crate::models::{
    ConfigError, FeasibilityMode, GroupingConfig, Individual, Placement, ResolvedBounds, Strategy,
};
use crate::validation::{validate_roster, ValidationError};

/// Everything one run produces: the placement and its classification.
#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    /// Identifier→group mapping and final group member lists.
    pub placement: Placement,
    /// Unplaced / unsatisfied sets, slot annotations, review list.
    pub classification: Classification,
}

/// A run-level failure. Every variant is detected before or during
/// placement; none leaves a partial result behind.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// The individual records failed validation.
    InvalidInput(Vec<ValidationError>),
    /// The configuration cannot produce a valid run.
    Config(ConfigError),
    /// Strict whole-cluster mode: this cluster fits no group. Members in
    /// input order.
    Infeasible {
        /// The unplaceable cluster's member identifiers.
        unit: Vec<String>,
    },
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(errors) => {
                write!(f, "invalid input ({} error(s))", errors.len())
            }
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Infeasible { unit } => {
                write!(f, "infeasible: cluster [{}] fits no group", unit.join(", "))
            }
        }
    }
}

impl std::error::Error for PlacementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for PlacementError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Runs one placement from scratch.
///
/// # Pipeline
/// 1. Validate the records (unknown references abort here, before any
///    placement).
/// 2. Resolve group count and capacity; reject configurations whose total
///    capacity cannot hold the population.
/// 3. Build the affinity graph and exclusion relation.
/// 4. Seed a rng from `config.random_seed` and run the selected strategy.
/// 5. Classify the outcome.
///
/// Same records + same configuration = same result, every time.
pub fn place(
    individuals: &[Individual],
    config: &GroupingConfig,
) -> Result<PlacementOutcome, PlacementError> {
    validate_roster(individuals).map_err(PlacementError::InvalidInput)?;

    // A population exceeding total capacity is fatal only for an
    // all-or-nothing run; partial-capable runs report the overflow
    // through the unplaced list instead.
    let all_or_nothing = config.strategy == Strategy::WholeCluster
        && config.feasibility == FeasibilityMode::Strict;
    let bounds = match config.resolve(individuals.len()) {
        Ok(bounds) => bounds,
        Err(ConfigError::InsufficientCapacity {
            group_count,
            capacity,
            ..
        }) if !all_or_nothing => ResolvedBounds {
            group_count,
            capacity,
        },
        Err(err) => return Err(err.into()),
    };

    let exclusions = ExclusionRelation::build(individuals);
    let mut rng = SmallRng::seed_from_u64(config.random_seed);

    let placement = match config.strategy {
        Strategy::WholeCluster => {
            let graph = AffinityGraph::build(individuals);
            ClusterPacker::new(bounds, config.feasibility).pack(&graph, &exclusions, &mut rng)?
        }
        Strategy::FriendMaximizing => {
            FriendPlacer::new(bounds, config.allow_solo).place(individuals, &exclusions, &mut rng)
        }
    };

    let classification = classify(individuals, &placement);
    Ok(PlacementOutcome {
        placement,
        classification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SlotStatus;
    use crate::models::{CapacityRule, FeasibilityMode};
    use crate::validation::ValidationErrorKind;

    fn conflicted_trio() -> Vec<Individual> {
        // one affinity cluster of 3 with a mutual exclusion pair inside
        vec![
            Individual::new("a").with_affinity("b").with_exclusion("c"),
            Individual::new("b").with_affinity("c"),
            Individual::new("c").with_exclusion("a"),
        ]
    }

    #[test]
    fn test_strict_infeasibility() {
        let config = GroupingConfig::fixed_groups(1)
            .with_capacity(CapacityRule::Absolute(2))
            .with_feasibility(FeasibilityMode::Strict);
        // 1 group × capacity 2 < 3 individuals: rejected up front as a
        // configuration error, before the packer even runs
        let err = place(&conflicted_trio(), &config).unwrap_err();
        assert!(matches!(err, PlacementError::Config(_)));

        // with room on paper (2 × 2 ≥ 3) the cluster itself is the
        // problem: size 3 exceeds any single group
        let config = GroupingConfig::fixed_groups(2)
            .with_capacity(CapacityRule::Absolute(2))
            .with_feasibility(FeasibilityMode::Strict);
        let err = place(&conflicted_trio(), &config).unwrap_err();
        match err {
            PlacementError::Infeasible { unit } => assert_eq!(unit, vec!["a", "b", "c"]),
            other => panic!("expected Infeasible, got {other:?}"),
        }
    }

    #[test]
    fn test_fallback_places_what_it_can() {
        // same undersized setup as the strict case, fallback mode: the
        // run completes, places at most 2, and never co-locates the
        // excluded pair
        let config = GroupingConfig::fixed_groups(1)
            .with_capacity(CapacityRule::Absolute(2))
            .with_feasibility(FeasibilityMode::Fallback);
        let outcome = place(&conflicted_trio(), &config).unwrap();
        assert!(outcome.placement.placed_count() <= 2);
        assert_eq!(
            outcome.placement.placed_count() + outcome.classification.unplaced.len(),
            3
        );
        assert!(!outcome.placement.co_located("a", "c"));
    }

    #[test]
    fn test_overfull_population_partial_in_friend_strategy() {
        let roster: Vec<Individual> =
            (0..3).map(|i| Individual::new(format!("p{i}"))).collect();
        let config = GroupingConfig::fixed_groups(1)
            .with_capacity(CapacityRule::Absolute(2))
            .with_strategy(Strategy::FriendMaximizing)
            .with_solo_placement(true);
        let outcome = place(&roster, &config).unwrap();
        assert_eq!(outcome.placement.placed_count(), 2);
        assert_eq!(outcome.classification.unplaced.len(), 1);
    }

    #[test]
    fn test_friend_attach_satisfies() {
        let roster = vec![
            Individual::new("a").with_affinity("b"),
            Individual::new("b").with_affinity("a"),
        ];
        let config = GroupingConfig::fixed_groups(2)
            .with_strategy(Strategy::FriendMaximizing)
            .with_seed(11);
        let outcome = place(&roster, &config).unwrap();

        assert!(outcome.placement.co_located("a", "b"));
        assert!(outcome.classification.unsatisfied.is_empty());
        assert_eq!(
            outcome.classification.annotations[0].slots[0],
            SlotStatus::Satisfied
        );
    }

    #[test]
    fn test_solo_fallback_placed_but_unsatisfied() {
        let roster = vec![Individual::new("d")];
        let config = GroupingConfig::fixed_groups(2)
            .with_capacity(CapacityRule::Absolute(3))
            .with_strategy(Strategy::FriendMaximizing)
            .with_solo_placement(true);
        let outcome = place(&roster, &config).unwrap();

        assert!(outcome.placement.is_placed("d"));
        assert_eq!(outcome.classification.unsatisfied, vec!["d"]);
        assert_eq!(outcome.classification.manual_review, vec!["d"]);
    }

    #[test]
    fn test_unknown_reference_aborts_before_placement() {
        let roster = vec![
            Individual::new("a").with_affinity("ghost"),
            Individual::new("b"),
        ];
        let config = GroupingConfig::fixed_groups(1);
        let err = place(&roster, &config).unwrap_err();
        match err {
            PlacementError::InvalidInput(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::UnknownAffinityReference));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_determinism_across_runs() {
        let roster: Vec<Individual> = (0..20)
            .map(|i| {
                Individual::new(format!("p{i}"))
                    .with_affinity(format!("p{}", (i + 5) % 20))
                    .with_exclusion(format!("p{}", (i + 11) % 20))
            })
            .collect();

        for strategy in [Strategy::WholeCluster, Strategy::FriendMaximizing] {
            let config = GroupingConfig::fixed_groups(5)
                .with_strategy(strategy)
                .with_solo_placement(true)
                .with_seed(777);
            let first = place(&roster, &config).unwrap();
            let second = place(&roster, &config).unwrap();
            assert_eq!(first.placement, second.placement);
            assert_eq!(first.classification, second.classification);

            let json_a = serde_json::to_string(&first.placement).unwrap();
            let json_b = serde_json::to_string(&second.placement).unwrap();
            assert_eq!(json_a, json_b);
        }
    }

    #[test]
    fn test_different_seeds_may_differ_but_stay_valid() {
        let roster: Vec<Individual> = (0..12)
            .map(|i| Individual::new(format!("p{i}")).with_affinity(format!("p{}", (i + 1) % 12)))
            .collect();
        let excl = ExclusionRelation::build(&roster);

        for seed in 0..10 {
            let config = GroupingConfig::fixed_groups(4)
                .with_strategy(Strategy::FriendMaximizing)
                .with_solo_placement(true)
                .with_seed(seed);
            let outcome = place(&roster, &config).unwrap();
            let p = &outcome.placement;

            assert!(p.group_sizes().iter().all(|&s| s <= p.capacity));
            assert_eq!(p.placed_count() + p.unplaced.len(), 12);
            for group in &p.groups {
                for (i, x) in group.members.iter().enumerate() {
                    for y in &group.members[i + 1..] {
                        assert!(!excl.is_excluded(x, y));
                    }
                }
            }
        }
    }

    #[test]
    fn test_whole_cluster_end_to_end() {
        let roster = vec![
            Individual::new("a").with_affinity("b"),
            Individual::new("b"),
            Individual::new("c").with_affinity("d"),
            Individual::new("d"),
            Individual::new("e"),
            Individual::new("f"),
        ];
        let config = GroupingConfig::fixed_groups(3).with_seed(5);
        let outcome = place(&roster, &config).unwrap();

        assert_eq!(outcome.placement.placed_count(), 6);
        assert!(outcome.placement.co_located("a", "b"));
        assert!(outcome.placement.co_located("c", "d"));
        // a and c each got their declared affinity
        assert!(!outcome.classification.unsatisfied.contains(&"a".to_string()));
        assert!(!outcome.classification.unsatisfied.contains(&"c".to_string()));
    }

    #[test]
    fn test_error_display() {
        let err = PlacementError::Infeasible {
            unit: vec!["a".into(), "b".into()],
        };
        assert!(err.to_string().contains("a, b"));

        let err: PlacementError = ConfigError::ZeroGroupCount.into();
        assert!(err.to_string().contains("configuration"));
    }
}
