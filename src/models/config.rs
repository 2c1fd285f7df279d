//! Run configuration.
//!
//! One [`GroupingConfig`] drives one placement run: how many groups, how
//! large, which strategy, how to react to an unplaceable cluster, and the
//! seed for the run's only source of randomness. Capacity and count can
//! each be given directly or derived, matching the knobs the original
//! tool variants exposed.

use serde::{Deserialize, Serialize};

/// How the number of groups is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupCount {
    /// Exactly this many groups.
    Fixed(usize),
    /// `population / size` groups (floor, minimum 1).
    FromGroupSize(usize),
}

/// How per-group capacity is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapacityRule {
    /// Absolute per-group cap.
    Absolute(usize),
    /// `ceil(population / group_count)`.
    #[default]
    Derived,
}

/// Which placement strategy runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Pack whole affinity clusters, first-fit ([`crate::placer::ClusterPacker`]).
    #[default]
    WholeCluster,
    /// Place individuals one at a time, friend-first ([`crate::placer::FriendPlacer`]).
    FriendMaximizing,
}

/// Reaction to an unplaceable unit (whole-cluster strategy only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeasibilityMode {
    /// First unplaceable cluster aborts the run as infeasible.
    Strict,
    /// Unplaceable clusters accumulate; the run always completes.
    #[default]
    Fallback,
}

/// Configuration for one placement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Group count rule.
    pub group_count: GroupCount,
    /// Per-group capacity rule.
    pub capacity: CapacityRule,
    /// Placement strategy.
    pub strategy: Strategy,
    /// Strict/fallback behavior; ignored by [`Strategy::FriendMaximizing`].
    pub feasibility: FeasibilityMode,
    /// Seed for the run's shuffles. Same seed + same input = same result.
    pub random_seed: u64,
    /// Whether the greedy strategy may place an individual with no
    /// co-placeable affinity on their own.
    pub allow_solo: bool,
}

/// Effective bounds after resolving the count and capacity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBounds {
    /// Number of groups.
    pub group_count: usize,
    /// Per-group capacity.
    pub capacity: usize,
}

impl GroupingConfig {
    /// Creates a configuration with a fixed number of groups.
    pub fn fixed_groups(count: usize) -> Self {
        Self {
            group_count: GroupCount::Fixed(count),
            capacity: CapacityRule::Derived,
            strategy: Strategy::default(),
            feasibility: FeasibilityMode::default(),
            random_seed: 0,
            allow_solo: false,
        }
    }

    /// Creates a configuration deriving the group count from a target
    /// group size (`population / size`, floor, minimum 1).
    pub fn by_group_size(size: usize) -> Self {
        Self {
            group_count: GroupCount::FromGroupSize(size),
            capacity: CapacityRule::Absolute(size),
            strategy: Strategy::default(),
            feasibility: FeasibilityMode::default(),
            random_seed: 0,
            allow_solo: false,
        }
    }

    /// Sets the capacity rule.
    pub fn with_capacity(mut self, capacity: CapacityRule) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the placement strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the feasibility mode.
    pub fn with_feasibility(mut self, mode: FeasibilityMode) -> Self {
        self.feasibility = mode;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Permits solo placement in the greedy strategy.
    pub fn with_solo_placement(mut self, allow: bool) -> Self {
        self.allow_solo = allow;
        self
    }

    /// Resolves the count and capacity rules against a population size.
    ///
    /// Fails when a rule yields zero, or when the resulting total
    /// capacity cannot hold the population (detected here, before any
    /// placement starts).
    pub fn resolve(&self, population: usize) -> Result<ResolvedBounds, ConfigError> {
        let group_count = match self.group_count {
            GroupCount::Fixed(n) => n,
            GroupCount::FromGroupSize(size) => {
                if size == 0 {
                    return Err(ConfigError::ZeroGroupSize);
                }
                (population / size).max(1)
            }
        };
        if group_count == 0 {
            return Err(ConfigError::ZeroGroupCount);
        }

        let capacity = match self.capacity {
            CapacityRule::Absolute(c) => c,
            CapacityRule::Derived => population.div_ceil(group_count),
        };
        if capacity == 0 && population > 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        if group_count * capacity < population {
            return Err(ConfigError::InsufficientCapacity {
                population,
                group_count,
                capacity,
            });
        }

        Ok(ResolvedBounds {
            group_count,
            capacity,
        })
    }
}

/// A configuration that cannot produce a valid run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Group count resolved to zero.
    ZeroGroupCount,
    /// A group size of zero was given.
    ZeroGroupSize,
    /// Capacity resolved to zero for a non-empty population.
    ZeroCapacity,
    /// Total capacity is below the population size.
    InsufficientCapacity {
        /// Number of individuals to place.
        population: usize,
        /// Resolved group count.
        group_count: usize,
        /// Resolved per-group capacity.
        capacity: usize,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroGroupCount => write!(f, "group count must be positive"),
            Self::ZeroGroupSize => write!(f, "group size must be positive"),
            Self::ZeroCapacity => write!(f, "group capacity must be positive"),
            Self::InsufficientCapacity {
                population,
                group_count,
                capacity,
            } => write!(
                f,
                "{group_count} group(s) of capacity {capacity} cannot hold {population} individuals"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
