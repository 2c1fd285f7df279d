//! Partitioning domain models.
//!
//! Core data types for stating a grouping problem and representing its
//! solution: who is to be placed ([`Individual`]), where they may go
//! ([`Group`], [`GroupSet`]), under what rules ([`GroupingConfig`]), and
//! what came out ([`Placement`]).

mod config;
mod group;
mod individual;
mod placement;

pub use config::{
    CapacityRule, ConfigError, FeasibilityMode, GroupCount, GroupingConfig, ResolvedBounds,
    Strategy,
};
pub use group::{Group, GroupSet};
pub use individual::{Individual, MAX_AFFINITIES, MAX_EXCLUSIONS};
pub use placement::Placement;
