//! Constraint-aware cohort partitioning.
//!
//! Splits a population into a fixed number of capacity-bounded groups,
//! honoring hard pairwise exclusions while maximizing co-placement of
//! declared affinities, and classifies the outcome (placed, unplaced,
//! unsatisfied) for follow-up.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Individual`, `Group`, `GroupSet`,
//!   `Placement`, `GroupingConfig`
//! - **`graph`**: `AffinityGraph` (with connected-component clusters) and
//!   the symmetric `ExclusionRelation`
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown or
//!   self references, slot bounds)
//! - **`placer`**: The two placement strategies and the [`placer::place`]
//!   entry point
//! - **`classify`**: Pure outcome derivation — unplaced/unsatisfied sets,
//!   per-slot satisfaction tags, manual-review list
//!
//! # Architecture
//!
//! The crate is the algorithmic core only: it consumes already-parsed
//! records and configuration scalars and produces a placement plus its
//! classification. File ingestion, interactive parameter surfaces, and
//! result rendering/export are external collaborators. Everything is
//! single-threaded and synchronous; the only non-determinism is the
//! explicit seeded shuffle before placement, so a fixed seed gives a
//! byte-identical result.
//!
//! Both strategies are greedy heuristics, not exact solvers: the packer
//! is first-fit without backtracking and can strand partitions an exact
//! method would find.
//!
//! # References
//!
//! - Johnson (1973), "Near-optimal bin packing algorithms"
//! - Garey & Johnson (1979), "Computers and Intractability" (bin packing)
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22

pub mod classify;
pub mod graph;
pub mod models;
pub mod placer;
pub mod validation;
