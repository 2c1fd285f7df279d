//! Individual (cohort member) model.
//!
//! An individual carries up to [`MAX_AFFINITIES`] ordered affinity
//! references (co-placement preferences) and up to [`MAX_EXCLUSIONS`]
//! ordered exclusion references (must-not-share constraints), plus
//! opaque attributes the core never interprets.
//!
//! All references are by identifier; reciprocation is not required.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of affinity reference slots per individual.
pub const MAX_AFFINITIES: usize = 5;

/// Maximum number of exclusion reference slots per individual.
pub const MAX_EXCLUSIONS: usize = 3;

/// A cohort member to be placed into a group.
///
/// Constructed once from input and immutable thereafter. Empty reference
/// strings are dropped on insertion, so `affinities` and `exclusions`
/// contain only non-empty identifiers in declared slot order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
    /// Unique identifier.
    pub id: String,
    /// Declared co-placement preferences, in slot order.
    pub affinities: Vec<String>,
    /// Declared co-placement prohibitions, in slot order.
    pub exclusions: Vec<String>,
    /// Domain-specific key-value metadata (category flags, cohort tags).
    /// Carried through untouched; never consulted during placement.
    pub attributes: HashMap<String, String>,
}

impl Individual {
    /// Creates a new individual with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            affinities: Vec::new(),
            exclusions: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Adds an affinity reference. Empty strings are dropped.
    pub fn with_affinity(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.is_empty() {
            self.affinities.push(id);
        }
        self
    }

    /// Adds affinity references in slot order. Empty strings are dropped.
    pub fn with_affinities<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self = self.with_affinity(id);
        }
        self
    }

    /// Adds an exclusion reference. Empty strings are dropped.
    pub fn with_exclusion(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.is_empty() {
            self.exclusions.push(id);
        }
        self
    }

    /// Adds exclusion references in slot order. Empty strings are dropped.
    pub fn with_exclusions<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self = self.with_exclusion(id);
        }
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether this individual declared any affinity.
    #[inline]
    pub fn has_affinities(&self) -> bool {
        !self.affinities.is_empty()
    }
}
