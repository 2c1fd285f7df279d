//! Relationship graph construction and cluster extraction.
//!
//! Builds two read-only structures from the individual records:
//!
//! - [`AffinityGraph`]: undirected graph over individual identifiers with
//!   one edge per declared affinity reference (reciprocation not required).
//! - [`ExclusionRelation`]: the set of declared must-not-share pairs,
//!   queried symmetrically.
//!
//! Both are built once per run and never mutated afterwards. Nodes keep
//! input order, so every traversal here is deterministic.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22: Elementary
//! Graph Algorithms (connected components via DFS).

use std::collections::{HashMap, HashSet};

use crate::models::Individual;

/// Undirected affinity graph over individual identifiers.
///
/// Nodes are stored in input order; adjacency is index-based and
/// deduplicated. Self-references and references to unknown identifiers
/// contribute no edge (validation reports them separately, so the
/// builder stays total).
#[derive(Debug, Clone)]
pub struct AffinityGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl AffinityGraph {
    /// Builds the affinity graph from individual records.
    ///
    /// Every individual becomes a node, including those with no
    /// references. An edge (a, b) is added once even if declared from
    /// both sides or in multiple slots.
    pub fn build(individuals: &[Individual]) -> Self {
        let mut nodes = Vec::with_capacity(individuals.len());
        let mut index = HashMap::with_capacity(individuals.len());

        for ind in individuals {
            if !index.contains_key(&ind.id) {
                index.insert(ind.id.clone(), nodes.len());
                nodes.push(ind.id.clone());
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for ind in individuals {
            let a = index[&ind.id];
            for friend in &ind.affinities {
                let Some(&b) = index.get(friend) else {
                    continue; // unknown reference, reported by validation
                };
                if a == b {
                    continue; // self-loop, reported by validation
                }
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    adjacency[a].push(b);
                    adjacency[b].push(a);
                }
            }
        }

        Self {
            nodes,
            index,
            adjacency,
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Identifier at a node index.
    #[inline]
    pub fn id(&self, node: usize) -> &str {
        &self.nodes[node]
    }

    /// Node index for an identifier, if known.
    #[inline]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Neighbor indices of a node, in first-seen order.
    #[inline]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Computes the maximal connected components of the graph.
    ///
    /// Iterative DFS over nodes in input order. Components are emitted
    /// ordered by their smallest contained node index, members in
    /// discovery order, so the output is deterministic for a given input.
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.nodes.len()];
        let mut clusters = Vec::new();

        for start in 0..self.nodes.len() {
            if visited[start] {
                continue;
            }
            let mut component = Vec::new();
            let mut stack = vec![start];
            visited[start] = true;

            while let Some(node) = stack.pop() {
                component.push(node);
                for &next in &self.adjacency[node] {
                    if !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }

            clusters.push(component);
        }

        clusters
    }
}

/// Declared must-not-share pairs, queried symmetrically.
///
/// A pair (a, b) is excluded if a named b *or* b named a. The relation is
/// over identifiers only — whether either side ends up placed is
/// irrelevant to the query.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRelation {
    named: HashMap<String, HashSet<String>>,
}

impl ExclusionRelation {
    /// Builds the exclusion relation from individual records.
    ///
    /// References are recorded verbatim; unknown identifiers are kept
    /// (validation reports them) and self-references are skipped.
    pub fn build(individuals: &[Individual]) -> Self {
        let mut named: HashMap<String, HashSet<String>> = HashMap::new();
        for ind in individuals {
            for excl in &ind.exclusions {
                if *excl == ind.id {
                    continue;
                }
                named
                    .entry(ind.id.clone())
                    .or_default()
                    .insert(excl.clone());
            }
        }
        Self { named }
    }

    /// Whether the pair (a, b) may not share a group.
    pub fn is_excluded(&self, a: &str, b: &str) -> bool {
        self.names(a, b) || self.names(b, a)
    }

    /// Whether `a` declared `b` as an exclusion (one direction only).
    pub fn names(&self, a: &str, b: &str) -> bool {
        self.named.get(a).is_some_and(|set| set.contains(b))
    }

    /// Whether any pair drawn from `ids` is excluded.
    pub fn has_internal_conflict<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let members: Vec<&str> = ids.into_iter().collect();
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                if self.is_excluded(a, b) {
                    return true;
                }
            }
        }
        false
    }
}
