//! Compact in-memory adjacency store.
//!
//! Actor names are interned to dense indices; each adjacency entry is a
//! sorted, deduplicated `Vec<usize>` so traversal is cache-friendly and
//! membership is a binary search.

use std::collections::HashMap;

use bacon_core::{ActorName, CastGroup};

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Actor not found: {actor}")]
    NodeNotFound { actor: String },

    #[error("Malformed batch: cast group {index} {reason}")]
    MalformedBatch { index: usize, reason: String },

    #[error("Invalid actors file {path} at line {line}: {source}")]
    InvalidActorsLine {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// The undirected, unweighted actor graph.
///
/// Invariants maintained by every mutation:
/// - `adjacency[a]` contains `b` iff `adjacency[b]` contains `a`;
/// - no entry contains its own index;
/// - every interned actor has at least one neighbor, so interning doubles
///   as the presence check.
#[derive(Debug, Default, Clone)]
pub struct GraphStore {
    /// All actors, indexed by dense index.
    pub(crate) names: Vec<ActorName>,
    /// Map from actor name → dense index.
    pub(crate) index: HashMap<ActorName, usize>,
    /// `adjacency[i]` = sorted neighbor indices of actor `i`.
    pub(crate) adjacency: Vec<Vec<usize>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph by folding in every cast group in order.
    pub fn from_cast_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = CastGroup>,
    {
        let mut graph = Self::new();
        for group in groups {
            graph.add_cast_group(&group);
        }
        graph
    }

    /// Number of actors with at least one co-star.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Return the index for `actor`, interning it if it's new.
    pub(crate) fn intern(&mut self, actor: &ActorName) -> usize {
        if let Some(&idx) = self.index.get(actor.as_str()) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(actor.clone());
        self.index.insert(actor.clone(), idx);
        self.adjacency.push(Vec::new());
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> GraphStore {
        GraphStore::from_cast_groups(vec![
            CastGroup::new(["A", "B"]),
            CastGroup::new(["B", "C"]),
            CastGroup::new(["C", "D"]),
        ])
    }

    #[test]
    fn test_from_cast_groups_counts() {
        let graph = linear();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(!graph.is_empty());
    }

    #[test]
    fn test_intern_is_stable() {
        let mut graph = GraphStore::new();
        let a = graph.intern(&ActorName::from("A"));
        let b = graph.intern(&ActorName::from("B"));
        assert_eq!(graph.intern(&ActorName::from("A")), a);
        assert_ne!(a, b);
        assert_eq!(graph.names[b].as_str(), "B");
    }

    #[test]
    fn test_empty_graph() {
        let graph = GraphStore::new();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
