//! Read operations on the actor graph.
//!
//! Name-based lookups are for callers outside the crate; the search works on
//! dense indices through [`GraphStore::index_of`] and
//! [`GraphStore::neighbor_indices`].

use bacon_core::ActorName;

use crate::store::{GraphError, GraphStore, Result};

impl GraphStore {
    /// Whether `actor` has at least one co-star in the graph.
    pub fn contains(&self, actor: &str) -> bool {
        self.index.contains_key(actor)
    }

    /// Dense index of `actor`, if present.
    pub fn index_of(&self, actor: &str) -> Option<usize> {
        self.index.get(actor).copied()
    }

    /// Name of the actor at `index`.
    ///
    /// # Panics
    /// If `index` was not produced by this graph.
    pub fn name(&self, index: usize) -> &ActorName {
        &self.names[index]
    }

    /// First-degree co-stars of `actor`.
    ///
    /// Fails with [`GraphError::NodeNotFound`] for absent actors; callers that
    /// tolerate absence should check [`GraphStore::contains`] first.
    pub fn neighbors(&self, actor: &str) -> Result<impl Iterator<Item = &ActorName> + '_> {
        let idx = self.index_of(actor).ok_or_else(|| GraphError::NodeNotFound {
            actor: actor.to_string(),
        })?;
        Ok(self.adjacency[idx].iter().map(move |&n| &self.names[n]))
    }

    /// Sorted neighbor indices of the actor at `index`.
    pub fn neighbor_indices(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Whether `a` and `b` appeared in a movie together.
    pub fn are_neighbors(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => self.adjacency[a].binary_search(&b).is_ok(),
            _ => false,
        }
    }

    /// Number of co-stars of `actor`, zero if absent.
    pub fn degree(&self, actor: &str) -> usize {
        self.index_of(actor)
            .map(|idx| self.adjacency[idx].len())
            .unwrap_or(0)
    }
}
