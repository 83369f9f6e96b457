//! Write operations for the actor graph.
//!
//! Folding a cast group in is a set union on every member's neighbor set,
//! so re-adding a group, or adding its members in another order, changes
//! nothing.

use bacon_core::CastGroup;

use crate::store::{GraphError, GraphStore, Result};

impl GraphStore {
    /// Connect every pair of distinct actors in `group`.
    ///
    /// Duplicate names collapse and self-loops are never recorded. A group with
    /// fewer than two distinct actors adds no edges, and therefore no actors.
    /// Returns the number of actors that were new to the graph.
    pub fn add_cast_group(&mut self, group: &CastGroup) -> usize {
        let mut members: Vec<&str> = group.members().iter().map(|a| a.as_str()).collect();
        members.sort_unstable();
        members.dedup();
        if members.len() < 2 {
            return 0;
        }

        let before = self.names.len();
        let mut indices: Vec<usize> = group
            .members()
            .iter()
            .map(|actor| self.intern(actor))
            .collect();
        indices.sort_unstable();
        indices.dedup();

        for &idx in &indices {
            let neighbors = &mut self.adjacency[idx];
            neighbors.extend(indices.iter().copied().filter(|&other| other != idx));
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        self.names.len() - before
    }

    /// Fold in a whole batch. Callers that need all-or-nothing semantics must
    /// run [`validate_batch`] first.
    pub fn add_cast_groups(&mut self, groups: &[CastGroup]) -> usize {
        groups.iter().map(|group| self.add_cast_group(group)).sum()
    }
}

/// Reject a batch containing an empty cast group.
pub fn validate_batch(groups: &[CastGroup]) -> Result<()> {
    for (index, group) in groups.iter().enumerate() {
        if group.is_empty() {
            return Err(GraphError::MalformedBatch {
                index,
                reason: "has no actors".to_string(),
            });
        }
    }
    Ok(())
}
