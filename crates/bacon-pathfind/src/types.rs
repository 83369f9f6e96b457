//! Result and statistics types for degree queries and mutations.

use serde::{Deserialize, Serialize};

use bacon_core::QueryResult;

/// A query together with its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeAnswer {
    pub root: String,
    pub target: String,
    pub result: QueryResult,
}

/// Statistics about the in-memory graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
}

/// Memo table counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Outcome of applying one batch of cast groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationSummary {
    pub groups: usize,
    pub new_actors: usize,
    pub graph: GraphStats,
    /// Whether the batch reached the cast log. False when no log is configured.
    pub persisted: bool,
}
