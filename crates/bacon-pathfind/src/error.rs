//! Error types for the bacon-pathfind crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathfindError {
    #[error("Graph error: {0}")]
    Graph(#[from] bacon_graph::GraphError),
}

impl PathfindError {
    /// Whether the caller submitted a structurally invalid batch.
    pub fn is_malformed_batch(&self) -> bool {
        matches!(
            self,
            Self::Graph(bacon_graph::GraphError::MalformedBatch { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, PathfindError>;
