//! bacon-graph: The actor collaboration graph.
//!
//! Owns the adjacency structure (actor → first-degree co-stars), its
//! incremental mutation from cast groups, loading casts from the actors file,
//! and the append-only log that persists movies added at runtime.

pub mod actors;
pub mod log;
pub mod mutations;
pub mod queries;
pub mod store;

pub use log::{CastLog, JsonlCastLog};
pub use mutations::validate_batch;
pub use store::{GraphError, GraphStore};
