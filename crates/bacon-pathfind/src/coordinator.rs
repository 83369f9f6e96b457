//! Graph mutation with cache invalidation.
//!
//! The coordinator is the only writer of the graph. It holds the graph's write
//! lock across the mutation and the cache clear, so a query (which holds the
//! read lock for its whole lookup) sees either the old graph with old cache
//! entries or the new graph with an empty cache. The log append happens after
//! the write lock is released, under a separate append lock taken before the
//! release so batches reach the log in the order they were applied.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use bacon_core::CastGroup;
use bacon_graph::{validate_batch, CastLog, GraphStore};

use crate::cache::DegreeCache;
use crate::error::Result;
use crate::types::{GraphStats, MutationSummary};

/// Applies cast-group batches to the shared graph and keeps the cache consistent.
pub struct MutationCoordinator {
    graph: Arc<RwLock<GraphStore>>,
    cache: Arc<DegreeCache>,
    log: Option<Box<dyn CastLog>>,
    /// Serializes log appends. Always taken while holding the graph write lock.
    append_lock: Mutex<()>,
}

impl MutationCoordinator {
    pub fn new(graph: Arc<RwLock<GraphStore>>, cache: Arc<DegreeCache>) -> Self {
        Self {
            graph,
            cache,
            log: None,
            append_lock: Mutex::new(()),
        }
    }

    /// Append every applied batch to `log`.
    pub fn with_log(mut self, log: Box<dyn CastLog>) -> Self {
        self.log = Some(log);
        self
    }

    pub fn has_log(&self) -> bool {
        self.log.is_some()
    }

    /// Validate, apply and invalidate under the write lock, then persist.
    ///
    /// A batch with an empty cast group is rejected before the graph is touched.
    /// A failed log append is reported but does not undo the applied batch.
    pub fn apply_edges(&self, groups: &[CastGroup]) -> Result<MutationSummary> {
        validate_batch(groups)?;

        let mut graph = self.graph.write();
        let new_actors = graph.add_cast_groups(groups);
        self.cache.invalidate_all();
        let stats = GraphStats {
            total_nodes: graph.node_count(),
            total_edges: graph.edge_count(),
        };
        let append_guard = self.append_lock.lock();
        drop(graph);

        let persisted = match &self.log {
            Some(log) => match log.append(groups) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, groups = groups.len(), "Failed to persist new casts");
                    false
                }
            },
            None => false,
        };
        drop(append_guard);

        let summary = MutationSummary {
            groups: groups.len(),
            new_actors,
            graph: stats,
            persisted,
        };

        tracing::info!(
            groups = summary.groups,
            new_actors = summary.new_actors,
            nodes = summary.graph.total_nodes,
            edges = summary.graph.total_edges,
            persisted = summary.persisted,
            "Applied new casts"
        );

        Ok(summary)
    }
}
