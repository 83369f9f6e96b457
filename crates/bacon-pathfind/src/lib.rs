//! bacon-pathfind: Degree-of-separation queries over the actor graph.
//!
//! Wraps a [`bacon_graph::GraphStore`] behind a read/write lock, answers
//! queries with a bidirectional BFS memoised in a [`DegreeCache`], and routes
//! every mutation through a [`MutationCoordinator`] so the cache never serves
//! a result computed against an older graph.

pub mod algorithms;
pub mod batch;
pub mod cache;
pub mod coordinator;
pub mod error;
pub mod types;

pub use batch::{BatchOutcome, BatchRequest};
pub use cache::DegreeCache;
pub use coordinator::MutationCoordinator;
pub use error::PathfindError;
pub use types::{CacheStats, DegreeAnswer, GraphStats, MutationSummary};

use std::sync::Arc;

use parking_lot::RwLock;

use bacon_core::{CastGroup, MovieBatch, QueryResult};
use bacon_graph::{CastLog, GraphStore};

/// The query service: graph, memo table, and the single mutation path.
pub struct DegreeService {
    graph: Arc<RwLock<GraphStore>>,
    cache: Arc<DegreeCache>,
    coordinator: MutationCoordinator,
}

impl DegreeService {
    /// Wrap an already built graph.
    pub fn new(graph: GraphStore) -> Self {
        let graph = Arc::new(RwLock::new(graph));
        let cache = Arc::new(DegreeCache::new());
        let coordinator = MutationCoordinator::new(graph.clone(), cache.clone());
        Self {
            graph,
            cache,
            coordinator,
        }
    }

    /// Build the graph from cast groups and wrap it.
    pub fn build<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = CastGroup>,
    {
        Self::new(GraphStore::from_cast_groups(groups))
    }

    /// Persist every applied batch to `log`.
    pub fn with_cast_log(mut self, log: Box<dyn CastLog>) -> Self {
        self.coordinator = self.coordinator.with_log(log);
        self
    }

    /// Degree of separation between `root` and `target`.
    ///
    /// The graph's read lock is held across the cache lookup and any search, so
    /// a concurrent mutation can't clear the cache between the search and the
    /// insert of its stale result.
    pub fn query(&self, root: &str, target: &str) -> QueryResult {
        let graph = self.graph.read();
        let result = self.cache.lookup(root, target, || {
            algorithms::degrees_of_separation(&graph, root, target)
        });
        tracing::debug!(root, target, result = %result, "Degree query");
        result
    }

    /// [`DegreeService::query`], keeping the query alongside its answer.
    pub fn answer(&self, root: &str, target: &str) -> DegreeAnswer {
        DegreeAnswer {
            root: root.to_string(),
            target: target.to_string(),
            result: self.query(root, target),
        }
    }

    /// Apply cast groups. Fails only on a malformed batch, in which case
    /// nothing is applied.
    pub fn add_movies(&self, groups: &[CastGroup]) -> error::Result<MutationSummary> {
        self.coordinator.apply_edges(groups)
    }

    /// Apply a title → cast batch; titles are not kept.
    pub fn add_movie_batch(&self, batch: MovieBatch) -> error::Result<MutationSummary> {
        self.add_movies(&batch.into_groups())
    }

    pub fn contains(&self, actor: &str) -> bool {
        self.graph.read().contains(actor)
    }

    pub fn graph_stats(&self) -> GraphStats {
        let graph = self.graph.read();
        GraphStats {
            total_nodes: graph.node_count(),
            total_edges: graph.edge_count(),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn persists_casts(&self) -> bool {
        self.coordinator.has_log()
    }
}
