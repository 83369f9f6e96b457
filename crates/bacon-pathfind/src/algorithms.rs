//! Shortest-path search: bidirectional BFS and a single-sided reference BFS.

use std::collections::{HashMap, HashSet, VecDeque};

use bacon_core::QueryResult;
use bacon_graph::GraphStore;

/// Degree of separation between `root` and `target`.
///
/// Base cases are settled before any search: identical actors are 0 apart
/// whether or not they exist, then missing actors map to their sentinels.
pub fn degrees_of_separation(graph: &GraphStore, root: &str, target: &str) -> QueryResult {
    if root == target {
        return QueryResult::Degree(0);
    }
    match (graph.index_of(root), graph.index_of(target)) {
        (None, None) => QueryResult::BothMissing,
        (Some(_), None) => QueryResult::TargetMissing,
        (None, Some(_)) => QueryResult::RootMissing,
        (Some(root), Some(target)) => bidirectional_bfs(graph, root, target),
    }
}

/// One side of the bidirectional search.
struct Frontier {
    /// FIFO of (node, depth); depths are non-decreasing front to back.
    queue: VecDeque<(usize, usize)>,
    /// Depth of every node this side has claimed, its origin included at 0.
    depth: HashMap<usize, usize>,
}

impl Frontier {
    fn new(origin: usize) -> Self {
        Self {
            queue: VecDeque::from([(origin, 0)]),
            depth: HashMap::from([(origin, 0)]),
        }
    }

    /// Expand every queued node at the front depth and return the shortest
    /// meeting length seen, if any.
    ///
    /// A meeting never stops the layer early: a later node in the same layer
    /// can still produce a shorter total.
    fn expand_layer(
        &mut self,
        graph: &GraphStore,
        other: &Frontier,
        visited: &mut HashSet<usize>,
    ) -> Option<usize> {
        let &(_, layer) = self.queue.front()?;
        let mut best: Option<usize> = None;

        while let Some(&(node, depth)) = self.queue.front() {
            if depth != layer {
                break;
            }
            self.queue.pop_front();

            let next = depth + 1;
            for &neighbor in graph.neighbor_indices(node) {
                // The other side's origin sits in its map at depth 0, so a direct
                // hit on it is a meeting of length `next`.
                if let Some(&theirs) = other.depth.get(&neighbor) {
                    let total = next + theirs;
                    best = Some(best.map_or(total, |b| b.min(total)));
                } else if visited.insert(neighbor) {
                    self.queue.push_back((neighbor, next));
                    self.depth.insert(neighbor, next);
                }
            }
        }

        best
    }
}

/// Level-synchronous bidirectional BFS between two present actors.
///
/// Each round drains one full depth layer from the root side, then one from the
/// target side, and only then accepts the best meeting of the round. A node
/// claimed by either side is never enqueued by the other.
pub fn bidirectional_bfs(graph: &GraphStore, root: usize, target: usize) -> QueryResult {
    if root == target {
        return QueryResult::Degree(0);
    }

    let mut forward = Frontier::new(root);
    let mut backward = Frontier::new(target);
    let mut visited: HashSet<usize> = HashSet::from([root, target]);

    while !forward.queue.is_empty() && !backward.queue.is_empty() {
        let from_root = forward.expand_layer(graph, &backward, &mut visited);
        let from_target = backward.expand_layer(graph, &forward, &mut visited);

        let best = match (from_root, from_target) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        if let Some(degree) = best {
            tracing::trace!(degree, visited = visited.len(), "Frontiers met");
            return QueryResult::Degree(degree);
        }
    }

    tracing::trace!(visited = visited.len(), "Frontier exhausted without meeting");
    QueryResult::Unreachable
}

/// Plain single-sided BFS with the same base cases as
/// [`degrees_of_separation`]. Used as the reference in tests.
pub fn single_source_degree(graph: &GraphStore, root: &str, target: &str) -> QueryResult {
    if root == target {
        return QueryResult::Degree(0);
    }
    let (root, target) = match (graph.index_of(root), graph.index_of(target)) {
        (None, None) => return QueryResult::BothMissing,
        (Some(_), None) => return QueryResult::TargetMissing,
        (None, Some(_)) => return QueryResult::RootMissing,
        (Some(root), Some(target)) => (root, target),
    };

    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([(root, 0usize)]);

    while let Some((node, hops)) = queue.pop_front() {
        for &neighbor in graph.neighbor_indices(node) {
            if neighbor == target {
                return QueryResult::Degree(hops + 1);
            }
            if visited.insert(neighbor) {
                queue.push_back((neighbor, hops + 1));
            }
        }
    }

    QueryResult::Unreachable
}
