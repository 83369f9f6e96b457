//! Memo table for degree queries.
//!
//! Keyed by root then target, so lookups borrow `&str` without allocating.
//! Every computed result is stored in both orientations; the reverse entry
//! gets the orientation-translated value (`RootMissing` ⇄ `TargetMissing`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use bacon_core::{ActorName, QueryResult};

use crate::types::CacheStats;

/// Concurrent memo table of query results.
///
/// Parallel lookups may insert different keys at the same time. Clearing is
/// only consistent with the graph if the caller excludes lookups while the
/// graph changes; [`crate::DegreeService`] does that with its graph lock.
#[derive(Debug, Default)]
pub struct DegreeCache {
    entries: DashMap<ActorName, HashMap<ActorName, QueryResult>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DegreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for `(root, target)`, consulting the reverse orientation
    /// when the exact key is absent.
    pub fn get(&self, root: &str, target: &str) -> Option<QueryResult> {
        let exact = self
            .entries
            .get(root)
            .and_then(|targets| targets.get(target).copied());
        if exact.is_some() {
            return exact;
        }
        self.entries
            .get(target)
            .and_then(|roots| roots.get(root).copied())
            .map(QueryResult::reversed)
    }

    /// Return the cached result, or run `compute` and cache its result in both
    /// orientations.
    ///
    /// `BothMissing` is returned but never stored.
    pub fn lookup<F>(&self, root: &str, target: &str, compute: F) -> QueryResult
    where
        F: FnOnce() -> QueryResult,
    {
        if let Some(result) = self.get(root, target) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return result;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = compute();
        if result != QueryResult::BothMissing {
            self.insert(root, target, result);
        }
        result
    }

    /// Store `result` for `(root, target)` and its translation for `(target, root)`.
    pub fn insert(&self, root: &str, target: &str, result: QueryResult) {
        self.entries
            .entry(ActorName::from(root))
            .or_default()
            .insert(ActorName::from(target), result);
        self.entries
            .entry(ActorName::from(target))
            .or_default()
            .insert(ActorName::from(root), result.reversed());
    }

    /// Drop every entry. Any new edge can shorten any path, so there is no
    /// finer-grained invalidation.
    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    /// Number of cached (root, target) entries.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|targets| targets.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_miss_then_hit() {
        let cache = DegreeCache::new();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            QueryResult::Degree(2)
        };

        assert_eq!(cache.lookup("A", "C", compute), QueryResult::Degree(2));
        assert_eq!(cache.lookup("A", "C", compute), QueryResult::Degree(2));
        assert_eq!(calls.get(), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_reverse_orientation_is_translated() {
        let cache = DegreeCache::new();
        cache.lookup("Kevin Bacon", "Big Foot", || QueryResult::TargetMissing);

        let reversed = cache.lookup("Big Foot", "Kevin Bacon", || {
            panic!("reverse lookup should be served from cache")
        });
        assert_eq!(reversed, QueryResult::RootMissing);
    }

    #[test]
    fn test_symmetric_results_pass_through() {
        let cache = DegreeCache::new();
        cache.insert("A", "B", QueryResult::Unreachable);
        cache.insert("C", "D", QueryResult::BothMissing);
        cache.insert("E", "F", QueryResult::Degree(3));

        assert_eq!(cache.get("B", "A"), Some(QueryResult::Unreachable));
        assert_eq!(cache.get("D", "C"), Some(QueryResult::BothMissing));
        assert_eq!(cache.get("F", "E"), Some(QueryResult::Degree(3)));
    }

    #[test]
    fn test_reverse_only_entry_is_translated() {
        let cache = DegreeCache::new();
        // Seed only one orientation, bypassing `insert`.
        cache
            .entries
            .entry(ActorName::from("X"))
            .or_default()
            .insert(ActorName::from("Y"), QueryResult::RootMissing);

        assert_eq!(cache.get("Y", "X"), Some(QueryResult::TargetMissing));
        assert_eq!(cache.get("X", "Y"), Some(QueryResult::RootMissing));
    }

    #[test]
    fn test_both_orientations_stored() {
        let cache = DegreeCache::new();
        cache.insert("A", "B", QueryResult::Degree(1));
        assert_eq!(cache.len(), 2);

        cache.insert("A", "A", QueryResult::Degree(0));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_both_missing_is_not_stored() {
        let cache = DegreeCache::new();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            QueryResult::BothMissing
        };

        for i in 0..10 {
            let root = format!("Nobody {i}");
            assert_eq!(cache.lookup(&root, "Also Nobody", compute), QueryResult::BothMissing);
        }
        assert_eq!(cache.lookup("Nobody 0", "Also Nobody", compute), QueryResult::BothMissing);

        assert_eq!(calls.get(), 11);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 11);
    }

    #[test]
    fn test_invalidate_all() {
        let cache = DegreeCache::new();
        cache.insert("A", "F", QueryResult::Degree(5));
        cache.invalidate_all();

        assert!(cache.is_empty());
        assert_eq!(cache.get("A", "F"), None);
        assert_eq!(cache.lookup("A", "F", || QueryResult::Degree(1)), QueryResult::Degree(1));
    }
}
