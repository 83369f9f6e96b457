//! Core domain types for the collaboration graph.
//!
//! Actors are the nodes; a movie cast links every pair of its members.
//! These types are shared by ingestion, the query engine, and the HTTP API.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ── Actors ────────────────────────────────────────────────────────

/// An actor's name, the opaque identity of a node in the graph.
///
/// Backed by `Arc<str>` so the same name can sit in the node table and in
/// cache keys without copying the string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorName(Arc<str>);

impl ActorName {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ActorName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActorName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ActorName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ActorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Casts ─────────────────────────────────────────────────────────

/// The actors credited together on one movie.
///
/// Every member is connected to every other member. Duplicate names are
/// allowed here and collapse when the group is folded into the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastGroup(pub Vec<ActorName>);

impl CastGroup {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ActorName>,
    {
        Self(members.into_iter().map(Into::into).collect())
    }

    pub fn members(&self) -> &[ActorName] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// New movies submitted at runtime: title → cast.
///
/// Titles are informational only; the graph keeps no movie nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieBatch(pub BTreeMap<String, CastGroup>);

impl MovieBatch {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop the titles and keep the casts, in title order.
    pub fn into_groups(self) -> Vec<CastGroup> {
        self.0.into_values().collect()
    }
}

// ── Query Results ─────────────────────────────────────────────────

/// Outcome of a degree-of-separation query.
///
/// Missing or disconnected actors are valid input, so the sentinels are
/// ordinary variants rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "degree", rename_all = "snake_case")]
pub enum QueryResult {
    /// Length of the shortest path, in edges.
    Degree(usize),
    /// The root actor is not in the graph (the target is).
    RootMissing,
    /// The target actor is not in the graph (the root is).
    TargetMissing,
    /// Neither actor is in the graph.
    BothMissing,
    /// Both actors exist but no path connects them.
    Unreachable,
}

impl QueryResult {
    /// The same result as seen from the opposite orientation (target → root).
    pub fn reversed(self) -> Self {
        match self {
            Self::RootMissing => Self::TargetMissing,
            Self::TargetMissing => Self::RootMissing,
            other => other,
        }
    }

    pub fn degree(self) -> Option<usize> {
        match self {
            Self::Degree(d) => Some(d),
            _ => None,
        }
    }

    /// Integer encoding used on the wire: the degree itself, `-1` root missing,
    /// `-2` target missing, `-3` both missing, `None` for unreachable.
    pub fn legacy_code(self) -> Option<i64> {
        match self {
            Self::Degree(d) => Some(d as i64),
            Self::RootMissing => Some(-1),
            Self::TargetMissing => Some(-2),
            Self::BothMissing => Some(-3),
            Self::Unreachable => None,
        }
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degree(d) => write!(f, "{d}"),
            Self::RootMissing => f.write_str("root missing"),
            Self::TargetMissing => f.write_str("target missing"),
            Self::BothMissing => f.write_str("both missing"),
            Self::Unreachable => f.write_str("unreachable"),
        }
    }
}
