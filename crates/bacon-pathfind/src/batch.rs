//! Scripted request files.
//!
//! A request file is a JSON array; each element is one request:
//!
//! ```json
//! [
//!   {"bacon": "Tom Hanks"},
//!   {"degree": ["Tom Hanks", "Meg Ryan"]},
//!   {"new": {"Sequel": ["Tom Hanks", "Newcomer"]}},
//!   {"multi": [["Tom Hanks", "Newcomer"], ["Meg Ryan", "Newcomer"]]}
//! ]
//! ```
//!
//! Requests run in file order, so a `new` request affects every query after it.

use serde::{Deserialize, Serialize};

use bacon_core::MovieBatch;

use crate::types::{DegreeAnswer, MutationSummary};
use crate::DegreeService;

/// One scripted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchRequest {
    /// Degree between the bacon actor and this actor.
    Bacon(String),
    /// Degree between a root and a target.
    Degree(String, String),
    /// Movies to add, title → cast.
    New(MovieBatch),
    /// Several (root, target) pairs.
    Multi(Vec<(String, String)>),
}

/// Result of one scripted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    Degrees(Vec<DegreeAnswer>),
    Added(MutationSummary),
    /// The request was rejected; later requests still run.
    Failed { error: String },
}

/// Parse a request file's contents.
pub fn parse_requests(input: &str) -> serde_json::Result<Vec<BatchRequest>> {
    serde_json::from_str(input)
}

impl DegreeService {
    /// Run one scripted request; `bacon_actor` is the root for `bacon` requests.
    pub fn run_request(&self, bacon_actor: &str, request: BatchRequest) -> BatchOutcome {
        match request {
            BatchRequest::Bacon(actor) => {
                BatchOutcome::Degrees(vec![self.answer(bacon_actor, &actor)])
            }
            BatchRequest::Degree(root, target) => {
                BatchOutcome::Degrees(vec![self.answer(&root, &target)])
            }
            BatchRequest::Multi(pairs) => BatchOutcome::Degrees(
                pairs
                    .iter()
                    .map(|(root, target)| self.answer(root, target))
                    .collect(),
            ),
            BatchRequest::New(batch) => match self.add_movie_batch(batch) {
                Ok(summary) => BatchOutcome::Added(summary),
                Err(e) => {
                    tracing::warn!(error = %e, "Scripted movie batch rejected");
                    BatchOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            },
        }
    }
}
