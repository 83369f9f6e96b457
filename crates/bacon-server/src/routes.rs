//! HTTP handlers.
//!
//! Results are `[root, target, code]` triples. `code` is the degree, `-1`
//! when the root is missing, `-2` for the target, `-3` for both and `null`
//! when the actors are not connected. Missing actors are valid input, so
//! those answers are 200s.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use bacon_core::{MovieBatch, QueryResult};
use bacon_pathfind::DegreeService;

use crate::error::{ApiError, ApiResult};

/// `(root, target, code)`, serialized as a JSON array.
pub type Triple = (String, String, Option<i64>);

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DegreeService>,
    /// Root actor for the bacon-number endpoint.
    pub bacon_actor: Arc<str>,
    request_ids: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(service: Arc<DegreeService>, bacon_actor: impl Into<Arc<str>>) -> Self {
        Self {
            service,
            bacon_actor: bacon_actor.into(),
            request_ids: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Monotonically increasing id for correlating a request's log lines.
    pub fn next_request_id(&self) -> u64 {
        self.request_ids.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Run a query off the async runtime; searches are CPU-bound.
    async fn query(&self, root: &str, target: &str) -> ApiResult<QueryResult> {
        let service = self.service.clone();
        let (root, target) = (root.to_string(), target.to_string());
        Ok(tokio::task::spawn_blocking(move || service.query(&root, &target)).await?)
    }
}

/// Successful response body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DegreeResponse {
    pub results: Vec<Triple>,
    pub description: String,
}

impl DegreeResponse {
    fn new(results: Vec<Triple>, description: impl Into<String>) -> Json<Self> {
        Json(Self {
            results,
            description: description.into(),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(docs))
        .route("/api/bacon-number", get(bacon_number))
        .route("/api/actor-number", get(actor_number))
        .route("/api/multiple-degrees", get(multiple_degrees))
        .route("/api/movie", post(add_movies))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn triple(root: &str, target: &str, result: QueryResult) -> Triple {
    (root.to_string(), target.to_string(), result.legacy_code())
}

fn param<'a>(params: &'a HashMap<String, String>, name: &'static str) -> ApiResult<&'a str> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or(ApiError::MissingParameter(name))
}

/// Log a failed request and pass the error through.
fn rejected(req_id: u64, err: ApiError) -> ApiError {
    tracing::warn!(req_id, code = err.code(), details = %err, "Request rejected");
    err
}

async fn docs() -> Json<Value> {
    Json(json!({
        "bacon-number": {
            "Description": "Returns the bacon number of the given actor",
            "Parameters": {"actor": "Actor to find the bacon number for"}
        },
        "actor-number": {
            "Description": "Returns the degrees of separation between any two actors",
            "Parameters": {
                "root": "Root actor to search from",
                "target": "Target actor to search for"
            }
        },
        "movie": {
            "Description": "Add a new movie to the dataset",
            "Parameters": {},
            "Data": {
                "movie1": ["actor1", "actor2", "actorN"],
                "movie2": ["actor1", "actor2", "actorN"],
                "movieN": ["actor1", "actor2", "actorN"]
            }
        },
        "multiple-degrees": {
            "Description": "Query the degrees for multiple actor pairs in one request",
            "Parameters": {},
            "Data": [["actor1", "actor2"], ["actor3", "actor4"], ["actor1", "actor4"]]
        }
    }))
}

async fn bacon_number(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<DegreeResponse>> {
    let req_id = state.next_request_id();
    tracing::info!(req_id, "Processing bacon-number request");

    let target = param(&params, "actor").map_err(|e| rejected(req_id, e))?;
    let root = state.bacon_actor.as_ref();
    let result = state.query(root, target).await?;
    tracing::info!(req_id, target, result = %result, "Bacon number found");

    let description = match result {
        QueryResult::TargetMissing | QueryResult::BothMissing => {
            format!("\"{target}\" is not in the dataset")
        }
        _ => "Success".to_string(),
    };
    Ok(DegreeResponse::new(vec![triple(root, target, result)], description))
}

async fn actor_number(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<DegreeResponse>> {
    let req_id = state.next_request_id();
    tracing::info!(req_id, "Processing actor-number request");

    let root = param(&params, "root").map_err(|e| rejected(req_id, e))?;
    let target = param(&params, "target").map_err(|e| rejected(req_id, e))?;
    let result = state.query(root, target).await?;
    tracing::info!(req_id, root, target, result = %result, "Degree found");

    let description = match result {
        QueryResult::RootMissing => format!("\"{root}\" is not in the dataset"),
        QueryResult::TargetMissing => format!("\"{target}\" is not in the dataset"),
        QueryResult::BothMissing => {
            format!("Neither \"{root}\" nor \"{target}\" is in the dataset")
        }
        _ => "Success".to_string(),
    };
    Ok(DegreeResponse::new(vec![triple(root, target, result)], description))
}

/// A `[root, target]` pair, or `None` for anything else.
fn as_pair(value: &Value) -> Option<(&str, &str)> {
    match value.as_array()?.as_slice() {
        [root, target] => Some((root.as_str()?, target.as_str()?)),
        _ => None,
    }
}

async fn multiple_degrees(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<DegreeResponse>> {
    let req_id = state.next_request_id();
    tracing::info!(req_id, "Processing multiple-degrees request");

    let value: Value = serde_json::from_slice(&body).map_err(|e| rejected(req_id, e.into()))?;
    let Some(pairs) = value.as_array() else {
        return Err(rejected(req_id, ApiError::MultiFailed { successes: Vec::new() }));
    };
    if pairs.is_empty() {
        tracing::info!(req_id, "No pairs provided");
        return Ok(DegreeResponse::new(Vec::new(), "No pairs provided"));
    }

    let mut successes = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let Some((root, target)) = as_pair(pair) else {
            return Err(rejected(req_id, ApiError::MultiFailed { successes }));
        };
        let result = state.query(root, target).await?;
        tracing::debug!(req_id, root, target, result = %result, "Degree found");
        successes.push(triple(root, target, result));
    }

    tracing::info!(req_id, pairs = successes.len(), "Found degrees for all pairs");
    let description = format!("Degrees for {} pairs found successfully", successes.len());
    Ok(DegreeResponse::new(successes, description))
}

async fn add_movies(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<DegreeResponse>)> {
    let req_id = state.next_request_id();
    tracing::info!(req_id, "Processing movie request");

    let value: Value = serde_json::from_slice(&body).map_err(|e| rejected(req_id, e.into()))?;
    let batch: MovieBatch = serde_json::from_value(value)
        .map_err(|e| rejected(req_id, ApiError::MalformedBatch(e.to_string())))?;
    let movies = batch.len();

    let service = state.service.clone();
    let summary = tokio::task::spawn_blocking(move || service.add_movie_batch(batch))
        .await?
        .map_err(|e| rejected(req_id, e.into()))?;
    tracing::info!(
        req_id,
        movies,
        new_actors = summary.new_actors,
        persisted = summary.persisted,
        "Added new movies"
    );

    Ok((
        StatusCode::CREATED,
        DegreeResponse::new(Vec::new(), "All movies added successfully"),
    ))
}
