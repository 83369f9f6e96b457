//! API errors and their JSON bodies.
//!
//! Every error body carries a stable negative `Code` so clients can branch on
//! it without parsing messages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routes::Triple;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing parameter \"{0}\"")]
    MissingParameter(&'static str),

    #[error("Parsing failed at line {line}, column {column}")]
    InvalidJson { line: usize, column: usize },

    #[error("{} pairs succeeded; processing stopped at first failure: {}", .successes.len(), successes_json(.successes))]
    MultiFailed { successes: Vec<Triple> },

    #[error("{0}")]
    MalformedBatch(String),

    #[error("{0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorBody {
    pub error: String,
    pub code: i64,
    pub description: String,
    pub details: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Internal(_) => -1,
            Self::MissingParameter(_) => -2,
            Self::InvalidJson { .. } => -3,
            Self::MultiFailed { .. } => -4,
            Self::MalformedBatch(_) => -5,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Internal(_) => "Unknown Error",
            Self::MissingParameter(_) => "Missing Parameters",
            Self::InvalidJson { .. } => "JSON decode error",
            Self::MultiFailed { .. } => "Not all degrees found",
            Self::MalformedBatch(_) => "Malformed batch",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Internal(_) => "Something unexpected happened; please try again",
            Self::MissingParameter(_) => "The request was missing one or more required parameters",
            Self::InvalidJson { .. } => "There was an error attempting to decode the provided JSON",
            Self::MultiFailed { .. } => {
                "At least one of the provided actor pairs could not be queried successfully"
            }
            Self::MalformedBatch(_) => "The submitted movies could not be added",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.title().to_string(),
            code: self.code(),
            description: self.description().to_string(),
            details: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson {
            line: err.line(),
            column: err.column(),
        }
    }
}

impl From<bacon_pathfind::PathfindError> for ApiError {
    fn from(err: bacon_pathfind::PathfindError) -> Self {
        if err.is_malformed_batch() {
            Self::MalformedBatch(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(err.to_string())
    }
}

fn successes_json(successes: &[Triple]) -> String {
    serde_json::to_string(successes).unwrap_or_default()
}

pub type ApiResult<T> = Result<T, ApiError>;
