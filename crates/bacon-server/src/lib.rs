//! bacon-server: HTTP API over the degree service.
//!
//! The binary owns one [`bacon_pathfind::DegreeService`] and hands it to the
//! axum router as shared state.

pub mod error;
pub mod routes;

pub use error::{ApiError, ErrorBody};
pub use routes::{router, AppState, DegreeResponse, Triple};
