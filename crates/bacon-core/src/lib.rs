//! bacon-core: Shared types, configuration, and error handling for the degrees of
//! separation service.
//!
//! This crate provides the foundational types used across all components:
//! - Actor names and cast groups, the units the collaboration graph is built from
//! - `QueryResult`, the outcome of a degree query including its sentinels
//! - Configuration loading (file + environment overlay)
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use error::BaconError;
pub use types::{ActorName, CastGroup, MovieBatch, QueryResult};
