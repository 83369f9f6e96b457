//! Configuration management for the service binaries.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`BACON__` prefix, `__` separator)
//! 2. Config file (`bacon.toml` by default)
//! 3. Defaults

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Result;

/// Default config file prefix, resolved by the `config` crate to `bacon.toml`,
/// `bacon.yaml`, etc.
pub const DEFAULT_CONFIG_PREFIX: &str = "bacon";

/// Graph loading and persistence settings (`[graph]` section).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GraphConfig {
    /// JSON Lines file of casts, one JSON array of actor names per line.
    #[serde(default = "default_actors_file")]
    pub actors_file: String,

    /// Append movies added at runtime to `actors_file` so they survive restarts.
    #[serde(default = "default_true")]
    pub persist_new_movies: bool,
}

/// HTTP server settings (`[server]` section).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Root actor used by the bacon-number endpoint.
    #[serde(default = "default_bacon_actor")]
    pub bacon_actor: String,
}

fn default_actors_file() -> String {
    "./preprocessed/actors.jsonl".to_string()
}

fn default_true() -> bool {
    true
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_bacon_actor() -> String {
    "Kevin Bacon".to_string()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            actors_file: default_actors_file(),
            persist_new_movies: default_true(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            bacon_actor: default_bacon_actor(),
        }
    }
}

/// Load one config section, falling back to its defaults when the section is absent.
///
/// A config file that exists but cannot be parsed is an error; a missing file is not.
pub fn load_section<T>(file_prefix: &str, section: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("BACON")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    match cfg.get::<T>(section) {
        Ok(section) => Ok(section),
        Err(config::ConfigError::NotFound(_)) => {
            tracing::debug!(section, "Config section not found, using defaults");
            Ok(T::default())
        }
        Err(e) => Err(e.into()),
    }
}
