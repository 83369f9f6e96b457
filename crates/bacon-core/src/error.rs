use thiserror::Error;

/// Top-level error type shared by the service binaries.
#[derive(Error, Debug)]
pub enum BaconError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, BaconError>;
