//! Error types shared across the bibsearch crates.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying config source failed to load or deserialize.
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A loaded value is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
