//! Errors surfaced while reading the plugin option.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The option string is not JSON, or an object with mistyped known keys.
    #[error("invalid dts-rename plugin config: {0}")]
    Json(#[from] serde_json::Error),
}
