//! Error types for the library layer.

use thiserror::Error;

use crate::config::ConfigError;
use crate::export::ExportError;

/// Errors produced by the library layer, wrapping upstream API errors and
/// adding configuration, export and input validation failures.
#[derive(Error, Debug)]
pub enum EgytechError {
    /// An error from the underlying API client, including validation failures.
    #[error("API error: {0}")]
    Api(#[from] egytech_api::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    /// User-provided input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A concurrent request task panicked or was cancelled.
    #[error("Request task failed: {0}")]
    Task(String),
}

impl From<egytech_api::ValidationError> for EgytechError {
    fn from(e: egytech_api::ValidationError) -> Self {
        Self::Api(e.into())
    }
}
