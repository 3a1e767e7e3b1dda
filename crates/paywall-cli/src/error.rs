//! CLI error types

use std::path::PathBuf;

use paywall_gate::GateError;
use paywall_site::SiteError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Site build failed
    #[error(transparent)]
    Site(#[from] SiteError),

    /// Gate Transform could not be constructed
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Configuration file not found
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
