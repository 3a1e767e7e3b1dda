//! Site build error types

use std::path::PathBuf;

use paywall_gate::GateError;
use thiserror::Error;

/// Site build errors
#[derive(Debug, Error)]
pub enum SiteError {
    /// Gate Transform hook failed
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Configuration file could not be parsed
    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Configuration is well-formed YAML but not a valid site config
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error with the path involved
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk error
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl SiteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SiteError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for site operations
pub type SiteResult<T> = Result<T, SiteError>;
