use std::path::PathBuf;

use thiserror::Error;

use crate::context::Phase;

/// Errors from the Gate Transform.
///
/// Every variant is fatal for the build that raised it. Nothing here is retried:
/// build-time filesystem problems are not transient.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("theme \"{theme}\" is not in supported themes: {}", supported.join(", "))]
    UnsupportedTheme {
        theme: String,
        supported: Vec<String>,
    },

    #[error("invalid gated prefix \"{0}\": must be a single non-empty path segment")]
    InvalidPrefix(String),

    #[error("documentation source does not exist or is not a directory: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("documentation source already claims the gated prefix: {}", .0.display())]
    GatedPrefixCollision(PathBuf),

    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("copy destination {} lies inside source {}", to.display(), from.display())]
    DestinationInsideSource { from: PathBuf, to: PathBuf },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("hook {hook} invoked out of order (current phase: {phase})")]
    OutOfOrder { hook: &'static str, phase: Phase },

    #[error("scratch directory requested before configuration")]
    NotConfigured,
}

impl GateError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GateError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for Gate Transform operations.
pub type GateResult<T> = Result<T, GateError>;
