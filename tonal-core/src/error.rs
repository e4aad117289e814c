//! Load-time errors.
//!
//! Everything that touches the filesystem happens before the first request
//! is served, so these errors are fatal at startup and never retried. A
//! backend keeps its load error behind an `Arc` and hands out the same one
//! on every later use.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tonal_types::InputError;

/// Failure to load a classifier artifact or a linguistic resource.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Artifact is not valid JSON for the expected schema.
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Artifact parsed but its dimensions disagree.
    #[error("inconsistent artifact {}: {reason}", path.display())]
    Shape {
        /// File that failed.
        path: PathBuf,
        /// What did not line up.
        reason: String,
    },
    /// A line of a text resource could not be interpreted.
    #[error("{}:{line}: {reason}", path.display())]
    Resource {
        /// File that failed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure of a single analysis request.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// The submission was rejected at the boundary.
    #[error(transparent)]
    Input(#[from] InputError),
    /// The scoring backend could not be initialized.
    #[error("scoring backend unavailable: {0}")]
    Backend(#[from] Arc<LoadError>),
}
