use std::path::PathBuf;
use thiserror::Error;

/// Reasons the search index could not be made available.
///
/// None of these are fatal to a page view: the navigator logs them and keeps
/// working against an empty index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read search index {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse search index: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid search index entry #{position}: {reason}")]
    InvalidEntry { position: usize, reason: String },
}

/// Failures while generating a search index from a docs directory.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("classes directory not found: {}", .0.display())]
    MissingClassesDir(PathBuf),

    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write search index {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize search index: {0}")]
    Serialize(#[from] serde_json::Error),
}
