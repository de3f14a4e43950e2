//! Error types for loading and querying specs

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for spec operations
pub type SpecResult<T> = std::result::Result<T, SpecError>;

/// Spec loading and reporting errors
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Failed to fetch spec: {0}")]
    Fetch(String),

    #[error("Failed to read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SpecError {
    /// Whether the document could not be acquired (network or file)
    pub fn is_fetch(&self) -> bool {
        matches!(self, SpecError::Fetch(_) | SpecError::FileAccess { .. })
    }

    /// Whether the document was acquired but is not a usable spec
    pub fn is_parse(&self) -> bool {
        matches!(self, SpecError::Json(_) | SpecError::Yaml(_))
    }
}
