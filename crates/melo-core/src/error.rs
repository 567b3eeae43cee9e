use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("mapping file not found at {}", path.display())]
    MappingNotFound { path: PathBuf },

    #[error("failed to read mapping file {}: {source}", path.display())]
    MappingRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping document: {0}")]
    MappingParse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("record did not serialize to an object: {0}")]
    NotAnObject(String),
}
