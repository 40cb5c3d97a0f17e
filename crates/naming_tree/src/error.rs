use std::path::PathBuf;

use thiserror::Error;

use crate::tree::ROOT_TITLE;

/// Reasons a naming schema cannot be turned into a tree.
///
/// A failed load never replaces the tree that is already installed.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("schema is not a valid JSON list of topics: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema is empty")]
    Empty,
    #[error("the first schema title should be '{}', found '{found}'", ROOT_TITLE)]
    RootTitle { found: String },
    #[error("Bound topic under '{prefix}' has no sub-topic carrying its size")]
    BoundWithoutMetadata { prefix: String },
}

/// A name whose trailing sequence number cannot be incremented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("'{name}' has no sequence number after its last '_'")]
    MissingNumber { name: String },
    #[error("'{suffix}' in '{name}' is not a sequence number")]
    NotANumber { name: String, suffix: String },
}
