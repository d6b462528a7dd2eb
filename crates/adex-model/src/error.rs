//! Errors raised while parsing snapshots at the fetch boundary.

use thiserror::Error;

/// Snapshot parsing errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The document is not valid JSON or does not match the record shape.
    #[error("invalid {collection} document: {source}")]
    Json {
        /// Collection being parsed (e.g. "indicators").
        collection: String,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The document is neither a bare array nor an object wrapping one.
    #[error("expected an array or an object with a '{key}' array")]
    UnexpectedShape {
        /// Wrapper key that was looked up.
        key: String,
    },
}

impl ModelError {
    pub(crate) fn json(collection: &str, source: serde_json::Error) -> Self {
        Self::Json {
            collection: collection.to_string(),
            source,
        }
    }
}

/// Result type alias for snapshot parsing.
pub type Result<T> = std::result::Result<T, ModelError>;
