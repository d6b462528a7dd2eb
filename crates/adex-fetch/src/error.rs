//! Error types for snapshot fetching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a snapshot document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("network error fetching {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    /// The server answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The document does not exist on the server or on disk.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Reading a local export failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The body is not JSON.
    #[error("invalid JSON in {resource}: {source}")]
    Json {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON does not have the expected record shape.
    #[error(transparent)]
    Model(#[from] adex_model::ModelError),

    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// Returns a user-friendly error message.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network { .. } => "Could not connect to the server. Please check the server URL and your connection.",
            Self::Status { status: 401 | 403, .. } => "The server rejected the credentials. Check the API token.",
            Self::Status { .. } => "The server returned an error.",
            Self::NotFound { .. } => "The requested document does not exist.",
            Self::Io { .. } => "A snapshot file could not be read.",
            Self::Json { .. } | Self::Model(_) => "A snapshot document is malformed.",
            Self::Client(_) => "An unexpected error occurred.",
        }
    }
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
