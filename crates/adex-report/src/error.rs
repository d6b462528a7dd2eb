//! Error types for report rendering and export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while rendering or writing a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// Failed to write an export file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialisation failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// PDF document construction failed.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// JSON serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns a hint on how to resolve the error.
    #[must_use]
    pub fn suggestion(&self) -> &str {
        match self {
            Self::Io { .. } => "Check that the output directory exists and is writable.",
            Self::Csv(_) | Self::Json(_) => "The report could not be serialised. Please report this problem.",
            Self::Pdf(_) => "The PDF could not be generated. Try the CSV or JSON export instead.",
        }
    }
}

impl From<printpdf::Error> for ReportError {
    fn from(err: printpdf::Error) -> Self {
        Self::Pdf(err.to_string())
    }
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = ReportError::io(
            "/tmp/out/report.pdf",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/tmp/out/report.pdf"));
        assert!(err.suggestion().contains("writable"));
    }
}
