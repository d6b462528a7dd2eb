//! Error types for the validation engine.

use thiserror::Error;

/// Errors that stop a validation run or a version comparison.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The reference metadata package is not present in the data store.
    #[error("the GFADEX reference metadata package is not present")]
    ReferencePackageMissing,

    /// Failed to parse a semantic version string.
    #[error("invalid version format: {0}")]
    InvalidVersion(String),
}

impl ValidationError {
    /// Returns a user-friendly message suitable for a blocking alert.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::ReferencePackageMissing => {
                "The GFADEX metadata package is not present. Please import the GFADEX package into the datastore first!"
            }
            Self::InvalidVersion(_) => "A version string could not be understood.",
        }
    }

    /// Whether the error blocks the whole run.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ReferencePackageMissing)
    }
}

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = ValidationError::ReferencePackageMissing;
        assert!(err.user_message().contains("import the GFADEX package"));
        assert!(err.is_fatal());

        let err = ValidationError::InvalidVersion("x.y".to_string());
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "invalid version format: x.y");
    }
}
