//! Error types for metadata standardization.

use dlt_model::ModelError;
use thiserror::Error;

/// Failures raised by a [`PatientHasher`](crate::PatientHasher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// The hashing backend could not produce identifiers.
    #[error("hashing backend unavailable: {message}")]
    Backend { message: String },

    /// The backend returned a different number of identifiers than requested.
    #[error("hasher returned {actual} patient ids for {expected} MRNs")]
    LengthMismatch { expected: usize, actual: usize },
}

impl HashError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Errors from [`MetadataCompleter`](crate::MetadataCompleter).
///
/// Both variants are passed through unchanged; no partial record is returned.
#[derive(Debug, Error)]
pub enum StandardizeError {
    #[error(transparent)]
    Arguments(#[from] ModelError),

    #[error(transparent)]
    Hashing(#[from] HashError),
}

pub type Result<T> = std::result::Result<T, StandardizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_error_is_not_rewrapped() {
        let err = StandardizeError::from(HashError::backend("timeout"));
        assert_eq!(err.to_string(), "hashing backend unavailable: timeout");
    }

    #[test]
    fn missing_argument_message() {
        let err = StandardizeError::from(ModelError::MissingArgument { name: "mrn" });
        assert_eq!(err.to_string(), "missing required argument 'mrn'");
    }
}
