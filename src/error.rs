//! Error handling module for the manifest generator
//!
//! Provides the library error type using thiserror. Resolution and output
//! failures are reported through these variants; the binary wraps them with
//! anyhow context for display.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for manifest generation
#[derive(Error, Debug)]
pub enum StressGenError {
    /// A parameter with no default was not supplied (hosts, password)
    #[error("missing required parameter: --{0}")]
    MissingRequiredField(&'static str),

    /// A supplied or derived value breaks an invariant
    #[error("invalid value for --{field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    /// Opening or writing the output file failed
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to standard output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for manifest generation
pub type Result<T> = std::result::Result<T, StressGenError>;

impl StressGenError {
    /// Create an invalid value error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error stems from user input rather than the environment.
    ///
    /// The binary reports these as usage errors.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField(_) | Self::InvalidValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StressGenError::MissingRequiredField("password");
        assert_eq!(err.to_string(), "missing required parameter: --password");

        let err = StressGenError::invalid("cpu", "must be a positive integer");
        assert_eq!(
            err.to_string(),
            "invalid value for --cpu: must be a positive integer"
        );
    }

    #[test]
    fn test_file_write_display_names_path() {
        let err = StressGenError::FileWrite {
            path: PathBuf::from("/nonexistent/out.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nonexistent/out.yaml"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_usage_error_classification() {
        assert!(StressGenError::MissingRequiredField("hosts").is_usage_error());
        assert!(StressGenError::invalid("mode", "empty").is_usage_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: StressGenError = io_err.into();
        assert!(matches!(err, StressGenError::Io(_)));
        assert!(!err.is_usage_error());
    }
}
