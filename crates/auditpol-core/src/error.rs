//! Error types for auditpol core operations.
//!
//! This module defines the error types used throughout the `auditpol-core` crate.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling audit policy documents.
#[derive(Error, Debug)]
pub enum Error {
    /// The given name is not a known audit profile.
    #[error("unknown audit profile {name:?}")]
    UnknownProfile {
        /// The offending profile name.
        name: String,
    },

    /// Manifest bytes could not be decoded.
    #[error("Failed to decode {target}: {source}")]
    Decode {
        /// What was being decoded (e.g. "policy", "rules").
        target: &'static str,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The decoded document declared a different kind or API version.
    #[error("Unexpected {field}: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        /// Either `kind` or `apiVersion`.
        field: &'static str,
        /// Value this codec accepts.
        expected: &'static str,
        /// Value found in the document.
        found: String,
    },

    /// The document does not declare its kind or API version.
    #[error("Missing {field} in policy document")]
    MissingTypeMeta {
        /// Either `kind` or `apiVersion`.
        field: &'static str,
    },

    /// A policy document could not be encoded.
    #[error("Failed to encode policy: {0}")]
    Encode(#[source] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_profile() {
        let err = Error::UnknownProfile {
            name: "Verbose".to_string(),
        };
        assert_eq!(err.to_string(), "unknown audit profile \"Verbose\"");
    }

    #[test]
    fn test_error_display_type_mismatch() {
        let err = Error::TypeMismatch {
            field: "kind",
            expected: "Policy",
            found: "ConfigMap".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected kind: expected \"Policy\", found \"ConfigMap\""
        );
    }
}
