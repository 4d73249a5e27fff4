//! Error types for catalog loading and policy assembly.

use std::path::PathBuf;

use auditpol_core::AuditProfile;
use thiserror::Error;

/// Errors that prevent a [`PolicyCatalog`](crate::PolicyCatalog) from being built.
///
/// None of these are recoverable: a catalog with a missing or malformed
/// manifest is never exposed.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The manifest store has no asset with this name.
    #[error("Manifest {name} not found")]
    MissingManifest {
        /// Logical manifest name.
        name: String,
    },

    /// Reading a manifest from disk failed.
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A manifest was found but could not be decoded.
    #[error("Failed to decode manifest {name}: {source}")]
    Decode {
        /// Logical manifest name.
        name: String,
        /// Underlying codec error.
        #[source]
        source: auditpol_core::Error,
    },
}

/// Errors returned by [`PolicyAssembler::compute_policy`](crate::PolicyAssembler::compute_policy).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// The catalog holds no rules for this profile.
    #[error("unknown audit profile \"{profile}\"")]
    UnknownProfile {
        /// The profile that was requested.
        profile: AuditProfile,
    },
}

/// Errors returned by the convenience operations built on the embedded catalog.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// The embedded catalog could not be built.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Assembly failed.
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// Encoding the assembled document failed.
    #[error(transparent)]
    Codec(#[from] auditpol_core::Error),

    /// Retrieving the default policy failed.
    #[error("failed to retrieve default audit policy: {source}")]
    DefaultPolicy {
        /// What went wrong underneath.
        #[source]
        source: Box<PolicyError>,
    },
}

impl PolicyError {
    pub(crate) fn default_policy(source: impl Into<Self>) -> Self {
        Self::DefaultPolicy {
            source: Box::new(source.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_unknown_profile_display() {
        let err = AssembleError::UnknownProfile {
            profile: AuditProfile::AllRequestBodies,
        };
        assert_eq!(err.to_string(), "unknown audit profile \"AllRequestBodies\"");
    }

    #[test]
    fn test_missing_manifest_display() {
        let err = CatalogError::MissingManifest {
            name: "manifests/base-policy.yaml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Manifest manifests/base-policy.yaml not found"
        );
    }

    #[test]
    fn test_default_policy_keeps_source() {
        let err = PolicyError::default_policy(AssembleError::UnknownProfile {
            profile: AuditProfile::Default,
        });

        assert_eq!(
            err.to_string(),
            "failed to retrieve default audit policy: unknown audit profile \"Default\""
        );
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "unknown audit profile \"Default\"");
    }
}
