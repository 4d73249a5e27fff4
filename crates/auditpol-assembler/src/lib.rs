//! # auditpol Assembler
//!
//! Computes the effective audit policy for an API server by combining a
//! fixed base policy with the extra rules of a named profile and optional
//! caller-supplied custom rules.
//!
//! This crate provides:
//!
//! - [`manifest`] - Stores that resolve manifest names to bytes
//! - [`PolicyCatalog`] - The base policy and per-profile rules, built once
//! - [`PolicyAssembler`] - Ordered merge of base, profile and custom rules
//! - [`default_policy`] / [`get_audit_policy`] - Shortcuts over the embedded catalog
//!
//! ## Example
//!
//! ```rust
//! use auditpol_assembler::{get_audit_policy, PolicyCatalog};
//! use auditpol_core::{AuditProfile, Level, PolicyRule};
//!
//! let custom = [PolicyRule::new(Level::None).with_users(["system:kube-proxy"])];
//! let policy = get_audit_policy(AuditProfile::WriteRequestBodies, &custom).unwrap();
//!
//! assert_eq!(policy.name(), Some("WriteRequestBodies"));
//! assert_eq!(policy.rules.last(), custom.last());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assembler;
pub mod catalog;
pub mod error;
pub mod manifest;


pub use assembler::PolicyAssembler;
pub use catalog::PolicyCatalog;
pub use error::{AssembleError, CatalogError, PolicyError};
pub use manifest::{DirectoryManifests, EmbeddedManifests, ManifestStore, MemoryManifests};

use auditpol_core::{AuditProfile, PolicyDocument, PolicyRule};

/// Computes the audit policy for `profile` from the embedded catalog.
///
/// The returned document has `kind` and `apiVersion` unset; stamp them with
/// [`PolicyDocument::stamp_type_meta`] before serializing.
///
/// # Errors
///
/// Returns [`PolicyError::Catalog`] if the embedded manifests cannot be
/// loaded and [`PolicyError::Assemble`] for an unknown profile.
pub fn get_audit_policy(
    profile: AuditProfile,
    custom_rules: &[PolicyRule],
) -> Result<PolicyDocument, PolicyError> {
    let catalog = PolicyCatalog::embedded()?;
    Ok(catalog.assembler().compute_policy(profile, custom_rules)?)
}

/// Returns the serialized `Default` audit policy from the embedded catalog.
///
/// # Errors
///
/// Returns [`PolicyError::DefaultPolicy`] wrapping whatever failed underneath.
pub fn default_policy() -> Result<Vec<u8>, PolicyError> {
    PolicyCatalog::embedded()
        .map_err(PolicyError::default_policy)?
        .assembler()
        .default_policy()
}
