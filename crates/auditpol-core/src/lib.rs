//! # auditpol Core
//!
//! Core types for assembling API server audit policies.
//!
//! This crate provides the data structures shared by the rest of the
//! workspace:
//!
//! - [`PolicyDocument`] - An `audit.k8s.io/v1` policy document
//! - [`PolicyRule`] - One ordered, first-match-wins audit rule
//! - [`AuditProfile`] - Named presets of extra rules
//! - [`codec`] - YAML decoding and encoding of documents and rule lists
//!
//! ## Example
//!
//! ```rust
//! use auditpol_core::{codec, Level, PolicyDocument, PolicyRule};
//!
//! let mut policy = PolicyDocument::new()
//!     .with_rules([PolicyRule::new(Level::Metadata)])
//!     .with_type_meta();
//! policy.set_name("Default");
//!
//! let yaml = codec::encode_policy(&policy).unwrap();
//! let decoded = codec::decode_policy(&yaml).unwrap();
//! assert_eq!(decoded.rules, policy.rules);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod policy;
pub mod profile;

#[cfg(test)]
mod proptest_tests;

pub use error::{Error, Result};
pub use policy::{
    ExtraFields, GroupResources, Level, ObjectMeta, PolicyDocument, PolicyRule, Stage,
    API_VERSION, KIND,
};
pub use profile::AuditProfile;
