//! Audit policy assembly.
//!
//! The assembler merges three rule spans into a fresh copy of the base
//! policy, always in this order:
//!
//! 1. the base policy's own rules
//! 2. the profile's extra rules
//! 3. caller-supplied custom rules
//!
//! Each span keeps its relative order. Rules are never deduplicated,
//! reordered or validated; the API server evaluates them first-match-wins.

use auditpol_core::{codec, AuditProfile, PolicyDocument, PolicyRule};
use tracing::debug;

use crate::catalog::PolicyCatalog;
use crate::error::{AssembleError, PolicyError};

/// Computes audit policies from a borrowed [`PolicyCatalog`].
///
/// # Examples
///
/// ```rust
/// use auditpol_assembler::PolicyCatalog;
/// use auditpol_core::{AuditProfile, Level, PolicyDocument, PolicyRule};
///
/// let base = PolicyDocument::new().with_rules([PolicyRule::new(Level::None)]);
/// let catalog = PolicyCatalog::from_parts(
///     base,
///     [(AuditProfile::Default, vec![PolicyRule::new(Level::Metadata)])],
/// );
///
/// let policy = catalog
///     .assembler()
///     .compute_policy(AuditProfile::Default, &[PolicyRule::new(Level::Request)])
///     .unwrap();
///
/// let levels: Vec<_> = policy.rules.iter().map(|r| r.level).collect();
/// assert_eq!(levels, [Level::None, Level::Metadata, Level::Request]);
/// assert_eq!(policy.name(), Some("Default"));
/// assert!(policy.kind.is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PolicyAssembler<'a> {
    catalog: &'a PolicyCatalog,
}

impl<'a> PolicyAssembler<'a> {
    /// Creates an assembler over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a PolicyCatalog) -> Self {
        Self { catalog }
    }

    /// Computes the policy for `profile`, with `custom_rules` appended last.
    ///
    /// The returned document is named after the profile and owns all of its
    /// data. `kind` and `apiVersion` are left unset; callers stamp them
    /// before serializing.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::UnknownProfile`] if the catalog holds no
    /// rules for `profile`. There is no fallback profile.
    pub fn compute_policy(
        &self,
        profile: AuditProfile,
        custom_rules: &[PolicyRule],
    ) -> Result<PolicyDocument, AssembleError> {
        let mut policy = self.catalog.base_policy().clone();
        policy.set_name(profile.as_str());

        let extra_rules = self
            .catalog
            .profile_rules(profile)
            .ok_or(AssembleError::UnknownProfile { profile })?;

        policy.rules.reserve(extra_rules.len() + custom_rules.len());
        policy.rules.extend_from_slice(extra_rules);
        policy.rules.extend_from_slice(custom_rules);

        debug!(
            %profile,
            profile_rules = extra_rules.len(),
            custom_rules = custom_rules.len(),
            total_rules = policy.rules.len(),
            "Computed audit policy"
        );

        Ok(policy)
    }

    /// Returns the serialized `Default` policy with type metadata stamped.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::DefaultPolicy`] wrapping the assembly or
    /// encoding failure.
    pub fn default_policy(&self) -> Result<Vec<u8>, PolicyError> {
        self.encode_default().map_err(PolicyError::default_policy)
    }

    fn encode_default(&self) -> Result<Vec<u8>, PolicyError> {
        let policy = self
            .compute_policy(AuditProfile::Default, &[])?
            .with_type_meta();
        Ok(codec::encode_policy(&policy)?)
    }
}
