//! The policy catalog.
//!
//! A [`PolicyCatalog`] holds the base policy and the extra rules of every
//! profile. It is built once from a [`ManifestStore`] and never changes
//! afterwards, so it can be shared freely between threads.

use std::collections::BTreeMap;

use auditpol_core::{codec, AuditProfile, PolicyDocument, PolicyRule};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::assembler::PolicyAssembler;
use crate::error::CatalogError;
use crate::manifest::{profile_manifest, EmbeddedManifests, ManifestStore, BASE_POLICY_MANIFEST};

static EMBEDDED_CATALOG: OnceCell<PolicyCatalog> = OnceCell::new();

/// Base policy plus per-profile extra rules.
///
/// # Examples
///
/// ```rust
/// use auditpol_assembler::{manifest::EmbeddedManifests, PolicyCatalog};
/// use auditpol_core::AuditProfile;
///
/// let catalog = PolicyCatalog::load(&EmbeddedManifests).unwrap();
/// assert!(catalog.profile_rules(AuditProfile::Default).is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyCatalog {
    base_policy: PolicyDocument,
    profile_rules: BTreeMap<AuditProfile, Vec<PolicyRule>>,
}

impl PolicyCatalog {
    /// Builds a catalog from the base policy and one rules manifest per
    /// known profile.
    ///
    /// # Errors
    ///
    /// Returns an error if any manifest is missing or cannot be decoded.
    /// No partially loaded catalog is ever returned.
    pub fn load<S>(store: &S) -> Result<Self, CatalogError>
    where
        S: ManifestStore + ?Sized,
    {
        let bytes = store.asset(BASE_POLICY_MANIFEST)?;
        let mut base_policy =
            codec::decode_typed_policy(&bytes).map_err(|source| CatalogError::Decode {
                name: BASE_POLICY_MANIFEST.to_string(),
                source,
            })?;
        base_policy.clear_type_meta();
        debug!(
            store = store.name(),
            rules = base_policy.rules.len(),
            "Loaded base policy"
        );

        let mut profile_rules = BTreeMap::new();
        for profile in AuditProfile::ALL {
            let name = profile_manifest(profile);
            let bytes = store.asset(&name)?;
            let rules = codec::decode_rules(&bytes)
                .map_err(|source| CatalogError::Decode { name, source })?;
            debug!(%profile, rules = rules.len(), "Loaded profile rules");
            profile_rules.insert(profile, rules);
        }

        info!(
            store = store.name(),
            profiles = profile_rules.len(),
            base_rules = base_policy.rules.len(),
            "Audit policy catalog loaded"
        );

        Ok(Self {
            base_policy,
            profile_rules,
        })
    }

    /// Builds a catalog directly from values.
    ///
    /// Type metadata on `base_policy` is cleared. Profiles absent from
    /// `profile_rules` are unknown to this catalog.
    #[must_use]
    pub fn from_parts(
        mut base_policy: PolicyDocument,
        profile_rules: impl IntoIterator<Item = (AuditProfile, Vec<PolicyRule>)>,
    ) -> Self {
        base_policy.clear_type_meta();
        Self {
            base_policy,
            profile_rules: profile_rules.into_iter().collect(),
        }
    }

    /// Returns the process-wide catalog built from the embedded manifests.
    ///
    /// The catalog is built on first use and shared afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded manifests cannot be loaded.
    pub fn embedded() -> Result<&'static Self, CatalogError> {
        EMBEDDED_CATALOG.get_or_try_init(|| Self::load(&EmbeddedManifests))
    }

    /// Returns the base policy.
    #[must_use]
    pub const fn base_policy(&self) -> &PolicyDocument {
        &self.base_policy
    }

    /// Returns the extra rules of `profile`, if the catalog knows it.
    #[must_use]
    pub fn profile_rules(&self, profile: AuditProfile) -> Option<&[PolicyRule]> {
        self.profile_rules.get(&profile).map(Vec::as_slice)
    }

    /// Returns the profiles this catalog knows, in order.
    pub fn profiles(&self) -> impl Iterator<Item = AuditProfile> + '_ {
        self.profile_rules.keys().copied()
    }

    /// Returns an assembler borrowing this catalog.
    #[must_use]
    pub const fn assembler(&self) -> PolicyAssembler<'_> {
        PolicyAssembler::new(self)
    }
}
