//! Manifest stores.
//!
//! A [`ManifestStore`] resolves a logical manifest name such as
//! `manifests/base-policy.yaml` to its raw bytes. The catalog reads every
//! manifest it needs exactly once, while it is being built.

use std::collections::HashMap;
use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::PathBuf;

use auditpol_core::AuditProfile;

use crate::error::CatalogError;

macro_rules! manifests_dir {
    () => {
        "manifests"
    };
}

/// Directory every manifest name is rooted in.
pub const MANIFESTS_DIR: &str = manifests_dir!();

/// Name of the base policy manifest.
pub const BASE_POLICY_MANIFEST: &str = concat!(manifests_dir!(), "/base-policy.yaml");

/// Returns the manifest name holding the extra rules of `profile`.
///
/// # Examples
///
/// ```rust
/// use auditpol_assembler::manifest::profile_manifest;
/// use auditpol_core::AuditProfile;
///
/// assert_eq!(
///     profile_manifest(AuditProfile::Default),
///     "manifests/default-rules.yaml"
/// );
/// ```
#[must_use]
pub fn profile_manifest(profile: AuditProfile) -> String {
    format!("{MANIFESTS_DIR}/{}", profile.manifest_name())
}

/// Source of manifest bytes.
pub trait ManifestStore: Send + Sync + Debug {
    /// Returns the bytes of the named manifest.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingManifest`] if no such manifest exists,
    /// or another [`CatalogError`] if it exists but cannot be read.
    fn asset(&self, name: &str) -> Result<Vec<u8>, CatalogError>;

    /// Returns the store name for identification.
    fn name(&self) -> &'static str;
}

macro_rules! embedded_manifest {
    ($file:literal) => {
        (
            concat!(manifests_dir!(), "/", $file),
            include_bytes!(concat!("../", manifests_dir!(), "/", $file)) as &[u8],
        )
    };
}

const EMBEDDED: &[(&str, &[u8])] = &[
    embedded_manifest!("base-policy.yaml"),
    embedded_manifest!("default-rules.yaml"),
    embedded_manifest!("writerequestbodies-rules.yaml"),
    embedded_manifest!("allrequestbodies-rules.yaml"),
];

/// Manifests compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedManifests;

impl EmbeddedManifests {
    /// Returns the names of all embedded manifests.
    pub fn names() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }
}

impl ManifestStore for EmbeddedManifests {
    fn asset(&self, name: &str) -> Result<Vec<u8>, CatalogError> {
        EMBEDDED
            .iter()
            .find(|(embedded, _)| *embedded == name)
            .map(|(_, bytes)| bytes.to_vec())
            .ok_or_else(|| CatalogError::MissingManifest {
                name: name.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "embedded"
    }
}

/// Manifests read from a directory on disk.
///
/// Names are resolved relative to `root`, so `root` must contain a
/// `manifests/` directory laid out like the embedded one.
#[derive(Debug, Clone)]
pub struct DirectoryManifests {
    root: PathBuf,
}

impl DirectoryManifests {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ManifestStore for DirectoryManifests {
    fn asset(&self, name: &str) -> Result<Vec<u8>, CatalogError> {
        let path = self.root.join(name);
        std::fs::read(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                CatalogError::MissingManifest {
                    name: name.to_string(),
                }
            } else {
                CatalogError::Io { path, source }
            }
        })
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}

/// Manifests held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryManifests {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryManifests {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a manifest.
    #[must_use]
    pub fn with_asset(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Adds or replaces a manifest.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.assets.insert(name.into(), bytes.into());
    }

    /// Returns the number of manifests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns true if the store holds no manifests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl ManifestStore for MemoryManifests {
    fn asset(&self, name: &str) -> Result<Vec<u8>, CatalogError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::MissingManifest {
                name: name.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_has_every_profile() {
        let store = EmbeddedManifests;
        assert!(store.asset(BASE_POLICY_MANIFEST).is_ok());
        for profile in AuditProfile::ALL {
            assert!(
                store.asset(&profile_manifest(profile)).is_ok(),
                "missing manifest for {profile}"
            );
        }
        assert_eq!(EmbeddedManifests::names().count(), AuditProfile::ALL.len() + 1);
    }

    #[test]
    fn test_manifest_names_share_directory() {
        let prefix = format!("{MANIFESTS_DIR}/");
        assert!(BASE_POLICY_MANIFEST.starts_with(&prefix));
        for name in EmbeddedManifests::names() {
            assert!(name.starts_with(&prefix), "{name} outside {MANIFESTS_DIR}");
        }
        for profile in AuditProfile::ALL {
            assert!(EmbeddedManifests::names().any(|name| name == profile_manifest(profile)));
        }
    }

    #[test]
    fn test_embedded_missing() {
        let err = EmbeddedManifests.asset("manifests/none-rules.yaml").unwrap_err();
        assert!(matches!(err, CatalogError::MissingManifest { ref name } if name == "manifests/none-rules.yaml"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryManifests::new().with_asset("a.yaml", "- level: None\n");
        assert_eq!(store.len(), 1);
        assert_eq!(store.asset("a.yaml").unwrap(), b"- level: None\n");
        assert!(store.asset("b.yaml").is_err());
    }

    #[test]
    fn test_directory_store() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(MANIFESTS_DIR)).unwrap();
        std::fs::write(dir.path().join(BASE_POLICY_MANIFEST), "rules: []\n").unwrap();

        let store = DirectoryManifests::new(dir.path());
        assert_eq!(store.asset(BASE_POLICY_MANIFEST).unwrap(), b"rules: []\n");

        let err = store.asset("manifests/default-rules.yaml").unwrap_err();
        assert!(matches!(err, CatalogError::MissingManifest { .. }));
    }
}
