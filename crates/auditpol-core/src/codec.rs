//! YAML codec for policy documents and rule lists.
//!
//! Decoding a policy checks its `kind` / `apiVersion` when present and keeps
//! them, so encoded documents decode back unchanged.

use crate::error::{Error, Result};
use crate::policy::{PolicyDocument, PolicyRule, API_VERSION, KIND};

/// Decodes a single policy document.
///
/// Documents without type metadata are accepted; see
/// [`decode_typed_policy`] for the strict variant.
///
/// # Errors
///
/// Returns [`Error::Decode`] for malformed YAML and [`Error::TypeMismatch`]
/// if the document declares a kind or API version other than
/// `Policy` / `audit.k8s.io/v1`.
///
/// # Examples
///
/// ```rust
/// use auditpol_core::codec;
///
/// let policy = codec::decode_policy(b"
/// apiVersion: audit.k8s.io/v1
/// kind: Policy
/// rules:
/// - level: Metadata
/// ").unwrap();
///
/// assert_eq!(policy.rules.len(), 1);
/// assert_eq!(policy.kind.as_deref(), Some("Policy"));
/// ```
pub fn decode_policy(bytes: &[u8]) -> Result<PolicyDocument> {
    let policy: PolicyDocument =
        serde_yaml::from_slice(bytes).map_err(|source| Error::Decode {
            target: "policy",
            source,
        })?;

    check_type_field("apiVersion", API_VERSION, policy.api_version.as_deref())?;
    check_type_field("kind", KIND, policy.kind.as_deref())?;

    Ok(policy)
}

/// Decodes a policy document that must declare `kind: Policy` and
/// `apiVersion: audit.k8s.io/v1`.
///
/// # Errors
///
/// Same as [`decode_policy`], plus [`Error::MissingTypeMeta`] if either
/// field is absent.
pub fn decode_typed_policy(bytes: &[u8]) -> Result<PolicyDocument> {
    let policy = decode_policy(bytes)?;
    if policy.api_version.is_none() {
        return Err(Error::MissingTypeMeta { field: "apiVersion" });
    }
    if policy.kind.is_none() {
        return Err(Error::MissingTypeMeta { field: "kind" });
    }
    Ok(policy)
}

/// Decodes a bare, ordered list of policy rules.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the bytes are not a YAML list of rules.
pub fn decode_rules(bytes: &[u8]) -> Result<Vec<PolicyRule>> {
    serde_yaml::from_slice(bytes).map_err(|source| Error::Decode {
        target: "rules",
        source,
    })
}

/// Encodes a policy document as YAML.
///
/// # Errors
///
/// Returns [`Error::Encode`] if serialization fails.
pub fn encode_policy(policy: &PolicyDocument) -> Result<Vec<u8>> {
    serde_yaml::to_string(policy)
        .map(String::into_bytes)
        .map_err(Error::Encode)
}

/// Encodes a rule list as YAML.
///
/// # Errors
///
/// Returns [`Error::Encode`] if serialization fails.
pub fn encode_rules(rules: &[PolicyRule]) -> Result<Vec<u8>> {
    serde_yaml::to_string(rules)
        .map(String::into_bytes)
        .map_err(Error::Encode)
}

fn check_type_field(field: &'static str, expected: &'static str, found: Option<&str>) -> Result<()> {
    match found {
        Some(found) if found != expected => Err(Error::TypeMismatch {
            field,
            expected,
            found: found.to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Level, Stage};

    const BASE: &str = r#"
apiVersion: audit.k8s.io/v1
kind: Policy
metadata:
  name: policy
omitManagedFields: true
omitStages:
- "RequestReceived"
rules:
- level: None
  userGroups: ["system:authenticated", "system:unauthenticated"]
  nonResourceURLs:
  - "/version"
- level: None
  users: ["system:apiserver"]
  resources:
  - group: "apiserver.openshift.io"
    resources: ["apirequestcounts", "apirequestcounts/*"]
  namespaces: [""]
"#;

    #[test]
    fn test_decode_policy_keeps_type_meta() {
        let policy = decode_policy(BASE.as_bytes()).unwrap();

        assert_eq!(policy.kind.as_deref(), Some("Policy"));
        assert_eq!(policy.api_version.as_deref(), Some("audit.k8s.io/v1"));
        assert_eq!(policy.name(), Some("policy"));
        assert_eq!(policy.omit_managed_fields, Some(true));
        assert_eq!(policy.omit_stages, vec![Stage::RequestReceived]);
        assert_eq!(policy.rules.len(), 2);
        assert_eq!(policy.rules[0].non_resource_urls, vec!["/version"]);
        assert_eq!(policy.rules[1].namespaces, vec![""]);
    }

    #[test]
    fn test_decode_policy_without_type_meta() {
        let policy = decode_policy(b"rules:\n- level: Metadata\n").unwrap();
        assert_eq!(policy.rules[0].level, Level::Metadata);
        assert!(!policy.has_type_meta());
    }

    #[test]
    fn test_decode_typed_policy_requires_kind() {
        let err = decode_typed_policy(b"apiVersion: audit.k8s.io/v1\nrules: []\n").unwrap_err();
        assert!(matches!(err, Error::MissingTypeMeta { field: "kind" }));
    }

    #[test]
    fn test_decode_typed_policy_requires_api_version() {
        let err = decode_typed_policy(b"kind: Policy\nrules: []\n").unwrap_err();
        assert!(matches!(err, Error::MissingTypeMeta { field: "apiVersion" }));
    }

    #[test]
    fn test_decode_typed_policy_accepts_base() {
        let policy = decode_typed_policy(BASE.as_bytes()).unwrap();
        assert!(policy.has_type_meta());
        assert_eq!(policy.rules.len(), 2);
    }

    #[test]
    fn test_decode_policy_rejects_wrong_kind() {
        let err = decode_policy(b"apiVersion: audit.k8s.io/v1\nkind: ConfigMap\n").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { field: "kind", .. }));
    }

    #[test]
    fn test_decode_policy_rejects_wrong_version() {
        let err = decode_policy(b"apiVersion: audit.k8s.io/v1beta1\nkind: Policy\n").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { field: "apiVersion", .. }));
    }

    #[test]
    fn test_decode_rules_keeps_order() {
        let rules = decode_rules(
            b"- level: RequestResponse\n  verbs: [create]\n- level: Metadata\n- level: None\n",
        )
        .unwrap();

        let levels: Vec<_> = rules.iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![Level::RequestResponse, Level::Metadata, Level::None]);
    }

    #[test]
    fn test_decode_rules_rejects_unknown_level() {
        let err = decode_rules(b"- level: Verbose\n").unwrap_err();
        assert!(matches!(err, Error::Decode { target: "rules", .. }));
    }

    #[test]
    fn test_decode_rules_rejects_mapping() {
        assert!(decode_rules(b"level: Metadata\n").is_err());
    }

    #[test]
    fn test_encode_writes_stamped_type_meta() {
        let mut policy = decode_policy(BASE.as_bytes()).unwrap();
        policy.clear_type_meta();
        policy.stamp_type_meta();

        let decoded = decode_policy(&encode_policy(&policy).unwrap()).unwrap();
        assert_eq!(decoded.kind.as_deref(), Some("Policy"));
        assert_eq!(decoded.api_version.as_deref(), Some("audit.k8s.io/v1"));
    }

    #[test]
    fn test_encode_decode_is_lossless() {
        let policy = decode_policy(BASE.as_bytes()).unwrap();
        let again = decode_policy(&encode_policy(&policy).unwrap()).unwrap();
        assert_eq!(policy, again);
    }
}
