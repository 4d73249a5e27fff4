//! Audit policy document model.
//!
//! [`PolicyDocument`] and [`PolicyRule`] mirror the `audit.k8s.io/v1` `Policy`
//! schema closely enough for assembly and round-tripping. Fields this crate
//! does not model are kept in an opaque `extra` map so that nothing is lost
//! between decode and encode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// API version stamped onto serialized policy documents.
pub const API_VERSION: &str = "audit.k8s.io/v1";

/// Kind stamped onto serialized policy documents.
pub const KIND: &str = "Policy";

/// Fields not modelled explicitly, carried through untouched.
pub type ExtraFields = BTreeMap<String, serde_yaml::Value>;

/// Amount of request data recorded for a matching event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Don't log events that match this rule.
    None,
    /// Log request metadata but not request or response bodies.
    Metadata,
    /// Log metadata and the request body.
    Request,
    /// Log metadata, request body and response body.
    RequestResponse,
}

/// Request handling stage at which audit events may be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// The handler has received the request.
    RequestReceived,
    /// Response headers have been sent, body not yet (long-running requests).
    ResponseStarted,
    /// The response body has been completed.
    ResponseComplete,
    /// A panic occurred while handling the request.
    Panic,
}

/// A set of resources within one API group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResources {
    /// API group name; empty means the core group.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    /// Resources in the group (`pods`, `pods/log`, `*`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,

    /// Specific resource instance names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_names: Vec<String>,
}

impl GroupResources {
    /// Creates a selector for the given API group.
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ..Self::default()
        }
    }

    /// Creates a selector for the core API group.
    #[must_use]
    pub fn core() -> Self {
        Self::default()
    }

    /// Adds a resource name.
    #[must_use]
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resources.push(resource.into());
        self
    }
}

/// One ordered audit matching condition and its level.
///
/// Rules are evaluated first-match-wins by the API server, so the position of
/// a rule inside [`PolicyDocument::rules`] is significant.
///
/// # Examples
///
/// ```rust
/// use auditpol_core::{GroupResources, Level, PolicyRule};
///
/// let rule = PolicyRule::new(Level::Metadata)
///     .with_resources(GroupResources::core().resource("secrets"));
/// assert_eq!(rule.level, Level::Metadata);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    /// Level recorded for requests matching this rule.
    pub level: Level,

    /// Users this rule applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,

    /// User groups this rule applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_groups: Vec<String>,

    /// Verbs this rule applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verbs: Vec<String>,

    /// Resources this rule applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<GroupResources>,

    /// Namespaces this rule applies to; `""` matches non-namespaced resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,

    /// Non-resource URL paths this rule applies to.
    #[serde(
        default,
        rename = "nonResourceURLs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub non_resource_urls: Vec<String>,

    /// Stages for which no event is generated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omit_stages: Vec<Stage>,

    /// Whether managed fields are dropped from logged bodies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omit_managed_fields: Option<bool>,

    /// Unmodelled fields.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl PolicyRule {
    /// Creates a rule matching every request at the given level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            users: Vec::new(),
            user_groups: Vec::new(),
            verbs: Vec::new(),
            resources: Vec::new(),
            namespaces: Vec::new(),
            non_resource_urls: Vec::new(),
            omit_stages: Vec::new(),
            omit_managed_fields: None,
            extra: ExtraFields::new(),
        }
    }

    /// Restricts the rule to the given users.
    #[must_use]
    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users.extend(users.into_iter().map(Into::into));
        self
    }

    /// Restricts the rule to the given user groups.
    #[must_use]
    pub fn with_user_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Restricts the rule to the given verbs.
    #[must_use]
    pub fn with_verbs<I, S>(mut self, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.verbs.extend(verbs.into_iter().map(Into::into));
        self
    }

    /// Adds a resource selector.
    #[must_use]
    pub fn with_resources(mut self, resources: GroupResources) -> Self {
        self.resources.push(resources);
        self
    }

    /// Restricts the rule to the given namespaces.
    #[must_use]
    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces.extend(namespaces.into_iter().map(Into::into));
        self
    }

    /// Restricts the rule to the given non-resource URLs.
    #[must_use]
    pub fn with_non_resource_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_resource_urls.extend(urls.into_iter().map(Into::into));
        self
    }

    /// Adds a stage to omit.
    #[must_use]
    pub fn omit_stage(mut self, stage: Stage) -> Self {
        self.omit_stages.push(stage);
        self
    }
}

/// Object metadata of a policy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Object name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Unmodelled fields (labels, annotations, ...).
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ObjectMeta {
    /// Returns true if no metadata is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.extra.is_empty()
    }
}

/// An audit policy document.
///
/// `kind` and `api_version` are only set right before serialization; documents
/// produced by decoding or assembly leave them empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDocument {
    /// API version of the document type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Kind of the document type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Object metadata.
    #[serde(default, skip_serializing_if = "ObjectMeta::is_empty")]
    pub metadata: ObjectMeta,

    /// Ordered rules; the first matching rule wins.
    #[serde(default)]
    pub rules: Vec<PolicyRule>,

    /// Stages for which no event is generated, for every rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omit_stages: Vec<Stage>,

    /// Whether managed fields are dropped from logged bodies, for every rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omit_managed_fields: Option<bool>,

    /// Unmodelled fields.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl PolicyDocument {
    /// Creates an empty, unnamed policy document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the document name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    /// Sets the document name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.metadata.name = Some(name.into());
    }

    /// Appends rules to the end of the rule list, keeping their order.
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = PolicyRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets `kind` and `apiVersion` for serialization.
    pub fn stamp_type_meta(&mut self) {
        self.kind = Some(KIND.to_string());
        self.api_version = Some(API_VERSION.to_string());
    }

    /// Returns the document with `kind` and `apiVersion` set.
    #[must_use]
    pub fn with_type_meta(mut self) -> Self {
        self.stamp_type_meta();
        self
    }

    /// Clears `kind` and `apiVersion`.
    pub fn clear_type_meta(&mut self) {
        self.kind = None;
        self.api_version = None;
    }

    /// Returns true if both `kind` and `apiVersion` are set.
    #[must_use]
    pub const fn has_type_meta(&self) -> bool {
        self.kind.is_some() && self.api_version.is_some()
    }
}
