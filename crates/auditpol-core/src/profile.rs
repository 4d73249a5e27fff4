//! Audit profiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named preset of extra audit rules appended to the base policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AuditProfile {
    /// Metadata for every request, request bodies for identity and OAuth client writes.
    Default,
    /// Request and response bodies for write requests.
    WriteRequestBodies,
    /// Request and response bodies for every request.
    AllRequestBodies,
}

impl AuditProfile {
    /// Every known profile, in catalog load order.
    pub const ALL: [Self; 3] = [Self::Default, Self::WriteRequestBodies, Self::AllRequestBodies];

    /// Returns the canonical profile name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::WriteRequestBodies => "WriteRequestBodies",
            Self::AllRequestBodies => "AllRequestBodies",
        }
    }

    /// Returns the file name of this profile's rules manifest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use auditpol_core::AuditProfile;
    ///
    /// assert_eq!(
    ///     AuditProfile::WriteRequestBodies.manifest_name(),
    ///     "writerequestbodies-rules.yaml"
    /// );
    /// ```
    #[must_use]
    pub fn manifest_name(self) -> String {
        format!("{}-rules.yaml", self.as_str().to_lowercase())
    }
}

impl fmt::Display for AuditProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|profile| profile.as_str() == s)
            .ok_or_else(|| Error::UnknownProfile {
                name: s.to_string(),
            })
    }
}
