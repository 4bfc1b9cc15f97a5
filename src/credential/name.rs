//! Hierarchical credential names.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{CredHubError, Result};

/// Prefix CredHub reserves for service-broker managed credentials.
const SERVICE_INSTANCE_PREFIX: &str = "c";

/// A slash-delimited credential name such as `/concourse/main/db-password`.
///
/// Empty segments are dropped on parse, so `a/b`, `/a/b` and `//a/b/` are the
/// same name. The canonical form joins segments with `/` and carries a leading
/// `/` when there is more than one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialName {
    segments: Vec<String>,
}

impl CredentialName {
    /// Parse a name, rejecting input that contains no segments.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        Self::from_segments(name.as_ref().split('/'))
    }

    /// Build a name from individual segments. Segments may themselves contain `/`.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .flat_map(|s| {
                s.as_ref()
                    .split('/')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        if segments.is_empty() {
            return Err(CredHubError::invalid_argument("name", "credential name must not be empty"));
        }

        Ok(Self { segments })
    }

    /// Name of a credential owned by a service instance:
    /// `/c/{broker}/{service_offering}/{service_instance}/{credential}`.
    pub fn service_instance(
        service_broker: &str,
        service_offering: &str,
        service_instance: &str,
        credential: &str,
    ) -> Result<Self> {
        for (field, value) in [
            ("service_broker", service_broker),
            ("service_offering", service_offering),
            ("service_instance", service_instance),
            ("credential", credential),
        ] {
            if value.trim().is_empty() {
                return Err(CredHubError::invalid_argument(field, "must not be empty"));
            }
        }

        Self::from_segments([
            SERVICE_INSTANCE_PREFIX,
            service_broker,
            service_offering,
            service_instance,
            credential,
        ])
    }

    /// The individual path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment.
    pub fn leaf(&self) -> &str {
        // from_segments guarantees at least one segment
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Canonical string form sent to CredHub.
    pub fn name(&self) -> String {
        if self.segments.len() > 1 {
            format!("/{}", self.segments.join("/"))
        } else {
            self.segments.join("/")
        }
    }

    /// A child name with `segment` appended.
    pub fn join(&self, segment: &str) -> Result<Self> {
        Self::from_segments(self.segments.iter().map(String::as_str).chain([segment]))
    }
}

impl fmt::Display for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for CredentialName {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for CredentialName {
    type Error = CredHubError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for CredentialName {
    type Error = CredHubError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl Serialize for CredentialName {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for CredentialName {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        CredentialName::new(&raw).map_err(serde::de::Error::custom)
    }
}
