//! Credential responses returned by CredHub.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::name::CredentialName;
use super::types::CredentialType;
use super::value::CredentialValue;

/// A stored credential version.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialDetails {
    /// Server-assigned id of this version.
    pub id: String,
    pub name: CredentialName,
    pub version_created_at: Option<DateTime<Utc>>,
    pub value: CredentialValue,
}

impl CredentialDetails {
    pub fn credential_type(&self) -> CredentialType {
        self.value.credential_type()
    }

    pub fn into_value(self) -> CredentialValue {
        self.value
    }
}

#[derive(Serialize, Deserialize)]
struct WireCredentialDetails {
    id: String,
    name: CredentialName,
    #[serde(rename = "type")]
    credential_type: CredentialType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version_created_at: Option<DateTime<Utc>>,
    value: serde_json::Value,
}

impl Serialize for CredentialDetails {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireCredentialDetails {
            id: self.id.clone(),
            name: self.name.clone(),
            credential_type: self.credential_type(),
            version_created_at: self.version_created_at,
            value: self.value.to_wire().map_err(S::Error::custom)?,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CredentialDetails {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireCredentialDetails::deserialize(deserializer)?;
        let value = CredentialValue::from_wire(wire.credential_type, wire.value).map_err(|e| {
            D::Error::custom(format!(
                "invalid value for {} credential '{}': {}",
                wire.credential_type, wire.name, e
            ))
        })?;

        Ok(CredentialDetails {
            id: wire.id,
            name: wire.name,
            version_created_at: wire.version_created_at,
            value,
        })
    }
}

/// Name and latest version timestamp, as returned by find operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSummary {
    pub name: CredentialName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_created_at: Option<DateTime<Utc>>,
}

/// `{"data": [...]}` envelope of name-based reads.
#[derive(Debug, Deserialize)]
pub(crate) struct CredentialDataEnvelope {
    #[serde(default)]
    pub data: Vec<CredentialDetails>,
}

/// `{"credentials": [...]}` envelope of find operations.
#[derive(Debug, Deserialize)]
pub(crate) struct CredentialSummaryEnvelope {
    #[serde(default)]
    pub credentials: Vec<CredentialSummary>,
}
