//! Credential type discriminator and write modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CredHubError;

/// The `type` discriminator CredHub attaches to every credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialType {
    Password,
    Value,
    User,
    Rsa,
    Ssh,
    Certificate,
    Json,
}

impl CredentialType {
    pub const ALL: [CredentialType; 7] = [
        CredentialType::Password,
        CredentialType::Value,
        CredentialType::User,
        CredentialType::Rsa,
        CredentialType::Ssh,
        CredentialType::Certificate,
        CredentialType::Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialType::Password => "password",
            CredentialType::Value => "value",
            CredentialType::User => "user",
            CredentialType::Rsa => "rsa",
            CredentialType::Ssh => "ssh",
            CredentialType::Certificate => "certificate",
            CredentialType::Json => "json",
        }
    }

    /// Whether CredHub can generate a value of this type.
    pub fn is_generatable(&self) -> bool {
        !matches!(self, CredentialType::Value | CredentialType::Json)
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CredentialType {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CredentialType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CredHubError::invalid_argument("type", format!("unknown credential type '{}'", s))
            })
    }
}

/// How a write or generate request treats an existing credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Keep the existing value.
    NoOverwrite,
    /// Always create a new version.
    Overwrite,
    /// Create a new version only when the parameters differ.
    Converge,
}

impl FromStr for WriteMode {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no-overwrite" => Ok(WriteMode::NoOverwrite),
            "overwrite" => Ok(WriteMode::Overwrite),
            "converge" => Ok(WriteMode::Converge),
            _ => Err(CredHubError::invalid_argument(
                "mode",
                format!("unknown write mode '{}'; use no-overwrite, overwrite or converge", s),
            )),
        }
    }
}
