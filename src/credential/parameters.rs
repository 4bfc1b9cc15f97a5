//! Parameters for server-side credential generation.

use serde::{Deserialize, Serialize};

use super::types::CredentialType;
use crate::errors::{CredHubError, Result};

/// RSA key sizes CredHub accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum KeyLength {
    Length2048,
    Length3072,
    Length4096,
}

impl KeyLength {
    pub fn bits(&self) -> u32 {
        match self {
            KeyLength::Length2048 => 2048,
            KeyLength::Length3072 => 3072,
            KeyLength::Length4096 => 4096,
        }
    }
}

impl From<KeyLength> for u32 {
    fn from(length: KeyLength) -> Self {
        length.bits()
    }
}

impl TryFrom<u32> for KeyLength {
    type Error = CredHubError;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            2048 => Ok(KeyLength::Length2048),
            3072 => Ok(KeyLength::Length3072),
            4096 => Ok(KeyLength::Length4096),
            other => Err(CredHubError::invalid_argument(
                "key_length",
                format!("unsupported key length {}; use 2048, 3072 or 4096", other),
            )),
        }
    }
}

/// Password generation rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PasswordParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_upper: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_lower: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_number: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_special: Option<bool>,
}

impl PasswordParameters {
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.length == Some(0) {
            return Err(CredHubError::invalid_argument("length", "must be greater than zero"));
        }
        let all_excluded = self.exclude_upper == Some(true)
            && self.exclude_lower == Some(true)
            && self.exclude_number == Some(true)
            && self.include_special != Some(true);
        if all_excluded {
            return Err(CredHubError::invalid_argument(
                "parameters",
                "at least one character class must be included",
            ));
        }
        Ok(())
    }
}

/// RSA key generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RsaParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_length: Option<KeyLength>,
}

/// SSH key generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SshParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_length: Option<KeyLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_comment: Option<String>,
}

/// X.509 key usage extension values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyUsage {
    DigitalSignature,
    NonRepudiation,
    KeyEncipherment,
    DataEncipherment,
    KeyAgreement,
    KeyCertSign,
    CrlSign,
    EncipherOnly,
    DecipherOnly,
}

/// X.509 extended key usage extension values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedKeyUsage {
    ServerAuth,
    ClientAuth,
    CodeSigning,
    EmailProtection,
    Timestamping,
}

/// Certificate generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CertificateParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_length: Option<KeyLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Validity in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Name of the CredHub-stored CA that signs the certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ca: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_sign: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_usage: Vec<KeyUsage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended_key_usage: Vec<ExtendedKeyUsage>,
}

impl CertificateParameters {
    /// Leaf certificate signed by a CA stored in CredHub.
    pub fn signed_by(ca: impl Into<String>, common_name: impl Into<String>) -> Self {
        Self { ca: Some(ca.into()), common_name: Some(common_name.into()), ..Default::default() }
    }

    /// Self-signed certificate.
    pub fn self_signed(common_name: impl Into<String>) -> Self {
        Self { self_sign: Some(true), common_name: Some(common_name.into()), ..Default::default() }
    }

    /// Certificate authority (self-signed unless `ca` is also set).
    pub fn certificate_authority(common_name: impl Into<String>) -> Self {
        Self { is_ca: Some(true), common_name: Some(common_name.into()), ..Default::default() }
    }

    pub fn with_alternative_name(mut self, name: impl Into<String>) -> Self {
        self.alternative_names.push(name.into());
        self
    }

    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration = Some(days);
        self
    }

    pub fn with_key_usage(mut self, usage: KeyUsage) -> Self {
        self.key_usage.push(usage);
        self
    }

    pub fn with_extended_key_usage(mut self, usage: ExtendedKeyUsage) -> Self {
        self.extended_key_usage.push(usage);
        self
    }

    fn validate(&self) -> Result<()> {
        let has_signer = self.ca.as_deref().is_some_and(|ca| !ca.trim().is_empty())
            || self.self_sign == Some(true)
            || self.is_ca == Some(true);
        if !has_signer {
            return Err(CredHubError::invalid_argument(
                "parameters",
                "certificate parameters must name a ca, or set self_sign or is_ca",
            ));
        }

        let has_subject = self.common_name.as_deref().is_some_and(|cn| !cn.is_empty())
            || self.organization.is_some()
            || self.organization_unit.is_some()
            || self.locality.is_some()
            || self.state.is_some()
            || self.country.is_some();
        if !has_subject {
            return Err(CredHubError::invalid_argument(
                "parameters",
                "certificate parameters must include at least one subject field",
            ));
        }

        if self.duration == Some(0) {
            return Err(CredHubError::invalid_argument("duration", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Generation parameters tagged by the credential type they produce.
///
/// `value` and `json` credentials cannot be generated and have no variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationParameters {
    Password(PasswordParameters),
    /// Password rules plus an optional fixed username; CredHub generates one
    /// when it is absent.
    User { parameters: PasswordParameters, username: Option<String> },
    Rsa(RsaParameters),
    Ssh(SshParameters),
    Certificate(CertificateParameters),
}

impl GenerationParameters {
    pub fn credential_type(&self) -> CredentialType {
        match self {
            GenerationParameters::Password(_) => CredentialType::Password,
            GenerationParameters::User { .. } => CredentialType::User,
            GenerationParameters::Rsa(_) => CredentialType::Rsa,
            GenerationParameters::Ssh(_) => CredentialType::Ssh,
            GenerationParameters::Certificate(_) => CredentialType::Certificate,
        }
    }

    /// Local checks run before a generate request is sent.
    pub fn validate(&self) -> Result<()> {
        match self {
            GenerationParameters::Password(p) => p.validate(),
            GenerationParameters::User { parameters, username } => {
                if username.as_deref().is_some_and(|u| u.trim().is_empty()) {
                    return Err(CredHubError::invalid_argument("username", "must not be blank"));
                }
                parameters.validate()
            }
            GenerationParameters::Rsa(_) | GenerationParameters::Ssh(_) => Ok(()),
            GenerationParameters::Certificate(p) => p.validate(),
        }
    }

    pub(crate) fn parameters_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            GenerationParameters::Password(p) => serde_json::to_value(p),
            GenerationParameters::User { parameters, .. } => serde_json::to_value(parameters),
            GenerationParameters::Rsa(p) => serde_json::to_value(p),
            GenerationParameters::Ssh(p) => serde_json::to_value(p),
            GenerationParameters::Certificate(p) => serde_json::to_value(p),
        }
    }

    /// The optional `value` a generate request carries alongside its parameters.
    pub(crate) fn value_json(&self) -> Option<serde_json::Value> {
        match self {
            GenerationParameters::User { username: Some(username), .. } => {
                Some(serde_json::json!({ "username": username }))
            }
            _ => None,
        }
    }
}

impl From<PasswordParameters> for GenerationParameters {
    fn from(p: PasswordParameters) -> Self {
        GenerationParameters::Password(p)
    }
}

impl From<RsaParameters> for GenerationParameters {
    fn from(p: RsaParameters) -> Self {
        GenerationParameters::Rsa(p)
    }
}

impl From<SshParameters> for GenerationParameters {
    fn from(p: SshParameters) -> Self {
        GenerationParameters::Ssh(p)
    }
}

impl From<CertificateParameters> for GenerationParameters {
    fn from(p: CertificateParameters) -> Self {
        GenerationParameters::Certificate(p)
    }
}
