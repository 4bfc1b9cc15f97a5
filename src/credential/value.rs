//! Type-specific credential values.
//!
//! The `value` field of a credential changes shape with its `type`. The
//! [`CredentialValue`] enum carries one payload per type, and
//! [`CredentialValue::from_wire`] is the mapping table used to resolve the
//! payload from the discriminator on the way in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::secret::SecretString;
use super::types::CredentialType;

/// `password` credential: a single secret string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordCredential(pub SecretString);

impl PasswordCredential {
    pub fn new(password: impl Into<SecretString>) -> Self {
        Self(password.into())
    }

    pub fn password(&self) -> &SecretString {
        &self.0
    }
}

/// `value` credential: an arbitrary string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueCredential(pub String);

impl ValueCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// `json` credential: an arbitrary JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonCredential(pub Map<String, Value>);

impl JsonCredential {
    pub fn new(object: Map<String, Value>) -> Self {
        Self(object)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// `user` credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: SecretString,
    /// Server-computed SHA-512 crypt hash; ignored on write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl UserCredential {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self { username: Some(username.into()), password: password.into(), password_hash: None }
    }
}

/// `rsa` key pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RsaCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<SecretString>,
}

impl RsaCredential {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<SecretString>) -> Self {
        Self { public_key: Some(public_key.into()), private_key: Some(private_key.into()) }
    }
}

/// `ssh` key pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SshCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<SecretString>,
    /// Server-computed; ignored on write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_fingerprint: Option<String>,
}

impl SshCredential {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<SecretString>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            private_key: Some(private_key.into()),
            public_key_fingerprint: None,
        }
    }
}

/// `certificate` credential. Every field is optional: a CA-signed leaf may be
/// written without its private key, and `ca_name` replaces `ca` when the
/// signing CA is itself stored in CredHub.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CertificateCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<SecretString>,
}

impl CertificateCredential {
    pub fn new(certificate: impl Into<String>, private_key: impl Into<SecretString>) -> Self {
        Self {
            certificate: Some(certificate.into()),
            private_key: Some(private_key.into()),
            ..Default::default()
        }
    }

    pub fn with_ca(mut self, ca: impl Into<String>) -> Self {
        self.ca = Some(ca.into());
        self
    }

    pub fn with_ca_name(mut self, ca_name: impl Into<String>) -> Self {
        self.ca_name = Some(ca_name.into());
        self
    }
}

/// A credential value tagged by its type.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialValue {
    Password(PasswordCredential),
    Value(ValueCredential),
    Json(JsonCredential),
    User(UserCredential),
    Rsa(RsaCredential),
    Ssh(SshCredential),
    Certificate(CertificateCredential),
}

impl CredentialValue {
    pub fn credential_type(&self) -> CredentialType {
        match self {
            CredentialValue::Password(_) => CredentialType::Password,
            CredentialValue::Value(_) => CredentialType::Value,
            CredentialValue::Json(_) => CredentialType::Json,
            CredentialValue::User(_) => CredentialType::User,
            CredentialValue::Rsa(_) => CredentialType::Rsa,
            CredentialValue::Ssh(_) => CredentialType::Ssh,
            CredentialValue::Certificate(_) => CredentialType::Certificate,
        }
    }

    /// Resolve a raw `value` using its `type` discriminator.
    pub fn from_wire(credential_type: CredentialType, value: Value) -> serde_json::Result<Self> {
        Ok(match credential_type {
            CredentialType::Password => CredentialValue::Password(serde_json::from_value(value)?),
            CredentialType::Value => CredentialValue::Value(serde_json::from_value(value)?),
            CredentialType::Json => CredentialValue::Json(serde_json::from_value(value)?),
            CredentialType::User => CredentialValue::User(serde_json::from_value(value)?),
            CredentialType::Rsa => CredentialValue::Rsa(serde_json::from_value(value)?),
            CredentialType::Ssh => CredentialValue::Ssh(serde_json::from_value(value)?),
            CredentialType::Certificate => {
                CredentialValue::Certificate(serde_json::from_value(value)?)
            }
        })
    }

    /// The raw `value` as sent on the wire.
    pub fn to_wire(&self) -> serde_json::Result<Value> {
        match self {
            CredentialValue::Password(v) => serde_json::to_value(v),
            CredentialValue::Value(v) => serde_json::to_value(v),
            CredentialValue::Json(v) => serde_json::to_value(v),
            CredentialValue::User(v) => serde_json::to_value(v),
            CredentialValue::Rsa(v) => serde_json::to_value(v),
            CredentialValue::Ssh(v) => serde_json::to_value(v),
            CredentialValue::Certificate(v) => serde_json::to_value(v),
        }
    }

    pub fn as_password(&self) -> Option<&PasswordCredential> {
        match self {
            CredentialValue::Password(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&ValueCredential> {
        match self {
            CredentialValue::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&JsonCredential> {
        match self {
            CredentialValue::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_user(&self) -> Option<&UserCredential> {
        match self {
            CredentialValue::User(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_rsa(&self) -> Option<&RsaCredential> {
        match self {
            CredentialValue::Rsa(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ssh(&self) -> Option<&SshCredential> {
        match self {
            CredentialValue::Ssh(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_certificate(&self) -> Option<&CertificateCredential> {
        match self {
            CredentialValue::Certificate(v) => Some(v),
            _ => None,
        }
    }
}

impl From<PasswordCredential> for CredentialValue {
    fn from(v: PasswordCredential) -> Self {
        CredentialValue::Password(v)
    }
}

impl From<ValueCredential> for CredentialValue {
    fn from(v: ValueCredential) -> Self {
        CredentialValue::Value(v)
    }
}

impl From<JsonCredential> for CredentialValue {
    fn from(v: JsonCredential) -> Self {
        CredentialValue::Json(v)
    }
}

impl From<UserCredential> for CredentialValue {
    fn from(v: UserCredential) -> Self {
        CredentialValue::User(v)
    }
}

impl From<RsaCredential> for CredentialValue {
    fn from(v: RsaCredential) -> Self {
        CredentialValue::Rsa(v)
    }
}

impl From<SshCredential> for CredentialValue {
    fn from(v: SshCredential) -> Self {
        CredentialValue::Ssh(v)
    }
}

impl From<CertificateCredential> for CredentialValue {
    fn from(v: CertificateCredential) -> Self {
        CredentialValue::Certificate(v)
    }
}
