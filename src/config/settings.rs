//! # Client Settings
//!
//! Connection settings for a CredHub server: base URL, timeouts, optional
//! mutual TLS key material and optional OAuth2 client credentials.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

use crate::credential::SecretString;
use crate::errors::{CredHubError, Result};

pub const DEFAULT_CREDHUB_URL: &str = "https://credhub.service.cf.internal:8844";
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_READ_TIMEOUT_SECONDS: u64 = 30;

/// Settings for a CredHub client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredHubProperties {
    /// Base URL of the CredHub API, e.g. `https://credhub.example.com:8844`
    #[validate(url(message = "CredHub URL must be a valid URL"))]
    pub url: String,

    /// Connect timeout in seconds
    #[validate(range(
        min = 1,
        max = 300,
        message = "Connect timeout must be between 1 and 300 seconds"
    ))]
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Read timeout in seconds
    #[validate(range(
        min = 1,
        max = 600,
        message = "Read timeout must be between 1 and 600 seconds"
    ))]
    #[serde(default = "default_read_timeout")]
    pub read_timeout_seconds: u64,

    /// Mutual TLS and trust settings
    #[serde(default)]
    pub tls: ClientTlsConfig,

    /// OAuth2 client-credentials settings
    #[validate(nested)]
    #[serde(default)]
    pub oauth2: Option<OAuth2Properties>,

    /// Log request and response bodies at trace level
    #[serde(default)]
    pub verbose: bool,
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECONDS
}

fn default_read_timeout() -> u64 {
    DEFAULT_READ_TIMEOUT_SECONDS
}

impl Default for CredHubProperties {
    fn default() -> Self {
        Self {
            url: DEFAULT_CREDHUB_URL.to_string(),
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECONDS,
            read_timeout_seconds: DEFAULT_READ_TIMEOUT_SECONDS,
            tls: ClientTlsConfig::default(),
            oauth2: None,
            verbose: false,
        }
    }
}

impl CredHubProperties {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Default::default() }
    }

    pub fn with_oauth2(mut self, oauth2: OAuth2Properties) -> Self {
        self.oauth2 = Some(oauth2);
        self
    }

    pub fn with_tls(mut self, tls: ClientTlsConfig) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_timeouts(mut self, connect_seconds: u64, read_seconds: u64) -> Self {
        self.connect_timeout_seconds = connect_seconds;
        self.read_timeout_seconds = read_seconds;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_seconds)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(CredHubError::from)?;
        self.tls.validate()?;
        if let Some(oauth2) = &self.oauth2 {
            oauth2.validate_secret()?;
        }
        Ok(())
    }

    /// Create settings from environment variables
    pub fn from_env() -> Self {
        let url = env_value("CREDHUB_URL").unwrap_or_else(|| DEFAULT_CREDHUB_URL.to_string());

        let connect_timeout_seconds = env_value("CREDHUB_CONNECT_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECONDS);

        let read_timeout_seconds = env_value("CREDHUB_READ_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_READ_TIMEOUT_SECONDS);

        Self {
            url,
            connect_timeout_seconds,
            read_timeout_seconds,
            tls: ClientTlsConfig::from_env(),
            oauth2: OAuth2Properties::from_env(),
            verbose: false,
        }
    }
}

/// OAuth2 client-credentials settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OAuth2Properties {
    /// UAA token endpoint, e.g. `https://uaa.example.com/oauth/token`
    #[validate(url(message = "Token URI must be a valid URL"))]
    pub token_uri: String,

    #[validate(length(min = 1, message = "Client id cannot be empty"))]
    pub client_id: String,

    #[serde(skip_serializing)]
    pub client_secret: SecretString,
}

impl OAuth2Properties {
    pub fn new(
        token_uri: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<SecretString>,
    ) -> Self {
        Self {
            token_uri: token_uri.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    fn validate_secret(&self) -> Result<()> {
        if self.client_secret.is_empty() {
            return Err(CredHubError::config("OAuth2 client secret cannot be empty"));
        }
        Ok(())
    }

    /// Present when `CREDHUB_CLIENT_ID` is set. Missing companions are left
    /// empty so that validation reports them.
    pub fn from_env() -> Option<Self> {
        let client_id = env_value("CREDHUB_CLIENT_ID")?;
        Some(Self {
            token_uri: env_value("CREDHUB_TOKEN_URI").unwrap_or_default(),
            client_id,
            client_secret: env_value("CREDHUB_CLIENT_SECRET").unwrap_or_default().into(),
        })
    }
}

/// Mutual TLS and trust settings. Both identity paths point at PEM files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTlsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<PathBuf>,
    /// Extra CA certificate to trust for the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert_path: Option<PathBuf>,
}

impl ClientTlsConfig {
    pub fn identity(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            cert_path: Some(cert_path.into()),
            key_path: Some(key_path.into()),
            ca_cert_path: None,
        }
    }

    pub fn with_ca_cert(mut self, ca_cert_path: impl Into<PathBuf>) -> Self {
        self.ca_cert_path = Some(ca_cert_path.into());
        self
    }

    /// True when a client identity is configured
    pub fn has_identity(&self) -> bool {
        self.cert_path.is_some() && self.key_path.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        match (&self.cert_path, &self.key_path) {
            (Some(_), None) => {
                Err(CredHubError::config("Client certificate configured without a private key"))
            }
            (None, Some(_)) => {
                Err(CredHubError::config("Client private key configured without a certificate"))
            }
            _ => Ok(()),
        }
    }

    /// Read `CF_INSTANCE_CERT`, `CF_INSTANCE_KEY` and `CREDHUB_CA_CERT_PATH`.
    pub fn from_env() -> Self {
        Self {
            cert_path: env_value("CF_INSTANCE_CERT").map(PathBuf::from),
            key_path: env_value("CF_INSTANCE_KEY").map(PathBuf::from),
            ca_cert_path: env_value("CREDHUB_CA_CERT_PATH").map(PathBuf::from),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
