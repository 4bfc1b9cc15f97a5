//! Configuration file handling for the CredHub CLI
//!
//! Manages loading and saving CLI configuration from ~/.credhub/config.toml
//! and resolving connection settings from multiple sources.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{CredHubProperties, OAuth2Properties};

/// CLI configuration stored in ~/.credhub/config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// CredHub API URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Pre-issued bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// OAuth2 client id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// UAA token endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,

    /// Extra CA certificate (PEM) to trust
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Client certificate (PEM) for mutual TLS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_cert: Option<PathBuf>,

    /// Client private key (PEM) for mutual TLS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key: Option<PathBuf>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// Connection flags; each one overrides the config file and the environment.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub url: Option<String>,
    pub token: Option<String>,
    pub token_file: Option<PathBuf>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_uri: Option<String>,
    pub ca_cert: Option<PathBuf>,
    pub client_cert: Option<PathBuf>,
    pub client_key: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub verbose: bool,
}

impl CliConfig {
    /// Get the default configuration file path (~/.credhub/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Unable to determine home directory")?;

        let mut path = PathBuf::from(home);
        path.push(".credhub");
        path.push("config.toml");

        Ok(path)
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_path()?)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        write_private(path, contents.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Build client settings with flag > config file > environment > default
    /// precedence. The environment layer comes from
    /// [`CredHubProperties::from_env`].
    pub fn resolve_properties(&self, flags: &ConnectionOverrides) -> CredHubProperties {
        let env = CredHubProperties::from_env();

        let url = pick("url", flags.url.clone(), self.url.clone()).unwrap_or(env.url);

        let mut properties = CredHubProperties::new(url).with_verbose(flags.verbose);
        properties.connect_timeout_seconds = env.connect_timeout_seconds;
        properties.read_timeout_seconds =
            pick("timeout", flags.timeout, self.timeout).unwrap_or(env.read_timeout_seconds);

        properties.tls.ca_cert_path =
            pick("ca_cert", flags.ca_cert.clone(), self.ca_cert.clone()).or(env.tls.ca_cert_path);
        properties.tls.cert_path = pick("client_cert", flags.client_cert.clone(), self.client_cert.clone())
            .or(env.tls.cert_path);
        properties.tls.key_path = pick("client_key", flags.client_key.clone(), self.client_key.clone())
            .or(env.tls.key_path);

        let env_oauth2 = env.oauth2;
        let client_id = pick("client_id", flags.client_id.clone(), self.client_id.clone())
            .or_else(|| env_oauth2.as_ref().map(|o| o.client_id.clone()));

        properties.oauth2 = client_id.map(|client_id| {
            let token_uri = pick("token_uri", flags.token_uri.clone(), self.token_uri.clone())
                .or_else(|| env_oauth2.as_ref().map(|o| o.token_uri.clone()))
                .unwrap_or_default();
            let client_secret =
                pick("client_secret", flags.client_secret.clone(), self.client_secret.clone())
                    .or_else(|| {
                        env_oauth2.as_ref().map(|o| o.client_secret.expose_secret().to_string())
                    })
                    .unwrap_or_default();
            OAuth2Properties::new(token_uri, client_id, client_secret)
        });

        properties
    }

    /// Resolve a pre-issued bearer token
    ///
    /// Checks sources in the following priority order:
    /// 1. --token command line flag
    /// 2. --token-file command line flag
    /// 3. ~/.credhub/config.toml
    /// 4. CREDHUB_TOKEN environment variable
    pub fn resolve_token(&self, flags: &ConnectionOverrides) -> Result<Option<String>> {
        if let Some(token) = flags.token.clone().filter(|t| !t.is_empty()) {
            debug!("Using token from --token flag");
            return Ok(Some(token));
        }

        if let Some(token_file) = &flags.token_file {
            debug!("Reading token from file: {}", token_file.display());
            let token = std::fs::read_to_string(token_file)
                .with_context(|| format!("Failed to read token file: {}", token_file.display()))?
                .trim()
                .to_string();

            if token.is_empty() {
                anyhow::bail!("Token file is empty: {}", token_file.display());
            }

            return Ok(Some(token));
        }

        if let Some(token) = self.token.clone().filter(|t| !t.is_empty()) {
            debug!("Using token from config file");
            return Ok(Some(token));
        }

        if let Ok(token) = std::env::var("CREDHUB_TOKEN") {
            if !token.is_empty() {
                debug!("Using token from CREDHUB_TOKEN environment variable");
                return Ok(Some(token));
            }
        }

        Ok(None)
    }
}

fn pick<T>(key: &str, flag: Option<T>, file: Option<T>) -> Option<T> {
    if flag.is_some() {
        debug!("Using {} from command line flag", key);
        return flag;
    }
    if file.is_some() {
        debug!("Using {} from config file", key);
    }
    file
}

/// Write a file readable only by its owner; it may hold a token or client secret.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}
