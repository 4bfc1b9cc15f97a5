//! Construction of the underlying `reqwest::Client`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Certificate, Client, Identity};
use std::path::Path;
use tracing::debug;

use crate::config::{ClientTlsConfig, CredHubProperties};
use crate::errors::{CredHubError, Result};

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds HTTP clients configured for CredHub: JSON headers, timeouts and
/// optional mutual TLS.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientFactory;

impl ClientFactory {
    pub fn build(properties: &CredHubProperties) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .connect_timeout(properties.connect_timeout())
            .read_timeout(properties.read_timeout());

        if let Some(identity) = Self::identity(&properties.tls)? {
            builder = builder.identity(identity);
        }

        if let Some(ca) = Self::root_certificate(&properties.tls)? {
            builder = builder.add_root_certificate(ca);
        }

        debug!(
            url = %properties.url,
            mtls = properties.tls.has_identity(),
            oauth2 = properties.oauth2.is_some(),
            "Building CredHub HTTP client"
        );

        builder
            .build()
            .map_err(|e| CredHubError::config(format!("Failed to build HTTP client: {}", e)))
    }

    /// Client identity from the configured certificate and key PEM files.
    pub fn identity(tls: &ClientTlsConfig) -> Result<Option<Identity>> {
        let (cert_path, key_path) = match (&tls.cert_path, &tls.key_path) {
            (Some(cert), Some(key)) => (cert, key),
            (None, None) => return Ok(None),
            _ => return tls.validate().map(|_| None),
        };

        let mut pem = read_pem(cert_path)?;
        pem.push(b'\n');
        pem.extend(read_pem(key_path)?);

        Identity::from_pem(&pem).map(Some).map_err(|e| {
            CredHubError::config(format!(
                "Invalid client certificate '{}' or key '{}': {}",
                cert_path.display(),
                key_path.display(),
                e
            ))
        })
    }

    fn root_certificate(tls: &ClientTlsConfig) -> Result<Option<Certificate>> {
        let Some(path) = &tls.ca_cert_path else {
            return Ok(None);
        };

        Certificate::from_pem(&read_pem(path)?).map(Some).map_err(|e| {
            CredHubError::config(format!("Invalid CA certificate '{}': {}", path.display(), e))
        })
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        CredHubError::config(format!("Failed to read PEM file '{}': {}", path.display(), e))
    })
}
