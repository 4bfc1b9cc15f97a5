//! Bearer tokens for CredHub requests.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::config::OAuth2Properties;
use crate::credential::SecretString;
use crate::errors::{CredHubError, ErrorBody, Result};

/// Tokens are refreshed this long before the server says they expire.
pub const TOKEN_EXPIRY_SKEW: Duration = Duration::from_secs(30);

/// Source of the bearer token attached to every CredHub request.
#[async_trait]
pub trait TokenProvider: Send + Sync + fmt::Debug {
    async fn access_token(&self) -> Result<SecretString>;
}

/// A pre-issued token, e.g. one obtained with `cf oauth-token`.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<SecretString>) -> Self {
        let token = token.into();
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<SecretString> {
        Ok(self.token.clone())
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: SecretString,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    token: SecretString,
    refresh_at: Instant,
}

/// OAuth2 client-credentials grant against a UAA token endpoint.
///
/// The token is cached until [`TOKEN_EXPIRY_SKEW`] before its `expires_in`.
/// Concurrent callers share one fetch because the cache lock is held across
/// the token request.
pub struct ClientCredentialsTokenProvider {
    client: reqwest::Client,
    properties: OAuth2Properties,
    cache: Mutex<Option<CachedToken>>,
}

impl fmt::Debug for ClientCredentialsTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsTokenProvider")
            .field("token_uri", &self.properties.token_uri)
            .field("client_id", &self.properties.client_id)
            .finish_non_exhaustive()
    }
}

impl ClientCredentialsTokenProvider {
    pub fn new(client: reqwest::Client, properties: OAuth2Properties) -> Self {
        Self { client, properties, cache: Mutex::new(None) }
    }

    /// Drop the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        self.cache.lock().await.take();
    }

    #[instrument(skip(self), fields(token_uri = %self.properties.token_uri, client_id = %self.properties.client_id))]
    async fn fetch_token(&self) -> Result<TokenResponse> {
        debug!("Requesting client-credentials token");

        let response = self
            .client
            .post(&self.properties.token_uri)
            .header(ACCEPT, "application/json")
            .basic_auth(&self.properties.client_id, Some(self.properties.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials"), ("response_type", "token")])
            .send()
            .await
            .map_err(|e| CredHubError::authentication(format!("token request failed: {}", e)))?;

        let status = response.status();
        debug!(status = %status, "Token endpoint responded");

        let body = response.text().await.map_err(|e| {
            CredHubError::authentication(format!("failed to read token response: {}", e))
        })?;

        if !status.is_success() {
            let reason = ErrorBody::parse(&body)
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| "no error message".to_string());
            return Err(CredHubError::authentication(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                reason
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            CredHubError::authentication(format!("invalid token response: {}", e))
        })
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsTokenProvider {
    async fn access_token(&self) -> Result<SecretString> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if Instant::now() < cached.refresh_at {
                return Ok(cached.token.clone());
            }
        }

        let response = self.fetch_token().await?;
        let lifetime = Duration::from_secs(response.expires_in.unwrap_or(0));
        let refresh_at = Instant::now() + lifetime.saturating_sub(TOKEN_EXPIRY_SKEW);
        let token = response.access_token;

        *cache = Some(CachedToken { token: token.clone(), refresh_at });
        Ok(token)
    }
}
