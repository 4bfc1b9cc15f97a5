//! HTTP client for the CredHub API
//!
//! Sends JSON requests with an optional bearer token, checks the response
//! status and turns every CredHub failure into [`CredHubError::Api`].

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace, Instrument};
use url::Url;

use super::factory::ClientFactory;
use super::oauth2::{ClientCredentialsTokenProvider, TokenProvider};
use crate::config::CredHubProperties;
use crate::errors::{CredHubError, Result};

const REDACTED_KEYS: &[&str] =
    &["value", "password", "private_key", "client_secret", "access_token", "credentials"];

/// Authenticated HTTP client for the CredHub API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token_provider: Option<Arc<dyn TokenProvider>>,
    verbose: bool,
}

impl HttpClient {
    /// Validate the settings and build a client. Configured OAuth2 credentials
    /// install a [`ClientCredentialsTokenProvider`] sharing the same pool.
    pub fn new(properties: &CredHubProperties) -> Result<Self> {
        properties.validate()?;
        let client = ClientFactory::build(properties)?;

        let token_provider = properties.oauth2.clone().map(|oauth2| {
            Arc::new(ClientCredentialsTokenProvider::new(client.clone(), oauth2))
                as Arc<dyn TokenProvider>
        });

        Self::from_parts(client, properties.base_url(), token_provider, properties.verbose)
    }

    pub fn from_parts(
        client: Client,
        base_url: &str,
        token_provider: Option<Arc<dyn TokenProvider>>,
        verbose: bool,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CredHubError::config(format!("Invalid CredHub URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CredHubError::config(format!("CredHub URL '{}' cannot be a base", base_url)));
        }

        Ok(Self { client, base_url, token_provider, verbose })
    }

    /// Replace the token provider, e.g. with a static token.
    pub fn with_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Absolute URL for the given path segments and query pairs. Segments are
    /// percent-encoded individually.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CredHubError::config("CredHub URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Send a GET request and deserialize the JSON response
    pub async fn get_json<R: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<R> {
        let url = self.endpoint(segments, query)?;
        let body = self.execute::<()>(Method::GET, url, None).await?;
        self.decode(&body)
    }

    /// Send a POST request with JSON body and deserialize the response
    pub async fn post_json<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &T,
    ) -> Result<R> {
        let url = self.endpoint(segments, &[])?;
        let body = self.execute(Method::POST, url, Some(body)).await?;
        self.decode(&body)
    }

    /// Send a POST request with JSON body, ignoring any response body
    pub async fn post_no_content<T: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &T,
    ) -> Result<()> {
        let url = self.endpoint(segments, &[])?;
        self.execute(Method::POST, url, Some(body)).await.map(|_| ())
    }

    /// Send a PUT request with JSON body and deserialize the response
    pub async fn put_json<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &T,
    ) -> Result<R> {
        let url = self.endpoint(segments, &[])?;
        let body = self.execute(Method::PUT, url, Some(body)).await?;
        self.decode(&body)
    }

    /// Send a DELETE request and deserialize the response
    pub async fn delete_json<R: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<R> {
        let url = self.endpoint(segments, query)?;
        let body = self.execute::<()>(Method::DELETE, url, None).await?;
        self.decode(&body)
    }

    /// Send a DELETE request that expects no content response (204)
    pub async fn delete_no_content(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<()> {
        let url = self.endpoint(segments, query)?;
        self.execute::<()>(Method::DELETE, url, None).await.map(|_| ())
    }

    async fn execute<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&T>,
    ) -> Result<String> {
        let span = crate::observability::request_span!(method, url.path());

        async move {
            debug!("{} {}", method, url);
            let mut request = self.client.request(method, url);

            if let Some(provider) = &self.token_provider {
                let token = provider.access_token().await?;
                request = request.bearer_auth(token.expose_secret());
            }

            if let Some(body) = body {
                let json = serde_json::to_vec(body)?;
                if self.verbose {
                    trace!("Request body:\n{}", redact(&json));
                }
                request = request.header(CONTENT_TYPE, "application/json").body(json);
            }

            let response = request.send().await?;
            self.handle_response(response).await
        }
        .instrument(span)
        .await
    }

    /// Check status and in-body errors, returning the raw body on success
    async fn handle_response(&self, response: Response) -> Result<String> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if self.verbose {
                trace!("Error response:\n{}", redact(error_text.as_bytes()));
            }

            return Err(CredHubError::from_response(status.as_u16(), &error_text));
        }

        let body = response.text().await?;

        if self.verbose && !body.is_empty() {
            trace!("Response body:\n{}", redact(body.as_bytes()));
        }

        if let Some(message) = in_body_error(&body) {
            return Err(CredHubError::api(status.as_u16(), Some(message)));
        }

        Ok(body)
    }

    fn decode<R: DeserializeOwned>(&self, body: &str) -> Result<R> {
        serde_json::from_str(body).map_err(|e| {
            CredHubError::unexpected_response(format!("failed to decode response body: {}", e))
        })
    }
}

/// A non-null top-level `error_message` marks a failure even on 2xx.
fn in_body_error(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error_message")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

/// Body text for trace logs with secret-bearing fields masked.
fn redact(body: &[u8]) -> String {
    fn mask(value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, field) in map.iter_mut() {
                    if REDACTED_KEYS.contains(&key.as_str()) {
                        *field = Value::String("[REDACTED]".to_string());
                    } else {
                        mask(field);
                    }
                }
            }
            Value::Array(items) => items.iter_mut().for_each(mask),
            _ => {}
        }
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(mut value) => {
            mask(&mut value);
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| "<unable to serialize>".into())
        }
        Err(_) => format!("<{} bytes of non-JSON content>", body.len()),
    }
}
