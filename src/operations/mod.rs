//! # CredHub Operations
//!
//! [`CredHubClient`] is the entry point. It owns one configured
//! [`HttpClient`] and hands out borrowed façades, one per API area:
//!
//! ```rust,ignore
//! let client = CredHubClient::new(&CredHubProperties::from_env())?;
//! let name = CredentialName::new("/c/my-broker/db/instance-1/password")?;
//! let details = client.credentials().get_by_name(&name).await?;
//! ```
//!
//! Every façade method validates its arguments before any request is sent and
//! returns a lazy future; dropping it abandons the exchange.

pub mod certificates;
pub mod credentials;
pub mod info;
pub mod interpolation;
pub mod permissions;
pub mod permissions_v2;

pub use certificates::CertificateOperations;
pub use credentials::CredentialOperations;
pub use info::InfoOperations;
pub use interpolation::InterpolationOperations;
pub use permissions::PermissionOperations;
pub use permissions_v2::PermissionV2Operations;

use std::sync::Arc;

use crate::config::CredHubProperties;
use crate::errors::{CredHubError, Result};
use crate::http::{HttpClient, TokenProvider};

/// Asynchronous CredHub client
#[derive(Debug, Clone)]
pub struct CredHubClient {
    http: HttpClient,
}

impl CredHubClient {
    /// Validate the settings and build a client
    pub fn new(properties: &CredHubProperties) -> Result<Self> {
        Ok(Self { http: HttpClient::new(properties)? })
    }

    /// Build a client from `CREDHUB_*` and `CF_INSTANCE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&CredHubProperties::from_env())
    }

    pub fn from_http_client(http: HttpClient) -> Self {
        Self { http }
    }

    /// Authenticate with a caller-supplied token source instead of the
    /// configured one.
    pub fn with_token_provider(self, provider: Arc<dyn TokenProvider>) -> Self {
        Self { http: self.http.with_token_provider(provider) }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn credentials(&self) -> CredentialOperations<'_> {
        CredentialOperations::new(&self.http)
    }

    pub fn certificates(&self) -> CertificateOperations<'_> {
        CertificateOperations::new(&self.http)
    }

    pub fn permissions(&self) -> PermissionOperations<'_> {
        PermissionOperations::new(&self.http)
    }

    pub fn permissions_v2(&self) -> PermissionV2Operations<'_> {
        PermissionV2Operations::new(&self.http)
    }

    pub fn interpolation(&self) -> InterpolationOperations<'_> {
        InterpolationOperations::new(&self.http)
    }

    pub fn info(&self) -> InfoOperations<'_> {
        InfoOperations::new(&self.http)
    }
}

/// Reject empty or whitespace-only identifiers before dispatch.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CredHubError::invalid_argument(field, "must not be empty"));
    }
    Ok(())
}
