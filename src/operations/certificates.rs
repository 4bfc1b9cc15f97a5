//! Certificate lifecycle on `/api/v1/certificates`.

use tracing::instrument;

use super::require_non_empty;
use crate::certificate::{
    BulkRegenerateRequest, BulkRegenerateResponse, CertificateEnvelope,
    CertificateRegenerateRequest, CertificateSummary, TransitionalVersionRequest,
};
use crate::credential::{CredentialDetails, CredentialName};
use crate::errors::{CredHubError, Result};
use crate::http::HttpClient;

const CERTIFICATES: &[&str] = &["api", "v1", "certificates"];

/// Certificate operations
#[derive(Debug, Clone, Copy)]
pub struct CertificateOperations<'a> {
    http: &'a HttpClient,
}

impl<'a> CertificateOperations<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// All certificates the caller may read.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<CertificateSummary>> {
        let envelope: CertificateEnvelope = self.http.get_json(CERTIFICATES, &[]).await?;
        Ok(envelope.certificates)
    }

    #[instrument(skip(self), fields(name = %name))]
    pub async fn get_by_name(&self, name: &CredentialName) -> Result<CertificateSummary> {
        let name = name.name();
        let envelope: CertificateEnvelope =
            self.http.get_json(CERTIFICATES, &[("name", name.as_str())]).await?;

        envelope.certificates.into_iter().next().ok_or_else(|| {
            CredHubError::unexpected_response(format!("no certificate returned for '{}'", name))
        })
    }

    /// Regenerate a certificate, optionally marking the new version transitional.
    #[instrument(skip(self))]
    pub async fn regenerate(
        &self,
        certificate_id: &str,
        set_as_transitional: bool,
    ) -> Result<CredentialDetails> {
        require_non_empty("certificate_id", certificate_id)?;
        self.http
            .post_json(
                &["api", "v1", "certificates", certificate_id, "regenerate"],
                &CertificateRegenerateRequest { set_as_transitional },
            )
            .await
    }

    /// Mark `version_id` transitional, or clear the flag with `None`.
    #[instrument(skip(self))]
    pub async fn update_transitional_version(
        &self,
        certificate_id: &str,
        version_id: Option<&str>,
    ) -> Result<Vec<CredentialDetails>> {
        require_non_empty("certificate_id", certificate_id)?;
        if let Some(version) = version_id {
            require_non_empty("version_id", version)?;
        }

        self.http
            .put_json(
                &["api", "v1", "certificates", certificate_id, "update_transitional_version"],
                &TransitionalVersionRequest { version: version_id },
            )
            .await
    }

    /// Versions of a certificate; `current_only` limits them to the active ones.
    #[instrument(skip(self))]
    pub async fn get_versions(
        &self,
        certificate_id: &str,
        current_only: bool,
    ) -> Result<Vec<CredentialDetails>> {
        require_non_empty("certificate_id", certificate_id)?;
        let current = if current_only { "true" } else { "false" };
        self.http
            .get_json(
                &["api", "v1", "certificates", certificate_id, "versions"],
                &[("current", current)],
            )
            .await
    }

    /// Regenerate every certificate signed by the given CA. Returns the
    /// names of the regenerated certificates.
    #[instrument(skip(self), fields(signed_by = %signed_by))]
    pub async fn bulk_regenerate(&self, signed_by: &CredentialName) -> Result<Vec<CredentialName>> {
        let response: BulkRegenerateResponse = self
            .http
            .post_json(&["api", "v1", "bulk-regenerate"], &BulkRegenerateRequest { signed_by })
            .await?;
        Ok(response.regenerated_credentials)
    }
}
