//! Credential reads and writes on `/api/v1/data`.

use tracing::{debug, instrument};

use super::require_non_empty;
use crate::credential::details::{CredentialDataEnvelope, CredentialSummaryEnvelope};
use crate::credential::request::RegenerateRequest;
use crate::credential::{
    CredentialDetails, CredentialName, CredentialRequest, CredentialSummary, ParametersRequest,
};
use crate::errors::{CredHubError, Result};
use crate::http::HttpClient;

const DATA: &[&str] = &["api", "v1", "data"];
const REGENERATE: &[&str] = &["api", "v1", "regenerate"];

/// Credential operations
#[derive(Debug, Clone, Copy)]
pub struct CredentialOperations<'a> {
    http: &'a HttpClient,
}

impl<'a> CredentialOperations<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Store a caller-supplied value.
    #[instrument(skip(self, request), fields(name = %request.name, credential_type = %request.credential_type()))]
    pub async fn write(&self, request: &CredentialRequest) -> Result<CredentialDetails> {
        request.validate()?;
        self.http.put_json(DATA, request).await
    }

    /// Have CredHub generate a new value from parameters.
    #[instrument(skip(self, request), fields(name = %request.name, credential_type = %request.credential_type()))]
    pub async fn generate(&self, request: &ParametersRequest) -> Result<CredentialDetails> {
        request.validate()?;
        self.http.post_json(DATA, request).await
    }

    /// Generate a new version using the parameters of the current one.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn regenerate(&self, name: &CredentialName) -> Result<CredentialDetails> {
        self.http.post_json(REGENERATE, &RegenerateRequest { name }).await
    }

    /// Fetch one credential version by its id.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<CredentialDetails> {
        require_non_empty("id", id)?;
        self.http.get_json(&["api", "v1", "data", id], &[]).await
    }

    /// Fetch the current version of a credential.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn get_by_name(&self, name: &CredentialName) -> Result<CredentialDetails> {
        let name = name.name();
        let envelope: CredentialDataEnvelope =
            self.http.get_json(DATA, &[("name", name.as_str()), ("current", "true")]).await?;

        envelope.data.into_iter().next().ok_or_else(|| {
            CredHubError::unexpected_response(format!("no versions returned for credential '{}'", name))
        })
    }

    /// Fetch up to `versions` versions of a credential, newest first.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn get_by_name_with_history(
        &self,
        name: &CredentialName,
        versions: u32,
    ) -> Result<Vec<CredentialDetails>> {
        if versions < 1 {
            return Err(CredHubError::invalid_argument("versions", "must be at least 1"));
        }

        let name = name.name();
        let versions = versions.to_string();
        let envelope: CredentialDataEnvelope = self
            .http
            .get_json(DATA, &[("name", name.as_str()), ("versions", versions.as_str())])
            .await?;

        debug!(count = envelope.data.len(), "Fetched credential history");
        Ok(envelope.data)
    }

    /// Credentials whose name contains `name_like`.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name_like: &str) -> Result<Vec<CredentialSummary>> {
        require_non_empty("name_like", name_like)?;
        let envelope: CredentialSummaryEnvelope =
            self.http.get_json(DATA, &[("name-like", name_like)]).await?;
        Ok(envelope.credentials)
    }

    /// Credentials stored under `path`.
    #[instrument(skip(self))]
    pub async fn find_by_path(&self, path: &str) -> Result<Vec<CredentialSummary>> {
        require_non_empty("path", path)?;
        let envelope: CredentialSummaryEnvelope =
            self.http.get_json(DATA, &[("path", path)]).await?;
        Ok(envelope.credentials)
    }

    /// Delete every version of a credential.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn delete_by_name(&self, name: &CredentialName) -> Result<()> {
        let name = name.name();
        self.http.delete_no_content(DATA, &[("name", name.as_str())]).await
    }
}
