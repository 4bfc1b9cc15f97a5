//! Access control entries on `/api/v1/permissions`.

use tracing::instrument;

use crate::credential::CredentialName;
use crate::errors::{CredHubError, Result};
use crate::http::HttpClient;
use crate::permission::{Actor, CredentialPermissions, Permission};

const PERMISSIONS: &[&str] = &["api", "v1", "permissions"];

/// Permission operations (v1 API)
#[derive(Debug, Clone, Copy)]
pub struct PermissionOperations<'a> {
    http: &'a HttpClient,
}

impl<'a> PermissionOperations<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    #[instrument(skip(self), fields(name = %name))]
    pub async fn get_permissions(&self, name: &CredentialName) -> Result<Vec<Permission>> {
        let name = name.name();
        let response: CredentialPermissions =
            self.http.get_json(PERMISSIONS, &[("credential_name", name.as_str())]).await?;
        Ok(response.permissions)
    }

    /// Grant additional permissions. Existing entries for other actors stay.
    #[instrument(skip(self, permissions), fields(name = %name, count = permissions.len()))]
    pub async fn add_permissions(
        &self,
        name: &CredentialName,
        permissions: &[Permission],
    ) -> Result<()> {
        if permissions.is_empty() {
            return Err(CredHubError::invalid_argument(
                "permissions",
                "at least one permission is required",
            ));
        }
        permissions.iter().try_for_each(Permission::validate)?;

        let body = CredentialPermissions {
            credential_name: name.clone(),
            permissions: permissions.to_vec(),
        };
        self.http.post_no_content(PERMISSIONS, &body).await
    }

    /// Remove every operation granted to `actor` on the credential.
    #[instrument(skip(self), fields(name = %name, actor = %actor))]
    pub async fn delete_permission(&self, name: &CredentialName, actor: &Actor) -> Result<()> {
        let name = name.name();
        let actor = actor.identity();
        self.http
            .delete_no_content(
                PERMISSIONS,
                &[("credential_name", name.as_str()), ("actor", actor.as_str())],
            )
            .await
    }
}
