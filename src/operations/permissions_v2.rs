//! Path-based permissions on `/api/v2/permissions`.

use tracing::instrument;

use super::require_non_empty;
use crate::errors::Result;
use crate::http::HttpClient;
use crate::permission::{Actor, Permission, PermissionDetails, PermissionV2Request};

const PERMISSIONS: &[&str] = &["api", "v2", "permissions"];

/// Permission operations (v2 API)
#[derive(Debug, Clone, Copy)]
pub struct PermissionV2Operations<'a> {
    http: &'a HttpClient,
}

impl<'a> PermissionV2Operations<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    #[instrument(skip(self))]
    pub async fn get_permission(&self, uuid: &str) -> Result<PermissionDetails> {
        require_non_empty("uuid", uuid)?;
        self.http.get_json(&["api", "v2", "permissions", uuid], &[]).await
    }

    #[instrument(skip(self), fields(actor = %actor))]
    pub async fn get_permission_by_path_and_actor(
        &self,
        path: &str,
        actor: &Actor,
    ) -> Result<PermissionDetails> {
        require_non_empty("path", path)?;
        let actor = actor.identity();
        self.http.get_json(PERMISSIONS, &[("path", path), ("actor", actor.as_str())]).await
    }

    /// Grant `permission` on `path`. A trailing `*` covers a whole subtree.
    #[instrument(skip(self, permission), fields(actor = %permission.actor))]
    pub async fn add_permission(
        &self,
        path: &str,
        permission: &Permission,
    ) -> Result<PermissionDetails> {
        require_non_empty("path", path)?;
        permission.validate()?;

        let body = PermissionV2Request {
            path,
            actor: &permission.actor,
            operations: &permission.operations,
        };
        self.http.post_json(PERMISSIONS, &body).await
    }

    /// Replace the path, actor and operations of an existing permission.
    #[instrument(skip(self, permission), fields(actor = %permission.actor))]
    pub async fn update_permission(
        &self,
        uuid: &str,
        path: &str,
        permission: &Permission,
    ) -> Result<PermissionDetails> {
        require_non_empty("uuid", uuid)?;
        require_non_empty("path", path)?;
        permission.validate()?;

        let body = PermissionV2Request {
            path,
            actor: &permission.actor,
            operations: &permission.operations,
        };
        self.http.put_json(&["api", "v2", "permissions", uuid], &body).await
    }

    /// Delete a permission, returning what was removed.
    #[instrument(skip(self))]
    pub async fn delete_permission(&self, uuid: &str) -> Result<PermissionDetails> {
        require_non_empty("uuid", uuid)?;
        self.http.delete_json(&["api", "v2", "permissions", uuid], &[]).await
    }
}
