//! Blocking CredHub client.
//!
//! Wraps the asynchronous [`crate::CredHubClient`] and drives each call to
//! completion on a private current-thread runtime. Calls block the current
//! thread for one round trip. They must not be made from inside an async
//! runtime; doing so returns a configuration error instead of deadlocking.
//!
//! ```rust,ignore
//! use credhub::blocking::CredHubClient;
//!
//! let client = CredHubClient::from_env()?;
//! let version = client.info().version()?;
//! ```

use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

use crate::certificate::CertificateSummary;
use crate::config::CredHubProperties;
use crate::credential::{
    CredentialDetails, CredentialName, CredentialRequest, CredentialSummary, ParametersRequest,
};
use crate::errors::{CredHubError, Result};
use crate::info::{ServerInfo, VersionInfo};
use crate::interpolation::ServicesData;
use crate::operations::CredHubClient as AsyncClient;
use crate::permission::{Actor, Permission, PermissionDetails};

/// Synchronous CredHub client
#[derive(Debug, Clone)]
pub struct CredHubClient {
    inner: AsyncClient,
    runtime: Arc<Runtime>,
}

impl CredHubClient {
    pub fn new(properties: &CredHubProperties) -> Result<Self> {
        Self::from_async(AsyncClient::new(properties)?)
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&CredHubProperties::from_env())
    }

    /// Wrap an existing asynchronous client.
    pub fn from_async(inner: AsyncClient) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime: Arc::new(runtime) })
    }

    pub fn as_async(&self) -> &AsyncClient {
        &self.inner
    }

    pub fn credentials(&self) -> CredentialOperations<'_> {
        CredentialOperations { client: self }
    }

    pub fn certificates(&self) -> CertificateOperations<'_> {
        CertificateOperations { client: self }
    }

    pub fn permissions(&self) -> PermissionOperations<'_> {
        PermissionOperations { client: self }
    }

    pub fn permissions_v2(&self) -> PermissionV2Operations<'_> {
        PermissionV2Operations { client: self }
    }

    pub fn interpolation(&self) -> InterpolationOperations<'_> {
        InterpolationOperations { client: self }
    }

    pub fn info(&self) -> InfoOperations<'_> {
        InfoOperations { client: self }
    }

    fn block_on<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(CredHubError::config(
                "the blocking CredHub client cannot be used from within an async runtime",
            ));
        }
        self.runtime.block_on(future)
    }
}

/// Blocking counterpart of [`crate::operations::CredentialOperations`]
#[derive(Debug, Clone, Copy)]
pub struct CredentialOperations<'a> {
    client: &'a CredHubClient,
}

impl CredentialOperations<'_> {
    pub fn write(&self, request: &CredentialRequest) -> Result<CredentialDetails> {
        self.client.block_on(self.client.inner.credentials().write(request))
    }

    pub fn generate(&self, request: &ParametersRequest) -> Result<CredentialDetails> {
        self.client.block_on(self.client.inner.credentials().generate(request))
    }

    pub fn regenerate(&self, name: &CredentialName) -> Result<CredentialDetails> {
        self.client.block_on(self.client.inner.credentials().regenerate(name))
    }

    pub fn get_by_id(&self, id: &str) -> Result<CredentialDetails> {
        self.client.block_on(self.client.inner.credentials().get_by_id(id))
    }

    pub fn get_by_name(&self, name: &CredentialName) -> Result<CredentialDetails> {
        self.client.block_on(self.client.inner.credentials().get_by_name(name))
    }

    pub fn get_by_name_with_history(
        &self,
        name: &CredentialName,
        versions: u32,
    ) -> Result<Vec<CredentialDetails>> {
        self.client
            .block_on(self.client.inner.credentials().get_by_name_with_history(name, versions))
    }

    pub fn find_by_name(&self, name_like: &str) -> Result<Vec<CredentialSummary>> {
        self.client.block_on(self.client.inner.credentials().find_by_name(name_like))
    }

    pub fn find_by_path(&self, path: &str) -> Result<Vec<CredentialSummary>> {
        self.client.block_on(self.client.inner.credentials().find_by_path(path))
    }

    pub fn delete_by_name(&self, name: &CredentialName) -> Result<()> {
        self.client.block_on(self.client.inner.credentials().delete_by_name(name))
    }
}

/// Blocking counterpart of [`crate::operations::CertificateOperations`]
#[derive(Debug, Clone, Copy)]
pub struct CertificateOperations<'a> {
    client: &'a CredHubClient,
}

impl CertificateOperations<'_> {
    pub fn get_all(&self) -> Result<Vec<CertificateSummary>> {
        self.client.block_on(self.client.inner.certificates().get_all())
    }

    pub fn get_by_name(&self, name: &CredentialName) -> Result<CertificateSummary> {
        self.client.block_on(self.client.inner.certificates().get_by_name(name))
    }

    pub fn regenerate(
        &self,
        certificate_id: &str,
        set_as_transitional: bool,
    ) -> Result<CredentialDetails> {
        self.client.block_on(
            self.client.inner.certificates().regenerate(certificate_id, set_as_transitional),
        )
    }

    pub fn update_transitional_version(
        &self,
        certificate_id: &str,
        version_id: Option<&str>,
    ) -> Result<Vec<CredentialDetails>> {
        self.client.block_on(
            self.client.inner.certificates().update_transitional_version(certificate_id, version_id),
        )
    }

    pub fn get_versions(
        &self,
        certificate_id: &str,
        current_only: bool,
    ) -> Result<Vec<CredentialDetails>> {
        self.client
            .block_on(self.client.inner.certificates().get_versions(certificate_id, current_only))
    }

    pub fn bulk_regenerate(&self, signed_by: &CredentialName) -> Result<Vec<CredentialName>> {
        self.client.block_on(self.client.inner.certificates().bulk_regenerate(signed_by))
    }
}

/// Blocking counterpart of [`crate::operations::PermissionOperations`]
#[derive(Debug, Clone, Copy)]
pub struct PermissionOperations<'a> {
    client: &'a CredHubClient,
}

impl PermissionOperations<'_> {
    pub fn get_permissions(&self, name: &CredentialName) -> Result<Vec<Permission>> {
        self.client.block_on(self.client.inner.permissions().get_permissions(name))
    }

    pub fn add_permissions(&self, name: &CredentialName, permissions: &[Permission]) -> Result<()> {
        self.client.block_on(self.client.inner.permissions().add_permissions(name, permissions))
    }

    pub fn delete_permission(&self, name: &CredentialName, actor: &Actor) -> Result<()> {
        self.client.block_on(self.client.inner.permissions().delete_permission(name, actor))
    }
}

/// Blocking counterpart of [`crate::operations::PermissionV2Operations`]
#[derive(Debug, Clone, Copy)]
pub struct PermissionV2Operations<'a> {
    client: &'a CredHubClient,
}

impl PermissionV2Operations<'_> {
    pub fn get_permission(&self, uuid: &str) -> Result<PermissionDetails> {
        self.client.block_on(self.client.inner.permissions_v2().get_permission(uuid))
    }

    pub fn get_permission_by_path_and_actor(
        &self,
        path: &str,
        actor: &Actor,
    ) -> Result<PermissionDetails> {
        self.client.block_on(
            self.client.inner.permissions_v2().get_permission_by_path_and_actor(path, actor),
        )
    }

    pub fn add_permission(&self, path: &str, permission: &Permission) -> Result<PermissionDetails> {
        self.client.block_on(self.client.inner.permissions_v2().add_permission(path, permission))
    }

    pub fn update_permission(
        &self,
        uuid: &str,
        path: &str,
        permission: &Permission,
    ) -> Result<PermissionDetails> {
        self.client.block_on(
            self.client.inner.permissions_v2().update_permission(uuid, path, permission),
        )
    }

    pub fn delete_permission(&self, uuid: &str) -> Result<PermissionDetails> {
        self.client.block_on(self.client.inner.permissions_v2().delete_permission(uuid))
    }
}

/// Blocking counterpart of [`crate::operations::InterpolationOperations`]
#[derive(Debug, Clone, Copy)]
pub struct InterpolationOperations<'a> {
    client: &'a CredHubClient,
}

impl InterpolationOperations<'_> {
    pub fn interpolate_service_data(&self, services: &ServicesData) -> Result<ServicesData> {
        self.client.block_on(self.client.inner.interpolation().interpolate_service_data(services))
    }
}

/// Blocking counterpart of [`crate::operations::InfoOperations`]
#[derive(Debug, Clone, Copy)]
pub struct InfoOperations<'a> {
    client: &'a CredHubClient,
}

impl InfoOperations<'_> {
    pub fn version(&self) -> Result<VersionInfo> {
        self.client.block_on(self.client.inner.info().version())
    }

    pub fn server_info(&self) -> Result<ServerInfo> {
        self.client.block_on(self.client.inner.info().server_info())
    }
}
