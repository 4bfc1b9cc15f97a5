//! Access-control models for the v1 (per-credential ACE) and v2 (path-based)
//! permission APIs.

pub mod actor;

pub use actor::{Actor, ActorType};

use serde::{Deserialize, Serialize};

use crate::credential::CredentialName;
use crate::errors::{CredHubError, Result};

/// Operations a permission can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Read,
    Write,
    Delete,
    ReadAcl,
    WriteAcl,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Delete => "delete",
            Operation::ReadAcl => "read_acl",
            Operation::WriteAcl => "write_acl",
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "read" => Ok(Operation::Read),
            "write" => Ok(Operation::Write),
            "delete" => Ok(Operation::Delete),
            "read_acl" => Ok(Operation::ReadAcl),
            "write_acl" => Ok(Operation::WriteAcl),
            other => Err(CredHubError::invalid_argument(
                "operation",
                format!("unknown operation '{}'", other),
            )),
        }
    }
}

/// An access-control entry: an actor and the operations it may perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub actor: Actor,
    pub operations: Vec<Operation>,
}

impl Permission {
    pub fn new(actor: Actor) -> Self {
        Self { actor, operations: Vec::new() }
    }

    /// Permission for a Cloud Foundry application identified by its GUID.
    pub fn app(app_guid: impl Into<String>) -> Self {
        Self::new(Actor::app(app_guid))
    }

    /// Permission for a UAA user identified by its id.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self::new(Actor::user(user_id))
    }

    /// Permission for a UAA OAuth2 client.
    pub fn client(client_id: impl Into<String>) -> Self {
        Self::new(Actor::client(client_id))
    }

    /// Add an operation; duplicates are ignored.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        if !self.operations.contains(&operation) {
            self.operations.push(operation);
        }
        self
    }

    pub fn with_operations<I: IntoIterator<Item = Operation>>(self, operations: I) -> Self {
        operations.into_iter().fold(self, Permission::with_operation)
    }

    pub fn read(self) -> Self {
        self.with_operation(Operation::Read)
    }

    pub fn write(self) -> Self {
        self.with_operation(Operation::Write)
    }

    pub fn delete(self) -> Self {
        self.with_operation(Operation::Delete)
    }

    pub fn read_acl(self) -> Self {
        self.with_operation(Operation::ReadAcl)
    }

    pub fn write_acl(self) -> Self {
        self.with_operation(Operation::WriteAcl)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.operations.is_empty() {
            return Err(CredHubError::invalid_argument(
                "operations",
                format!("permission for '{}' grants no operations", self.actor),
            ));
        }
        Ok(())
    }
}

/// v1 body for `GET`/`POST /api/v1/permissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPermissions {
    pub credential_name: CredentialName,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// A v2 permission as stored by CredHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDetails {
    pub uuid: String,
    /// Credential path; may end in `*` to cover a whole subtree.
    pub path: String,
    pub actor: Actor,
    pub operations: Vec<Operation>,
}

/// v2 body for `POST`/`PUT /api/v2/permissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct PermissionV2Request<'a> {
    pub path: &'a str,
    pub actor: &'a Actor,
    pub operations: &'a [Operation],
}
