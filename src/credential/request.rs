//! Write, generate and regenerate request bodies.

use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use super::name::CredentialName;
use super::parameters::GenerationParameters;
use super::types::{CredentialType, WriteMode};
use super::value::CredentialValue;
use crate::errors::Result;
use crate::permission::Permission;

/// Body of `PUT /api/v1/data`: store a caller-supplied value.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRequest {
    pub name: CredentialName,
    pub mode: Option<WriteMode>,
    pub value: CredentialValue,
    pub additional_permissions: Vec<Permission>,
}

impl CredentialRequest {
    pub fn new(name: CredentialName, value: impl Into<CredentialValue>) -> Self {
        Self { name, mode: None, value: value.into(), additional_permissions: Vec::new() }
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.additional_permissions.push(permission);
        self
    }

    pub fn credential_type(&self) -> CredentialType {
        self.value.credential_type()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.additional_permissions.iter().try_for_each(Permission::validate)
    }
}

#[derive(Serialize)]
struct WireWriteRequest<'a> {
    name: &'a CredentialName,
    #[serde(rename = "type")]
    credential_type: CredentialType,
    value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<WriteMode>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    additional_permissions: &'a [Permission],
}

impl Serialize for CredentialRequest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireWriteRequest {
            name: &self.name,
            credential_type: self.credential_type(),
            value: self.value.to_wire().map_err(S::Error::custom)?,
            mode: self.mode,
            additional_permissions: &self.additional_permissions,
        }
        .serialize(serializer)
    }
}

/// Body of `POST /api/v1/data`: have CredHub generate the value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametersRequest {
    pub name: CredentialName,
    pub mode: Option<WriteMode>,
    pub parameters: GenerationParameters,
    pub additional_permissions: Vec<Permission>,
}

impl ParametersRequest {
    pub fn new(name: CredentialName, parameters: impl Into<GenerationParameters>) -> Self {
        Self {
            name,
            mode: None,
            parameters: parameters.into(),
            additional_permissions: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.additional_permissions.push(permission);
        self
    }

    pub fn credential_type(&self) -> CredentialType {
        self.parameters.credential_type()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.parameters.validate()?;
        self.additional_permissions.iter().try_for_each(Permission::validate)
    }
}

#[derive(Serialize)]
struct WireGenerateRequest<'a> {
    name: &'a CredentialName,
    #[serde(rename = "type")]
    credential_type: CredentialType,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<WriteMode>,
    parameters: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    additional_permissions: &'a [Permission],
}

impl Serialize for ParametersRequest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireGenerateRequest {
            name: &self.name,
            credential_type: self.credential_type(),
            mode: self.mode,
            parameters: self.parameters.parameters_json().map_err(S::Error::custom)?,
            value: self.parameters.value_json(),
            additional_permissions: &self.additional_permissions,
        }
        .serialize(serializer)
    }
}

/// Body of `POST /api/v1/regenerate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct RegenerateRequest<'a> {
    pub name: &'a CredentialName,
}
