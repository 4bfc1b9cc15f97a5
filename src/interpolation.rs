//! VCAP service-binding data and `credhub-ref` placeholders.
//!
//! Cloud Foundry hands applications their service bindings in the
//! `VCAP_SERVICES` environment variable. Brokers that keep secrets in CredHub
//! replace a binding's `credentials` with `{"credhub-ref": "/c/..."}`; the
//! interpolate endpoint swaps each reference for the stored value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::credential::CredentialName;
use crate::errors::{CredHubError, Result};

/// Environment variable Cloud Foundry populates with service bindings.
pub const VCAP_SERVICES_ENV: &str = "VCAP_SERVICES";

/// Key a broker uses to point a binding at a CredHub credential.
pub const CREDHUB_REF_KEY: &str = "credhub-ref";

/// One bound service instance, kept as the raw JSON object so it round-trips
/// unchanged through the interpolate endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceInstance(pub Map<String, Value>);

impl ServiceInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Binding credentials pointing at a CredHub credential.
    pub fn with_credential_reference(self, name: &CredentialName) -> Self {
        let mut credentials = Map::new();
        credentials.insert(CREDHUB_REF_KEY.to_string(), Value::from(name.name()));
        self.with_field("credentials", credentials)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn label(&self) -> Option<&str> {
        self.str_field("label")
    }

    pub fn plan(&self) -> Option<&str> {
        self.str_field("plan")
    }

    pub fn tags(&self) -> Vec<&str> {
        self.0
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn credentials(&self) -> Option<&Map<String, Value>> {
        self.0.get("credentials").and_then(Value::as_object)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The CredHub reference in this binding's credentials, if any.
    pub fn credential_reference(&self) -> Option<&str> {
        self.credentials()?.get(CREDHUB_REF_KEY).and_then(Value::as_str)
    }
}

/// Service label to bound instances, the shape of `VCAP_SERVICES`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServicesData(pub BTreeMap<String, Vec<ServiceInstance>>);

impl ServicesData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `VCAP_SERVICES`. An unset or empty variable yields empty data.
    pub fn from_env() -> Result<Self> {
        match std::env::var(VCAP_SERVICES_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| {
            CredHubError::invalid_argument("services", format!("invalid service data: {}", e))
        })
    }

    pub fn with_instance(mut self, label: impl Into<String>, instance: ServiceInstance) -> Self {
        self.0.entry(label.into()).or_default().push(instance);
        self
    }

    pub fn services(&self) -> &BTreeMap<String, Vec<ServiceInstance>> {
        &self.0
    }

    pub fn instances(&self, label: &str) -> &[ServiceInstance] {
        self.0.get(label).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Names referenced through `credhub-ref`, in label order.
    pub fn credential_references(&self) -> Vec<CredentialName> {
        self.0
            .values()
            .flatten()
            .filter_map(ServiceInstance::credential_reference)
            .filter_map(|r| CredentialName::new(r).ok())
            .collect()
    }

    pub fn has_credential_references(&self) -> bool {
        self.0.values().flatten().any(|i| i.credential_reference().is_some())
    }
}
