//! Certificate lifecycle models for the `/api/v1/certificates` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credential::CredentialName;

/// A certificate credential and the metadata of its versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSummary {
    /// Id of the certificate credential (not of a version).
    pub id: String,
    pub name: CredentialName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_by: Option<String>,
    #[serde(default)]
    pub signs: Vec<String>,
    #[serde(default)]
    pub versions: Vec<CertificateVersion>,
}

impl CertificateSummary {
    /// The version currently marked transitional, if any.
    pub fn transitional_version(&self) -> Option<&CertificateVersion> {
        self.versions.iter().find(|v| v.transitional)
    }

    /// The version that expires first.
    pub fn earliest_expiry(&self) -> Option<DateTime<Utc>> {
        self.versions.iter().filter_map(|v| v.expiry_date).min()
    }
}

/// Metadata of one certificate version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateVersion {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub transitional: bool,
    #[serde(default)]
    pub certificate_authority: bool,
    #[serde(default)]
    pub self_signed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CertificateEnvelope {
    #[serde(default)]
    pub certificates: Vec<CertificateSummary>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CertificateRegenerateRequest {
    pub set_as_transitional: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct TransitionalVersionRequest<'a> {
    /// `null` clears the transitional flag.
    pub version: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkRegenerateRequest<'a> {
    pub signed_by: &'a CredentialName,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkRegenerateResponse {
    #[serde(default)]
    pub regenerated_credentials: Vec<CredentialName>,
}
