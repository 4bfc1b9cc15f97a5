//! `credhub-ref` resolution on `/api/v1/interpolate`.

use tracing::{debug, instrument};

use crate::errors::Result;
use crate::http::HttpClient;
use crate::interpolation::ServicesData;

/// Interpolation operations
#[derive(Debug, Clone, Copy)]
pub struct InterpolationOperations<'a> {
    http: &'a HttpClient,
}

impl<'a> InterpolationOperations<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Return `services` with each `credhub-ref` replaced by the stored value.
    #[instrument(skip(self, services), fields(service_count = services.services().len()))]
    pub async fn interpolate_service_data(&self, services: &ServicesData) -> Result<ServicesData> {
        debug!(references = services.credential_references().len(), "Interpolating service data");
        self.http.post_json(&["api", "v1", "interpolate"], services).await
    }
}
