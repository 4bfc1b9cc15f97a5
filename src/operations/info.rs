//! Server metadata.

use tracing::instrument;

use crate::errors::Result;
use crate::http::HttpClient;
use crate::info::{ServerInfo, VersionInfo};

#[derive(Debug, Clone, Copy)]
pub struct InfoOperations<'a> {
    http: &'a HttpClient,
}

impl<'a> InfoOperations<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    #[instrument(skip(self))]
    pub async fn version(&self) -> Result<VersionInfo> {
        self.http.get_json(&["version"], &[]).await
    }

    #[instrument(skip(self))]
    pub async fn server_info(&self) -> Result<ServerInfo> {
        self.http.get_json(&["info"], &[]).await
    }
}
