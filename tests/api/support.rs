//! Support utilities for API integration tests

use std::sync::Arc;

use credhub::{CredHubClient, CredHubProperties, StaticTokenProvider};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-access-token";

/// Start a mock CredHub and a client pointed at it with a static bearer token
pub async fn start() -> (MockServer, CredHubClient) {
    let server = MockServer::start().await;
    let client = client_for(&server);
    (server, client)
}

pub fn client_for(server: &MockServer) -> CredHubClient {
    let properties = CredHubProperties::new(server.uri()).with_timeouts(2, 5);
    CredHubClient::new(&properties)
        .expect("client for mock server")
        .with_token_provider(Arc::new(StaticTokenProvider::new(TEST_TOKEN)))
}

pub fn bearer() -> String {
    format!("Bearer {}", TEST_TOKEN)
}

/// A stored credential version as CredHub returns it
pub fn details(name: &str, credential_type: &str, value: Value) -> Value {
    json!({
        "id": "67fc3def-bbfb-4953-83f8-4ab0682ad675",
        "name": name,
        "type": credential_type,
        "version_created_at": "2024-05-01T12:00:00Z",
        "value": value,
    })
}

pub fn data(items: Vec<Value>) -> Value {
    json!({ "data": items })
}
