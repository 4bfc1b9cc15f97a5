//! Blocking client tests
//!
//! The mock server runs on its own runtime; client calls are made from plain
//! test threads.

use std::sync::Arc;

use credhub::blocking::CredHubClient;
use credhub::credential::{CredentialName, CredentialRequest, ValueCredential};
use credhub::permission::Permission;
use credhub::{CredHubError, CredHubProperties, StaticTokenProvider};
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::support::{bearer, data, details, TEST_TOKEN};

fn setup() -> (Runtime, MockServer, CredHubClient) {
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());

    let inner = credhub::CredHubClient::new(&CredHubProperties::new(server.uri()))
        .unwrap()
        .with_token_provider(Arc::new(StaticTokenProvider::new(TEST_TOKEN)));
    let client = CredHubClient::from_async(inner).unwrap();

    (runtime, server, client)
}

#[test]
fn test_blocking_write_and_read() {
    let (runtime, server, client) = setup();

    runtime.block_on(async {
        Mock::given(method("PUT"))
            .and(path("/api/v1/data"))
            .and(header("authorization", bearer().as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(details("/test/v", "value", json!("x"))),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/data"))
            .and(query_param("name", "/test/v"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(data(vec![details("/test/v", "value", json!("x"))])),
            )
            .expect(1)
            .mount(&server)
            .await;
    });

    let name = CredentialName::new("/test/v").unwrap();
    let written = client
        .credentials()
        .write(&CredentialRequest::new(name.clone(), ValueCredential::new("x")))
        .unwrap();
    let read = client.credentials().get_by_name(&name).unwrap();

    assert_eq!(written, read);
    runtime.block_on(server.verify());
}

#[test]
fn test_blocking_error_mapping() {
    let (runtime, server, client) = setup();

    runtime.block_on(
        Mock::given(method("DELETE"))
            .and(path("/api/v1/data"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "gone" })))
            .mount(&server),
    );

    let err = client
        .credentials()
        .delete_by_name(&CredentialName::new("/test/missing").unwrap())
        .unwrap_err();
    assert!(matches!(err, CredHubError::Api { status: 404, .. }));
}

#[test]
fn test_blocking_permissions() {
    let (runtime, server, client) = setup();

    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/api/v1/permissions"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server),
    );

    let name = CredentialName::new("/test/db").unwrap();
    client.permissions().add_permissions(&name, &[Permission::client("deployer").read()]).unwrap();

    let err = client.permissions().add_permissions(&name, &[]).unwrap_err();
    assert!(matches!(err, CredHubError::InvalidArgument { .. }));
    runtime.block_on(server.verify());
}

#[test]
fn test_blocking_client_is_shareable_across_threads() {
    let (runtime, server, client) = setup();

    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "2.12.74" })))
            .expect(2)
            .mount(&server),
    );

    let clone = client.clone();
    let version = std::thread::spawn(move || clone.info().version().unwrap()).join().unwrap();
    assert_eq!(version.version, "2.12.74");
    assert_eq!(client.info().version().unwrap(), version);
    runtime.block_on(server.verify());
}
