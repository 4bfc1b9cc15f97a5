//! OAuth2 client-credentials tests

use std::sync::Arc;

use credhub::http::{ClientCredentialsTokenProvider, TokenProvider};
use credhub::{CredHubClient, CredHubError, CredHubProperties, OAuth2Properties};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn oauth2_properties(server: &MockServer) -> OAuth2Properties {
    OAuth2Properties::new(format!("{}/oauth/token", server.uri()), "credhub_client", "secret")
}

fn oauth2_client(server: &MockServer) -> CredHubClient {
    let properties =
        CredHubProperties::new(server.uri()).with_oauth2(oauth2_properties(server));
    CredHubClient::new(&properties).unwrap()
}

async fn mount_version(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/version"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "2.12.74" })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_token_is_fetched_once_and_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header_exists("authorization"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "uaa-token",
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_version(&server, "uaa-token").await;

    let client = oauth2_client(&server);
    client.info().version().await.unwrap();
    client.info().version().await.unwrap();
}

#[tokio::test]
async fn test_token_without_expiry_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "short-lived" })),
        )
        .expect(2)
        .mount(&server)
        .await;
    mount_version(&server, "short-lived").await;

    let client = oauth2_client(&server);
    client.info().version().await.unwrap();
    client.info().version().await.unwrap();
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "uaa-token",
            "expires_in": 3600
        })))
        .expect(2)
        .mount(&server)
        .await;

    let provider = ClientCredentialsTokenProvider::new(reqwest::Client::new(), oauth2_properties(&server));
    assert_eq!(provider.access_token().await.unwrap().expose_secret(), "uaa-token");
    assert_eq!(provider.access_token().await.unwrap().expose_secret(), "uaa-token");
    provider.invalidate().await;
    provider.access_token().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_callers_share_one_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "uaa-token", "expires_in": 3600 }))
                .set_delay(std::time::Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = Arc::new(ClientCredentialsTokenProvider::new(
        reqwest::Client::new(),
        oauth2_properties(&server),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move { provider.access_token().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().expose_secret(), "uaa-token");
    }
}

#[tokio::test]
async fn test_rejected_client_fails_before_credhub_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "unauthorized",
            "error_description": "Bad credentials"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = oauth2_client(&server).info().version().await.unwrap_err();
    match err {
        CredHubError::Authentication(message) => assert!(message.contains("Bad credentials")),
        other => panic!("expected authentication error, got {:?}", other),
    }
}

#[test]
fn test_missing_secret_is_a_config_error() {
    let properties = CredHubProperties::new("https://credhub.example.com:8844")
        .with_oauth2(OAuth2Properties::new("https://uaa.example.com/oauth/token", "client", ""));
    assert!(matches!(CredHubClient::new(&properties), Err(CredHubError::Config(_))));
}
