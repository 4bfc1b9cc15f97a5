//! Server info tests

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use super::support::{bearer, start};

#[tokio::test]
async fn test_version() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "2.12.74" })))
        .expect(1)
        .mount(&server)
        .await;

    let version = client.info().version().await.unwrap();
    assert_eq!(version.version, "2.12.74");
    assert_eq!(version.major(), Some(2));
}

#[tokio::test]
async fn test_server_info() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "auth-server": { "url": "https://uaa.service.cf.internal:8443" },
            "app": { "name": "CredHub" }
        })))
        .mount(&server)
        .await;

    let info = client.info().server_info().await.unwrap();
    assert_eq!(info.auth_server.url, "https://uaa.service.cf.internal:8443");
    assert_eq!(info.app.name, "CredHub");
}

#[tokio::test]
async fn test_requests_carry_user_agent_and_accept() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "2.12.74" })))
        .mount(&server)
        .await;

    client.info().version().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let user_agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert_eq!(user_agent, credhub::http::USER_AGENT);
}

#[tokio::test]
async fn test_info_errors_preserve_status() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_token",
            "error_description": "Access token expired"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client.info().version().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), Some("Access token expired"));

    let err = client.info().server_info().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.message().is_none());
}
