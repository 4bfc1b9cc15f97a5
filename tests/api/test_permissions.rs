//! Permission façade tests (v1 and v2)

use credhub::credential::CredentialName;
use credhub::permission::{Actor, Operation, Permission};
use credhub::CredHubError;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use super::support::start;

const APP_GUID: &str = "5c1b7dcf-7bfd-4d56-9ad4-6dcb3c0b9c1a";
const PERMISSION_UUID: &str = "1f2e3d4c-0000-4000-8000-123456789abc";

fn credential() -> CredentialName {
    CredentialName::new("/test/db").unwrap()
}

#[tokio::test]
async fn test_get_permissions() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/permissions"))
        .and(query_param("credential_name", "/test/db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "credential_name": "/test/db",
            "permissions": [
                { "actor": format!("mtls-app:{}", APP_GUID), "operations": ["read"] },
                { "actor": "uaa-user:admin", "operations": ["read", "write", "delete", "read_acl", "write_acl"] }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let permissions = client.permissions().get_permissions(&credential()).await.unwrap();
    assert_eq!(permissions.len(), 2);
    assert_eq!(permissions[0].actor, Actor::app(APP_GUID));
    assert_eq!(permissions[0].operations, vec![Operation::Read]);
    assert_eq!(permissions[1].operations.len(), 5);
}

#[tokio::test]
async fn test_add_permissions() {
    let (server, client) = start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/permissions"))
        .and(body_json(json!({
            "credential_name": "/test/db",
            "permissions": [
                { "actor": format!("mtls-app:{}", APP_GUID), "operations": ["read", "write"] }
            ]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let permission = Permission::app(APP_GUID).read().write();
    client.permissions().add_permissions(&credential(), &[permission]).await.unwrap();
}

#[tokio::test]
async fn test_add_permissions_validates_locally() {
    let (server, client) = start().await;

    let err = client.permissions().add_permissions(&credential(), &[]).await.unwrap_err();
    assert!(matches!(err, CredHubError::InvalidArgument { ref field, .. } if field == "permissions"));

    let err = client
        .permissions()
        .add_permissions(&credential(), &[Permission::user("admin")])
        .await
        .unwrap_err();
    assert!(matches!(err, CredHubError::InvalidArgument { ref field, .. } if field == "operations"));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_permission() {
    let (server, client) = start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/permissions"))
        .and(query_param("credential_name", "/test/db"))
        .and(query_param("actor", "uaa-client:deployer"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.permissions().delete_permission(&credential(), &Actor::client("deployer")).await.unwrap();
}

fn permission_details() -> serde_json::Value {
    json!({
        "uuid": PERMISSION_UUID,
        "path": "/test/*",
        "actor": "uaa-user:admin",
        "operations": ["read", "write"]
    })
}

#[tokio::test]
async fn test_v2_add_permission() {
    let (server, client) = start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/permissions"))
        .and(body_json(json!({
            "path": "/test/*",
            "actor": "uaa-user:admin",
            "operations": ["read", "write"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(permission_details()))
        .expect(1)
        .mount(&server)
        .await;

    let permission = Permission::user("admin").read().write();
    let details = client.permissions_v2().add_permission("/test/*", &permission).await.unwrap();
    assert_eq!(details.uuid, PERMISSION_UUID);
    assert_eq!(details.path, "/test/*");
}

#[tokio::test]
async fn test_v2_get_permission() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v2/permissions/{}", PERMISSION_UUID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(permission_details()))
        .mount(&server)
        .await;

    let details = client.permissions_v2().get_permission(PERMISSION_UUID).await.unwrap();
    assert_eq!(details.actor, Actor::user("admin"));
}

#[tokio::test]
async fn test_v2_get_permission_by_path_and_actor() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/permissions"))
        .and(query_param("path", "/test/*"))
        .and(query_param("actor", "uaa-user:admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(permission_details()))
        .expect(1)
        .mount(&server)
        .await;

    let details = client
        .permissions_v2()
        .get_permission_by_path_and_actor("/test/*", &Actor::user("admin"))
        .await
        .unwrap();
    assert_eq!(details.operations, vec![Operation::Read, Operation::Write]);
}

#[tokio::test]
async fn test_v2_update_permission() {
    let (server, client) = start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/v2/permissions/{}", PERMISSION_UUID)))
        .and(body_json(json!({
            "path": "/test/*",
            "actor": "uaa-user:admin",
            "operations": ["read"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": PERMISSION_UUID,
            "path": "/test/*",
            "actor": "uaa-user:admin",
            "operations": ["read"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let details = client
        .permissions_v2()
        .update_permission(PERMISSION_UUID, "/test/*", &Permission::user("admin").read())
        .await
        .unwrap();
    assert_eq!(details.operations, vec![Operation::Read]);
}

#[tokio::test]
async fn test_v2_delete_permission() {
    let (server, client) = start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/v2/permissions/{}", PERMISSION_UUID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(permission_details()))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client.permissions_v2().delete_permission(PERMISSION_UUID).await.unwrap();
    assert_eq!(deleted.uuid, PERMISSION_UUID);
}

#[tokio::test]
async fn test_v2_unknown_permission() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/permissions/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "The request could not be completed because the permission does not exist or you do not have sufficient authorization."
        })))
        .mount(&server)
        .await;

    let err = client.permissions_v2().get_permission("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_v2_validates_locally() {
    let (server, client) = start().await;

    let v2 = client.permissions_v2();
    assert!(v2.get_permission("").await.is_err());
    assert!(v2.add_permission("", &Permission::user("admin").read()).await.is_err());
    assert!(v2.add_permission("/test/*", &Permission::user("admin")).await.is_err());
    assert!(v2.update_permission(PERMISSION_UUID, " ", &Permission::user("admin").read()).await.is_err());
    assert!(v2.delete_permission("").await.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_v1_permission_errors_preserve_status() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/permissions"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "The request could not be completed because the credential does not exist or you do not have sufficient authorization."
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/permissions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "The provided operation is not supported. Valid values include read, write, delete, read_acl, and write_acl."
        })))
        .mount(&server)
        .await;

    let err = client.permissions().get_permissions(&credential()).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.message().unwrap().contains("does not exist"));

    let err = client
        .permissions()
        .add_permissions(&credential(), &[Permission::client("deployer").read()])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.message().unwrap().starts_with("The provided operation is not supported"));
}
