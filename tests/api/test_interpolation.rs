//! Interpolation façade tests

use credhub::interpolation::ServicesData;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use super::support::start;

#[tokio::test]
async fn test_interpolate_service_data() {
    let (server, client) = start().await;

    let request = json!({
        "p-mysql": [{
            "name": "orders-db",
            "label": "p-mysql",
            "credentials": { "credhub-ref": "/c/p-mysql/orders-db/abc/credentials" }
        }]
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/interpolate"))
        .and(body_json(request.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "p-mysql": [{
                "name": "orders-db",
                "label": "p-mysql",
                "credentials": { "username": "orders", "password": "s3cret", "port": 3306 }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let services: ServicesData = serde_json::from_value(request).unwrap();
    assert!(services.has_credential_references());

    let resolved = client.interpolation().interpolate_service_data(&services).await.unwrap();
    let mysql = &resolved.instances("p-mysql")[0];
    assert!(!resolved.has_credential_references());
    let credentials = mysql.credentials().unwrap();
    assert_eq!(mysql.name(), Some("orders-db"));
    assert_eq!(credentials.get("password"), Some(&json!("s3cret")));
    assert_eq!(credentials.get("port"), Some(&json!(3306)));
}

#[tokio::test]
async fn test_interpolate_empty_services() {
    let (server, client) = start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/interpolate"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let resolved =
        client.interpolation().interpolate_service_data(&ServicesData::new()).await.unwrap();
    assert!(resolved.is_empty());
}

#[tokio::test]
async fn test_interpolate_missing_reference() {
    let (server, client) = start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/interpolate"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "The request could not be completed because the credential does not exist or you do not have sufficient authorization."
        })))
        .mount(&server)
        .await;

    let services = ServicesData::from_json(
        r#"{"svc": [{"credentials": {"credhub-ref": "/c/missing"}}]}"#,
    )
    .unwrap();
    let err = client.interpolation().interpolate_service_data(&services).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}
