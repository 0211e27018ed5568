use httpmock::prelude::*;
use inspect_domain::{LookupRequest, RemoteLookup};
use inspect_lookup::{HttpLookupClient, LookupError};
use std::time::Duration;

fn request(domain: &str) -> LookupRequest {
    LookupRequest {
        domain: domain.to_string(),
        client_ip: "203.0.113.7".parse().unwrap(),
    }
}

#[tokio::test]
async fn test_classify_posts_domain_and_ip() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/classify")
            .json_body(serde_json::json!({
                "domain": "casino.example",
                "client_ip": "203.0.113.7"
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"classification": "blacklist"}));
    });

    let client = HttpLookupClient::new(server.base_url()).unwrap();
    let response = client.classify(request("casino.example")).await.unwrap();

    mock.assert();
    assert_eq!(response.classification, "blacklist");
}

#[tokio::test]
async fn test_unknown_classification_is_passed_through() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/classify");
        then.status(200)
            .json_body(serde_json::json!({"classification": "greylist"}));
    });

    let client = HttpLookupClient::new(server.base_url()).unwrap();
    let response = client.classify(request("odd.example")).await.unwrap();
    assert_eq!(response.classification, "greylist");
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/classify");
        then.status(503).body("maintenance");
    });

    let client = HttpLookupClient::new(server.base_url()).unwrap();
    let result = client.classify(request("example.com")).await;

    match result {
        Err(LookupError::Status { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/classify");
        then.status(200).body("{\"verdict\": 1}");
    });

    let client = HttpLookupClient::new(server.base_url()).unwrap();
    let result = client.classify(request("example.com")).await;
    assert!(matches!(result, Err(LookupError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/classify");
        then.status(502);
    });

    let client = HttpLookupClient::new(server.base_url())
        .unwrap()
        .with_max_attempts(3);
    let result = client.classify(request("example.com")).await;

    assert!(matches!(result, Err(LookupError::Status { status: 502, .. })));
    mock.assert_hits(3);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/classify");
        then.status(400);
    });

    let client = HttpLookupClient::new(server.base_url())
        .unwrap()
        .with_max_attempts(3);
    let result = client.classify(request("example.com")).await;

    assert!(result.is_err());
    mock.assert_hits(1);
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/classify");
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(serde_json::json!({"classification": "whitelist"}));
    });

    let client =
        HttpLookupClient::with_timeout(server.base_url(), Duration::from_millis(100)).unwrap();
    let result = client.classify(request("example.com")).await;
    assert!(matches!(result, Err(LookupError::Timeout)));
}
