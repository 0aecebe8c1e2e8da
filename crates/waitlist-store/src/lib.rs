//! Client for the hosted waiting-list table (PostgREST-style insert API).

mod client;
mod error;
mod types;

pub use client::WaitlistClient;
pub use error::StoreError;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> WaitlistClient {
        WaitlistClient::new(
            mock_server.uri(),
            "test-api-key",
            "waiting_list",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/waiting_list"))
            .and(header("apikey", "test-api-key"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(header("Prefer", "return=minimal"))
            .and(body_json(serde_json::json!([{"email": "user@example.com"}])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.insert("user@example.com").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_insert_duplicate_from_unique_violation_code() {
        let mock_server = MockServer::start().await;

        let error_body = serde_json::json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"waiting_list_email_key\"",
            "details": "Key (email)=(dup@example.com) already exists.",
            "hint": null
        });

        Mock::given(method("POST"))
            .and(path("/rest/v1/waiting_list"))
            .respond_with(ResponseTemplate::new(409).set_body_json(&error_body))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.insert("dup@example.com").await;
        assert!(matches!(result, Err(StoreError::Duplicate)));
    }

    #[tokio::test]
    async fn test_insert_duplicate_detected_from_code_despite_status() {
        // Some proxies rewrite the status but keep the REST error body.
        let mock_server = MockServer::start().await;

        let error_body = serde_json::json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint"
        });

        Mock::given(method("POST"))
            .and(path("/rest/v1/waiting_list"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.insert("dup@example.com").await;
        assert!(matches!(result, Err(StoreError::Duplicate)));
    }

    #[tokio::test]
    async fn test_insert_api_error() {
        let mock_server = MockServer::start().await;

        let error_body = serde_json::json!({
            "code": "42501",
            "message": "permission denied for table waiting_list"
        });

        Mock::given(method("POST"))
            .and(path("/rest/v1/waiting_list"))
            .respond_with(ResponseTemplate::new(401).set_body_json(&error_body))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.insert("user@example.com").await;

        match result {
            Err(StoreError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert!(message.contains("permission denied"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_insert_unparseable_error_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/waiting_list"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.insert("user@example.com").await;

        match result {
            Err(StoreError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/rest/v1/waiting_list"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        // Nothing listening on this port.
        let client = WaitlistClient::new(
            "http://127.0.0.1:9",
            "test-api-key",
            "waiting_list",
            Duration::from_millis(200),
        )
        .unwrap();
        assert!(!client.health_check().await);
    }

    #[test]
    fn test_row_serialization() {
        let row = WaitingListRow::new("user@example.com");
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"email":"user@example.com"}"#);
    }
}
