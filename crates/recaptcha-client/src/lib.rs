//! Server-side verification of reCAPTCHA challenge tokens.

mod client;
mod error;
mod types;

pub use client::{RecaptchaClient, SITEVERIFY_PATH};
pub use error::RecaptchaError;
pub use types::Verification;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> RecaptchaClient {
        RecaptchaClient::new("test-secret", mock_server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_verify_success() {
        let mock_server = MockServer::start().await;

        let response_body = serde_json::json!({
            "success": true,
            "challenge_ts": "2024-09-01T12:00:00Z",
            "hostname": "example.com"
        });

        Mock::given(method("POST"))
            .and(path(SITEVERIFY_PATH))
            .and(body_string_contains("secret=test-secret"))
            .and(body_string_contains("response=token-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let verification = client.verify("token-abc", None).await.unwrap();

        assert!(verification.success);
        assert_eq!(verification.hostname.as_deref(), Some("example.com"));
        assert!(verification.error_codes.is_empty());
    }

    #[tokio::test]
    async fn test_verify_failed_challenge() {
        let mock_server = MockServer::start().await;

        let response_body = serde_json::json!({
            "success": false,
            "error-codes": ["invalid-input-response"]
        });

        Mock::given(method("POST"))
            .and(path(SITEVERIFY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let verification = client.verify("stale-token", None).await.unwrap();

        assert!(!verification.success);
        assert_eq!(verification.error_codes, vec!["invalid-input-response"]);
    }

    #[tokio::test]
    async fn test_verify_forwards_remote_ip() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SITEVERIFY_PATH))
            .and(body_string_contains("remoteip=203.0.113.9"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let verification = client.verify("token-abc", Some("203.0.113.9")).await.unwrap();
        assert!(verification.success);
    }

    #[tokio::test]
    async fn test_verify_empty_token_skips_network() {
        // No mocks mounted: an outgoing request would fail the test anyway.
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        let result = client.verify("", None).await;
        assert!(matches!(result, Err(RecaptchaError::EmptyToken)));

        let result = client.verify("   ", None).await;
        assert!(matches!(result, Err(RecaptchaError::EmptyToken)));
    }

    #[tokio::test]
    async fn test_verify_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SITEVERIFY_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.verify("token-abc", None).await;

        match result {
            Err(RecaptchaError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "service unavailable");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
