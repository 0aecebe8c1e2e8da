//! Siteverify HTTP client.

use crate::error::RecaptchaError;
use crate::types::Verification;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Path of the verification endpoint, relative to the provider base URL.
pub const SITEVERIFY_PATH: &str = "/recaptcha/api/siteverify";

/// Client for server-side verification of challenge response tokens.
///
/// The shared secret is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output.
#[derive(Clone)]
pub struct RecaptchaClient {
    client: Client,
    base_url: String,
    secret: SecretString,
}

impl RecaptchaClient {
    /// Create a new verification client.
    pub fn new(
        secret: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RecaptchaError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            secret: SecretString::new(secret.into()),
        })
    }

    /// Verify a challenge response token.
    ///
    /// Empty tokens are rejected locally without a network call; the
    /// provider would only answer `missing-input-response` anyway.
    #[instrument(skip(self, token))]
    pub async fn verify(
        &self,
        token: &str,
        remote_ip: Option<&str>,
    ) -> Result<Verification, RecaptchaError> {
        if token.trim().is_empty() {
            return Err(RecaptchaError::EmptyToken);
        }

        let mut params = vec![
            ("secret", self.secret.expose_secret().as_str()),
            ("response", token),
        ];
        if let Some(ip) = remote_ip {
            params.push(("remoteip", ip));
        }

        let response = self
            .client
            .post(format!("{}{}", self.base_url, SITEVERIFY_PATH))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "siteverify request failed");

            return Err(RecaptchaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let verification: Verification = response.json().await?;
        debug!(
            success = verification.success,
            error_codes = ?verification.error_codes,
            "challenge token verified"
        );

        Ok(verification)
    }
}
