//! HTTP client for the hosted waiting-list table.

use crate::error::StoreError;
use crate::types::{RestErrorBody, WaitingListRow, UNIQUE_VIOLATION};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the waiting-list table exposed over the hosted database's
/// REST surface.
///
/// The API key is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output. Duplicate emails are reported as a
/// distinct [`StoreError::Duplicate`] so callers never have to match on
/// the backend's numeric error codes.
#[derive(Clone)]
pub struct WaitlistClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    table: String,
}

impl WaitlistClient {
    /// Create a new waiting-list client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: SecretString::new(api_key.into()),
            table: table.into(),
        })
    }

    /// Get the configured table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Check if the table route is reachable.
    pub async fn health_check(&self) -> bool {
        self.client
            .head(self.table_url())
            .header("apikey", self.api_key.expose_secret().as_str())
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Insert a single email into the waiting-list table.
    ///
    /// The table's only invariant is email uniqueness, enforced remotely:
    /// a rejected write carrying the unique-violation code (or the 409 the
    /// REST layer maps it to) comes back as [`StoreError::Duplicate`].
    #[instrument(skip(self, email))]
    pub async fn insert(&self, email: &str) -> Result<(), StoreError> {
        let row = WaitingListRow::new(email);

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", self.api_key.expose_secret().as_str())
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(table = %self.table, "waiting list insert accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%status, body = %body, "waiting list insert rejected");

        if let Ok(rest_error) = serde_json::from_str::<RestErrorBody>(&body) {
            if rest_error.code.as_deref() == Some(UNIQUE_VIOLATION) {
                return Err(StoreError::Duplicate);
            }
            if status == StatusCode::CONFLICT {
                return Err(StoreError::Duplicate);
            }
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: rest_error.message.unwrap_or(body),
            });
        }

        if status == StatusCode::CONFLICT {
            return Err(StoreError::Duplicate);
        }

        Err(StoreError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}
