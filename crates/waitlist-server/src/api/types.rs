//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to join the waiting list.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    /// Entered email address
    pub email: String,

    /// Response token produced by the bot-check widget
    #[serde(default)]
    pub captcha_token: Option<String>,
}

/// Response after a successful signup.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub status: String,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store_reachable: bool,
}
