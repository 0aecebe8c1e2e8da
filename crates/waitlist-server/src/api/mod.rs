//! HTTP API for the signup service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{logging_middleware, rate_limit_middleware, RateLimitState};
pub use types::*;

use crate::signup::{ChallengeProvider, InsertError, SubscriberStore};
use async_trait::async_trait;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use recaptcha_client::RecaptchaClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};
use waitlist_store::{StoreError, WaitlistClient};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Waiting-list table client
    pub store: Arc<WaitlistClient>,
    /// Challenge verification client
    pub captcha: Arc<RecaptchaClient>,
    /// Landing page, rendered once at startup
    pub landing_html: Arc<String>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: WaitlistClient, captcha: RecaptchaClient, landing_html: String) -> Self {
        Self {
            store: Arc::new(store),
            captcha: Arc::new(captcha),
            landing_html: Arc::new(landing_html),
        }
    }
}

/// Challenge provider backed by the verification API.
///
/// The token handed over by the browser widget counts as a passed challenge
/// only once the provider confirms it server-side. Verification errors are
/// folded into a failed challenge; the attempt never hangs because the
/// underlying client carries a request timeout.
pub struct VerifiedChallenge {
    client: Arc<RecaptchaClient>,
    token: Option<String>,
}

impl VerifiedChallenge {
    pub fn new(client: Arc<RecaptchaClient>, token: Option<String>) -> Self {
        Self { client, token }
    }
}

#[async_trait]
impl ChallengeProvider for VerifiedChallenge {
    async fn execute(&self) -> Option<String> {
        let token = self.token.as_deref()?.trim();
        if token.is_empty() {
            return None;
        }

        match self.client.verify(token, None).await {
            Ok(v) if v.success => Some(token.to_owned()),
            Ok(v) => {
                debug!(error_codes = ?v.error_codes, "challenge token rejected");
                None
            }
            Err(e) => {
                warn!(error = %e, "challenge verification unavailable");
                None
            }
        }
    }
}

#[async_trait]
impl SubscriberStore for Arc<WaitlistClient> {
    async fn insert(&self, email: &str) -> Result<(), InsertError> {
        match WaitlistClient::insert(self.as_ref(), email).await {
            Ok(()) => Ok(()),
            Err(StoreError::Duplicate) => Err(InsertError::Duplicate),
            Err(e) => Err(InsertError::Other(e.to_string())),
        }
    }
}

/// Create the API router with the default rate limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_rate_limit(state, RateLimitState::new(60))
}

/// Create the API router with custom rate limiting.
pub fn create_router_with_rate_limit(state: AppState, rate_limit: RateLimitState) -> Router {
    Router::new()
        .route("/", get(handlers::landing))
        .route("/health", get(handlers::health))
        .route("/v1/waitlist", post(handlers::subscribe))
        .layer(axum_middleware::from_fn_with_state(
            rate_limit.clone(),
            rate_limit_middleware,
        ))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
