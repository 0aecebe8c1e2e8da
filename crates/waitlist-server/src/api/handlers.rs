//! HTTP request handlers.

use super::types::{HealthResponse, SubscribeRequest, SubscribeResponse};
use super::{AppState, VerifiedChallenge};
use crate::error::SignupError;
use crate::signup::{SignupController, SignupOutcome};
use axum::{extract::State, response::Html, Json};
use tracing::info;

/// Landing page.
pub async fn landing(State(state): State<AppState>) -> Html<String> {
    Html(state.landing_html.as_ref().clone())
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_reachable = state.store.health_check().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        store_reachable,
    })
}

/// Waiting-list signup.
///
/// Drives one controller run: validation, a single challenge verification,
/// and at most one insert. The response carries the same message the page's
/// modal shows.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, SignupError> {
    info!("signup request received");

    let challenge = VerifiedChallenge::new(state.captcha.clone(), request.captcha_token);
    let mut controller = SignupController::new(request.email, challenge, state.store.clone());

    match controller.submit().await {
        SignupOutcome::Subscribed => {
            info!("email added to the waiting list");
            Ok(Json(SubscribeResponse {
                status: "subscribed".to_string(),
                message: controller.modal().message.clone(),
            }))
        }
        SignupOutcome::InvalidEmail => Err(SignupError::InvalidEmail),
        SignupOutcome::ChallengeFailed => Err(SignupError::ChallengeFailed),
        SignupOutcome::Duplicate => Err(SignupError::AlreadySubscribed),
        SignupOutcome::StoreFailure => Err(SignupError::Store),
    }
}
