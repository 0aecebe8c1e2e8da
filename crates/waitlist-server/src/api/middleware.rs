//! Rate limiting and request logging middleware.

use crate::error::SignupError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc};
use tracing::{debug, warn};

/// Global rate limiter (not keyed by IP).
pub type GlobalLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across requests.
///
/// The browser disables its submit button while a signup is in flight; this
/// limiter is the server-side bound on how fast attempts can arrive overall.
#[derive(Clone)]
pub struct RateLimitState {
    pub global: Arc<GlobalLimiter>,
}

impl RateLimitState {
    /// Create a new rate limit state allowing the given requests per minute.
    pub fn new(requests_per_minute: u32) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::new(60).unwrap()),
        );

        Self {
            global: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Create a permissive rate limiter for testing.
    pub fn permissive() -> Self {
        Self::new(10_000)
    }
}

/// Rate limiting middleware. Returns 429 when the global quota is spent.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, SignupError> {
    if rate_limit.global.check().is_err() {
        warn!("global rate limit exceeded");
        return Err(SignupError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

/// Request logging middleware.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %uri, %status, ?duration, "request completed");
    } else {
        warn!(%method, %uri, %status, ?duration, "request failed");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_allows_within_quota() {
        let state = RateLimitState::new(10);
        assert!(state.global.check().is_ok());
    }

    #[test]
    fn test_rate_limit_exhaustion() {
        let state = RateLimitState::new(1);

        assert!(state.global.check().is_ok());
        assert!(state.global.check().is_err());
    }

    #[test]
    fn test_permissive_rate_limit() {
        let state = RateLimitState::permissive();
        for _ in 0..100 {
            assert!(state.global.check().is_ok());
        }
    }
}
