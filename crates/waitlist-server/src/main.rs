//! Waiting-list signup service - entry point.

use recaptcha_client::RecaptchaClient;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waitlist_server::api::{create_router_with_rate_limit, AppState, RateLimitState};
use waitlist_server::config::Config;
use waitlist_server::page;
use waitlist_store::WaitlistClient;

// Both external calls run to completion under this bound, so a stalled
// provider cannot wedge a signup attempt.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting waiting-list signup service");

    // Initialize the waiting-list table client
    let store = match WaitlistClient::new(
        config.store.url.clone(),
        config.store.api_key.clone(),
        config.store.table.clone(),
        HTTP_TIMEOUT,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create store client: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize the challenge verification client
    let captcha = match RecaptchaClient::new(
        config.captcha.secret.clone(),
        config.captcha.verify_url.clone(),
        HTTP_TIMEOUT,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create challenge verification client: {}", e);
            std::process::exit(1);
        }
    };

    // Render the landing page once; it only changes with configuration
    let landing_html = page::render(&config.page, &config.captcha);

    // Create application state
    let state = AppState::new(store, captcha, landing_html);

    // Create rate limiter from config
    let rate_limit = RateLimitState::new(config.rate_limit.global_per_minute);

    // Create router with rate limiting
    let app = create_router_with_rate_limit(state, rate_limit);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
