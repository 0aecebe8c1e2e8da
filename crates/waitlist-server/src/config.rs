//! Configuration for the signup service.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Hosted database configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Bot-check challenge configuration
    #[serde(default)]
    pub captcha: CaptchaConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Landing page document metadata
    #[serde(default)]
    pub page: PageConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the hosted database's REST surface
    #[serde(default = "default_store_url")]
    pub url: String,

    /// Public API key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// Table the signup form writes to
    #[serde(default = "default_store_table")]
    pub table: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptchaConfig {
    /// Base URL of the challenge provider
    #[serde(default = "default_captcha_url")]
    pub verify_url: String,

    /// Shared secret for server-side token verification
    #[serde(default)]
    pub secret: String,

    /// Site key rendered into the page's challenge widget
    #[serde(default)]
    pub site_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Static document metadata injected into the page head for
/// discoverability, plus the marketing copy shown above the form.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_page_title")]
    pub title: String,

    #[serde(default = "default_page_description")]
    pub description: String,

    #[serde(default = "default_page_keywords")]
    pub keywords: String,

    #[serde(default = "default_page_headline")]
    pub headline: String,

    #[serde(default = "default_page_tagline")]
    pub tagline: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Global requests per minute
    #[serde(default = "default_global_rpm")]
    pub global_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            api_key: String::new(),
            table: default_store_table(),
        }
    }
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            verify_url: default_captcha_url(),
            secret: String::new(),
            site_key: String::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_page_title(),
            description: default_page_description(),
            keywords: default_page_keywords(),
            headline: default_page_headline(),
            tagline: default_page_tagline(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            global_per_minute: default_global_rpm(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_store_url() -> String {
    "http://localhost:54321".into()
}

fn default_store_table() -> String {
    "waiting_list".into()
}

fn default_captcha_url() -> String {
    "https://www.google.com".into()
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_page_title() -> String {
    "Join the waiting list".into()
}

fn default_page_description() -> String {
    "Sign up for the waiting list and be the first to know when we launch.".into()
}

fn default_page_keywords() -> String {
    "waiting list, early access, launch updates".into()
}

fn default_page_headline() -> String {
    "Something new is on the way!".into()
}

fn default_page_tagline() -> String {
    "Subscribe now to get the latest updates:".into()
}

fn default_global_rpm() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
