//! Static landing page rendering.
//!
//! The page is rendered once at startup from a template with the configured
//! document metadata and the challenge widget's site key baked in.

use crate::config::{CaptchaConfig, PageConfig};

const LANDING_TEMPLATE: &str = include_str!("../templates/landing.html");

/// Render the landing page HTML.
pub fn render(page: &PageConfig, captcha: &CaptchaConfig) -> String {
    LANDING_TEMPLATE
        .replace("{{title}}", &escape(&page.title))
        .replace("{{description}}", &escape(&page.description))
        .replace("{{keywords}}", &escape(&page.keywords))
        .replace("{{headline}}", &escape(&page.headline))
        .replace("{{tagline}}", &escape(&page.tagline))
        .replace("{{site_key}}", &escape(&captcha.site_key))
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
