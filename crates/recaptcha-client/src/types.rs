//! Wire types for the siteverify endpoint.

use serde::Deserialize;

/// Result of verifying a challenge response token.
#[derive(Debug, Clone, Deserialize)]
pub struct Verification {
    /// Whether the token was issued for a passed challenge.
    pub success: bool,

    /// Timestamp of the challenge load (ISO 8601).
    #[serde(default)]
    pub challenge_ts: Option<String>,

    /// Hostname of the site where the challenge was solved.
    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}
