//! Bot-check verification errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecaptchaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Empty challenge token")]
    EmptyToken,

    #[error("Verification API error: {status} - {message}")]
    Api { status: u16, message: String },
}
