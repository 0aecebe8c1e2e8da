//! Waiting-list signup service.
//!
//! Serves a single-page landing site whose one functional feature is the
//! email waiting-list form: validate the address, verify the bot-check
//! challenge token, and write the email to the hosted `waiting_list` table,
//! reporting success/duplicate/error back to the page's modal.

pub mod api;
pub mod config;
pub mod error;
pub mod page;
pub mod signup;

pub use config::Config;
pub use error::SignupError;
pub use signup::{SignupController, SignupOutcome, SubmissionState};
