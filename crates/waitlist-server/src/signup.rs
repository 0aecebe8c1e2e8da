//! Signup submission state machine.
//!
//! One controller instance covers one signup attempt: validate the entered
//! email, run the bot-check challenge, issue a single insert, and fold the
//! result into modal state. Collaborators are injected through the
//! [`ChallengeProvider`] and [`SubscriberStore`] traits so the machine is
//! testable without network or environment access. Failures never propagate
//! past the controller; every branch terminates in a visible modal.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// User-facing modal messages. Exact wording is part of the contract.
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const MSG_CHALLENGE_FAILED: &str = "Please complete the reCAPTCHA.";
pub const MSG_SUBSCRIBED: &str = "Successfully added to the waiting list!";
pub const MSG_DUPLICATE: &str = "This email is already on the waiting list.";
pub const MSG_STORE_FAILURE: &str = "An error occurred. Please try again later.";

// Local-part/domain grammar: dotted atoms or a quoted local part, and a
// dotted domain or a bracketed IPv4 literal. Matched case-insensitively by
// lowercasing first.
static EMAIL_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email grammar is a valid regex")
});

/// Check an entered email against the address grammar.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_GRAMMAR.is_match(&email.to_lowercase())
}

/// Lifecycle of a signup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    AwaitingChallenge,
    Submitting,
    Completed,
}

/// One-shot feedback dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal {
    pub visible: bool,
    pub message: String,
}

/// Terminal classification of a signup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Subscribed,
    InvalidEmail,
    ChallengeFailed,
    Duplicate,
    StoreFailure,
}

/// Typed classification of a failed insert. Backend error codes never
/// leak past the store boundary.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    #[error("email already on the waiting list")]
    Duplicate,

    #[error("{0}")]
    Other(String),
}

/// Bot-check challenge collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChallengeProvider: Send + Sync {
    /// Runs the challenge once. Single-shot, no retries; `None` means the
    /// challenge failed or yielded nothing usable.
    async fn execute(&self) -> Option<String>;
}

/// Waiting-list write collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn insert(&self, email: &str) -> Result<(), InsertError>;
}

/// Controller for a single signup attempt.
pub struct SignupController<C, S> {
    email: String,
    state: SubmissionState,
    modal: Modal,
    challenge: C,
    store: S,
}

impl<C, S> SignupController<C, S>
where
    C: ChallengeProvider,
    S: SubscriberStore,
{
    /// Create a controller for the entered email.
    pub fn new(email: impl Into<String>, challenge: C, store: S) -> Self {
        Self {
            email: email.into(),
            state: SubmissionState::Idle,
            modal: Modal::default(),
            challenge,
            store,
        }
    }

    /// The entered email. Cleared on successful subscription, preserved on
    /// every failure branch.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// True while a challenge or insert is in flight. The submit button is
    /// disabled during this window, so each attempt is single-flight.
    pub fn is_submitting(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::AwaitingChallenge | SubmissionState::Submitting
        )
    }

    /// Validate the entered email and, when it passes, run the bot-check
    /// challenge once and feed its result to [`Self::on_challenge_result`].
    ///
    /// Malformed input short-circuits to the modal without any side effect
    /// beyond UI feedback.
    pub async fn submit(&mut self) -> SignupOutcome {
        self.modal = Modal::default();
        self.state = SubmissionState::Validating;

        if !is_valid_email(&self.email) {
            debug!("rejected malformed email");
            return self.finish(MSG_INVALID_EMAIL, SignupOutcome::InvalidEmail);
        }

        self.state = SubmissionState::AwaitingChallenge;
        let token = self.challenge.execute().await;
        self.on_challenge_result(token).await
    }

    /// Handle the challenge result: a usable token leads to exactly one
    /// insert of the entered email; anything else aborts with the
    /// challenge-failed message and never reaches the store.
    pub async fn on_challenge_result(&mut self, token: Option<String>) -> SignupOutcome {
        if token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return self.finish(MSG_CHALLENGE_FAILED, SignupOutcome::ChallengeFailed);
        }

        self.state = SubmissionState::Submitting;
        match self.store.insert(&self.email).await {
            Ok(()) => {
                self.email.clear();
                self.finish(MSG_SUBSCRIBED, SignupOutcome::Subscribed)
            }
            Err(InsertError::Duplicate) => self.finish(MSG_DUPLICATE, SignupOutcome::Duplicate),
            Err(InsertError::Other(reason)) => {
                warn!(%reason, "waiting list insert failed");
                self.finish(MSG_STORE_FAILURE, SignupOutcome::StoreFailure)
            }
        }
    }

    /// Hide the modal and return to idle. Does not reset the email field;
    /// a no-op when the modal is already hidden.
    pub fn dismiss_modal(&mut self) {
        if self.modal.visible {
            self.modal.visible = false;
            self.state = SubmissionState::Idle;
        }
    }

    fn finish(&mut self, message: &str, outcome: SignupOutcome) -> SignupOutcome {
        self.modal = Modal {
            visible: true,
            message: message.to_owned(),
        };
        self.state = SubmissionState::Completed;
        outcome
    }
}
