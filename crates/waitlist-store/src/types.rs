//! Wire types for the hosted table's REST surface.

use serde::{Deserialize, Serialize};

/// Postgres unique-constraint violation, as surfaced in REST error bodies.
pub const UNIQUE_VIOLATION: &str = "23505";

/// A waiting-list row. The table carries a single column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaitingListRow {
    pub email: String,
}

impl WaitingListRow {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Error body returned by the REST layer on rejected writes.
#[derive(Debug, Clone, Deserialize)]
pub struct RestErrorBody {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub details: Option<String>,

    #[serde(default)]
    pub hint: Option<String>,
}
