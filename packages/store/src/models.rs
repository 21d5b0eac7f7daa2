//! # Domain models for todos and sessions
//!
//! Defines the records exchanged with the todo REST endpoint and the token
//! bundle persisted by a [`crate::SessionStore`]. Every type is
//! `Serialize + Deserialize` so it can be sent over the wire or written to
//! browser storage as JSON.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Todo`] | A single server-owned todo record. Field names follow the endpoint's camelCase JSON (`dueDate`, `createdAt`, ...). |
//! | [`Priority`] | Optional priority attached to a todo. Unknown values are kept verbatim in [`Priority::Other`]. |
//! | [`Session`] | The identity provider's tokens plus the absolute expiry of the ID/access tokens. |
//!
//! ## Helper functions
//!
//! - [`parse_due_date`] accepts a plain `YYYY-MM-DD` date, an RFC 3339
//!   timestamp or an offset-less ISO timestamp and returns the calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Seconds before the real expiry at which a session is treated as expired.
pub const EXPIRY_SKEW_SECS: i64 = 60;

/// A todo record as returned by the REST endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Todo {
    /// Build a bare record with only the required fields set.
    pub fn new(id: impl Into<String>, task: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            task: task.into(),
            completed,
            due_date: None,
            category: None,
            priority: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// The due date as a calendar date, if present and parseable.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_due_date)
    }
}

/// Priority of a todo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    #[serde(untagged)]
    Other(String),
}

impl Priority {
    /// Human-readable, capitalized label: `"high"` → `"High"`.
    pub fn label(&self) -> String {
        match self {
            Priority::Low => "Low".to_string(),
            Priority::Medium => "Medium".to_string(),
            Priority::High => "High".to_string(),
            Priority::Other(raw) => {
                let mut chars = raw.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Tokens issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// JWT sent as the `Authorization` header to the todo endpoint.
    pub id_token: String,
    pub access_token: String,
    /// Long-lived token used to obtain a fresh ID token once it expires.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) at which the ID and access tokens expire.
    pub expires_at: i64,
}

impl Session {
    /// Whether the tokens should be considered expired at `now` (unix seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        now + EXPIRY_SKEW_SECS >= self.expires_at
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> &str {
        &self.id_token
    }
}

/// Parse a due date sent by the server.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    // Timestamps without an offset, as written by Python's `isoformat()`
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}
