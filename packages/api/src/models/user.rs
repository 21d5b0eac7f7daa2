//! # Signed-in user identity
//!
//! [`AuthUser`] is what the session provider reports about the current user:
//! the provider-side username and, when the user pool exposes it, the email
//! claim. [`AuthUser::display_name`] prefers the email, which is what the
//! header shows next to the sign-out button.
//!
//! [`UserAttribute`] is a name/value pair sent with a sign-up request. It
//! serialises with the `Name`/`Value` casing the user pool expects.

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub username: String,
    pub email: Option<String>,
}

impl AuthUser {
    /// Get display name, falling back to username if email is not set.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.username)
    }
}

/// Attribute attached to a new account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

impl UserAttribute {
    pub fn email(email: &str) -> Self {
        Self {
            name: "email".to_string(),
            value: email.to_string(),
        }
    }
}
