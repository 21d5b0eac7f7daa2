//! Error types shared by the session provider and the todo client.

use thiserror::Error;

/// Fallback text when an error response carries no usable message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// The request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("network error: {0}")]
pub struct TransportError(pub String);

/// Failures reported by a [`crate::auth::SessionProvider`].
///
/// `NoSession` is not a user-facing failure; callers route to sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no current session")]
    NoSession,
    #[error("{0}")]
    SignUp(String),
    #[error("{0}")]
    Confirm(String),
    #[error("{0}")]
    SignIn(String),
    #[error("{0}")]
    SignOut(String),
}

/// Failures reported by [`crate::TodoClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No usable session; the caller must sign the user out.
    #[error("Authentication required")]
    AuthRequired,
    #[error("To-Do task cannot be empty.")]
    EmptyTask,
    #[error("{status} {message}")]
    Request { status: u16, message: String },
    #[error(transparent)]
    Network(#[from] TransportError),
    #[error("unexpected response body: {0}")]
    Decode(String),
}
