//! # Authentication: the session provider contract
//!
//! The client never issues or validates tokens itself. Everything it needs
//! from the identity provider goes through [`SessionProvider`]:
//!
//! | Operation | Fails with |
//! |-----------|-----------|
//! | [`current_session`](SessionProvider::current_session) | [`AuthError::NoSession`] |
//! | [`current_authenticated_user`](SessionProvider::current_authenticated_user) | [`AuthError::NoSession`] |
//! | [`sign_up`](SessionProvider::sign_up) | [`AuthError::SignUp`] |
//! | [`confirm_sign_up`](SessionProvider::confirm_sign_up) | [`AuthError::Confirm`] |
//! | [`sign_in`](SessionProvider::sign_in) | [`AuthError::SignIn`] |
//! | [`sign_out`](SessionProvider::sign_out) | [`AuthError::SignOut`] |
//!
//! Callers treat any failure of the two `current_*` lookups as "not signed
//! in", never as fatal.
//!
//! [`CognitoSession`] implements the contract against an AWS Cognito user
//! pool; `configure` is its constructor.

mod claims;
mod cognito;
mod config;

#[cfg(any(test, feature = "testing"))]
pub use claims::unsigned_token;
pub use claims::user_from_id_token;
pub use cognito::CognitoSession;
pub use config::CognitoConfig;

use std::future::Future;

use store::Session;

use crate::error::AuthError;
use crate::models::{AuthUser, UserAttribute};

/// Async trait for the hosted identity provider.
pub trait SessionProvider {
    fn current_session(&self) -> impl Future<Output = Result<Session, AuthError>>;

    fn current_authenticated_user(&self) -> impl Future<Output = Result<AuthUser, AuthError>>;

    fn sign_up(
        &self,
        username: &str,
        password: &str,
        attributes: &[UserAttribute],
    ) -> impl Future<Output = Result<(), AuthError>>;

    fn confirm_sign_up(
        &self,
        username: &str,
        code: &str,
    ) -> impl Future<Output = Result<(), AuthError>>;

    fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthUser, AuthError>>;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>>;
}
