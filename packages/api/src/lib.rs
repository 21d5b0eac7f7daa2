//! # API crate: identity provider and todo endpoint clients
//!
//! This crate holds everything the todo client says to the outside world. It
//! has no UI code; the `ui` crate drives it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | The [`SessionProvider`] contract and [`CognitoSession`], its Cognito user-pool implementation |
//! | [`error`] | [`AuthError`], [`ApiError`] and [`TransportError`] |
//! | [`models`] | [`AuthUser`] and sign-up [`UserAttribute`]s |
//! | [`todos`] | [`TodoClient`], the authenticated REST client for the todo resource |
//! | [`transport`] | The [`Transport`] seam and its `reqwest` implementation |
//! | `testing` | Recording fakes for both seams (feature `testing`) |
//!
//! ## Async traits
//!
//! [`SessionProvider`] and [`Transport`] return plain `impl Future` without a
//! `Send` bound. In the browser everything runs on one thread, and the same
//! futures are driven by a current-thread runtime in tests.

pub mod auth;
pub mod error;
pub mod models;
pub mod todos;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use auth::{CognitoConfig, CognitoSession, SessionProvider};
pub use error::{ApiError, AuthError, TransportError};
pub use models::{AuthUser, UserAttribute};
pub use todos::TodoClient;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
