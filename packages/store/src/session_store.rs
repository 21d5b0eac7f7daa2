//! # Session persistence
//!
//! The identity provider keeps its tokens across page loads through a
//! [`SessionStore`]. Implementations live in sibling modules:
//! [`crate::memory`] for tests and native builds, and `local_storage` for the
//! browser.
//!
//! Stores never fail loudly: a read error is "no session" and a write error is
//! dropped. Losing a session only costs the user another sign-in.

use crate::models::Session;

/// Async trait for loading and saving the current session.
pub trait SessionStore {
    fn load(&self) -> impl std::future::Future<Output = Option<Session>>;
    fn save(&self, session: &Session) -> impl std::future::Future<Output = ()>;
    fn clear(&self) -> impl std::future::Future<Output = ()>;
}
