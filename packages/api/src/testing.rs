//! In-memory doubles for [`Transport`] and [`SessionProvider`].
//!
//! Both record every call so tests can assert on exactly what went over the
//! wire and how often the user was signed out. Clones share state.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::json;
use store::Session;

use crate::auth::{unsigned_token, SessionProvider};
use crate::error::{AuthError, TransportError};
use crate::models::{AuthUser, UserAttribute};
use crate::transport::{HttpRequest, HttpResponse, Transport};

#[derive(Debug, Default)]
struct Recorded {
    requests: Vec<HttpRequest>,
    responses: VecDeque<Result<HttpResponse, TransportError>>,
}

/// Transport that replays queued responses and records requests.
///
/// With nothing queued it answers `200 []`, which is a valid empty todo list.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered request.
    pub fn respond(&self, status: u16, body: &str) {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a network failure for the next unanswered request.
    pub fn fail(&self, message: &str) {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(Err(TransportError(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request);
        inner
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "[]")))
    }
}

#[derive(Debug, Default)]
struct FakeAuth {
    signed_in: Option<(Session, AuthUser)>,
    sign_up_error: Option<String>,
    confirm_error: Option<String>,
    sign_in_error: Option<String>,
    sign_out_error: Option<String>,
    calls: Vec<String>,
    sign_outs: usize,
}

/// Session provider that accepts every credential unless told to fail.
#[derive(Clone, Debug, Default)]
pub struct FakeSessionProvider {
    inner: Arc<Mutex<FakeAuth>>,
}

fn session_for(email: &str) -> (Session, AuthUser) {
    let id_token = unsigned_token(&json!({ "email": email, "cognito:username": email }));
    let session = Session {
        id_token,
        access_token: format!("access-{email}"),
        refresh_token: None,
        expires_at: i64::MAX,
    };
    let user = AuthUser {
        username: email.to_string(),
        email: Some(email.to_string()),
    };
    (session, user)
}

impl FakeSessionProvider {
    /// A provider with no current session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that already holds a session for `email`.
    pub fn signed_in(email: &str) -> Self {
        let provider = Self::new();
        provider.inner.lock().unwrap().signed_in = Some(session_for(email));
        provider
    }

    /// Drop the current session, as if the tokens had been revoked.
    pub fn expire(&self) {
        self.inner.lock().unwrap().signed_in = None;
    }

    pub fn fail_sign_up(&self, message: &str) {
        self.inner.lock().unwrap().sign_up_error = Some(message.to_string());
    }

    pub fn fail_confirm(&self, message: &str) {
        self.inner.lock().unwrap().confirm_error = Some(message.to_string());
    }

    pub fn fail_sign_in(&self, message: &str) {
        self.inner.lock().unwrap().sign_in_error = Some(message.to_string());
    }

    pub fn fail_sign_out(&self, message: &str) {
        self.inner.lock().unwrap().sign_out_error = Some(message.to_string());
    }

    /// Token currently handed out by `current_session`.
    pub fn token(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .signed_in
            .as_ref()
            .map(|(s, _)| s.id_token.clone())
    }

    /// Every mutating call, in order (`"sign_up:a@b.com"`, `"sign_out"`, ...).
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn sign_out_count(&self) -> usize {
        self.inner.lock().unwrap().sign_outs
    }
}

impl SessionProvider for FakeSessionProvider {
    async fn current_session(&self) -> Result<Session, AuthError> {
        let inner = self.inner.lock().unwrap();
        inner
            .signed_in
            .as_ref()
            .map(|(s, _)| s.clone())
            .ok_or(AuthError::NoSession)
    }

    async fn current_authenticated_user(&self) -> Result<AuthUser, AuthError> {
        let inner = self.inner.lock().unwrap();
        inner
            .signed_in
            .as_ref()
            .map(|(_, u)| u.clone())
            .ok_or(AuthError::NoSession)
    }

    async fn sign_up(
        &self,
        username: &str,
        _password: &str,
        _attributes: &[UserAttribute],
    ) -> Result<(), AuthError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("sign_up:{username}"));
        match inner.sign_up_error.clone() {
            Some(message) => Err(AuthError::SignUp(message)),
            None => Ok(()),
        }
    }

    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), AuthError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("confirm:{username}:{code}"));
        match inner.confirm_error.clone() {
            Some(message) => Err(AuthError::Confirm(message)),
            None => Ok(()),
        }
    }

    async fn sign_in(&self, username: &str, _password: &str) -> Result<AuthUser, AuthError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("sign_in:{username}"));
        if let Some(message) = inner.sign_in_error.clone() {
            return Err(AuthError::SignIn(message));
        }
        let (session, user) = session_for(username);
        inner.signed_in = Some((session, user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push("sign_out".to_string());
        if let Some(message) = inner.sign_out_error.clone() {
            return Err(AuthError::SignOut(message));
        }
        inner.sign_outs += 1;
        inner.signed_in = None;
        Ok(())
    }
}
