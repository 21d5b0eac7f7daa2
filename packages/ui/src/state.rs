//! # Application state
//!
//! [`AppState`] is the single value the whole UI renders from: which panel is
//! visible, the contents of every input, the signed-in user, the last fetched
//! todo list and the current notice. It is held in one
//! `Signal<AppState>` provided at the root and handed to the
//! [`Controller`](crate::Controller) through the [`StateCell`] seam, so the
//! same orchestration code runs against a plain `AppState` in tests.
//!
//! ## Views
//!
//! Exactly one [`View`] is visible at a time:
//!
//! ```text
//! start ──session──▶ Authenticated ──sign out──▶ SignIn
//!   └───no session─▶ SignIn ◀──switch──▶ SignUp
//!                    SignUp ──success──▶ ConfirmSignUp ──success──▶ SignIn
//!                    SignIn ──success──▶ Authenticated
//! ```

use api::AuthUser;
use dioxus::prelude::*;
use store::Todo;

use crate::notification::Notice;

/// The mutually exclusive panels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    SignUp,
    ConfirmSignUp,
    #[default]
    SignIn,
    Authenticated,
}

/// Contents of the authentication inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthForms {
    pub sign_up_email: String,
    pub sign_up_password: String,
    pub confirm_code: String,
    pub sign_in_email: String,
    pub sign_in_password: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub view: View,
    /// False until the startup session check has finished.
    pub ready: bool,
    pub forms: AuthForms,
    /// Email submitted at sign-up, kept for the confirmation step.
    pub pending_email: Option<String>,
    pub user: Option<AuthUser>,
    pub new_task: String,
    /// Result of the last successful fetch.
    pub todos: Vec<Todo>,
    pub notice: Option<Notice>,
    notice_generation: u64,
}

impl AppState {
    /// Switch to the sign-up form. Ignored once signed in.
    pub fn show_sign_up(&mut self) {
        if self.view != View::Authenticated {
            self.view = View::SignUp;
        }
    }

    /// Switch to the sign-in form. Ignored once signed in.
    pub fn show_sign_in(&mut self) {
        if self.view != View::Authenticated {
            self.view = View::SignIn;
        }
    }

    /// Sign-up accepted: ask for the verification code sent to `email`.
    pub fn enter_confirmation(&mut self, email: String) {
        self.pending_email = Some(email);
        self.forms.confirm_code.clear();
        self.view = View::ConfirmSignUp;
    }

    /// Confirmation accepted: prefill the sign-in form with the pending email.
    pub fn confirmed(&mut self) {
        self.forms.sign_in_email = self.pending_email.take().unwrap_or_default();
        self.forms.sign_in_password.clear();
        self.forms.confirm_code.clear();
        self.view = View::SignIn;
    }

    pub fn authenticated(&mut self, user: AuthUser) {
        self.user = Some(user);
        self.view = View::Authenticated;
        self.ready = true;
    }

    /// Back to the sign-in form with every input and the list cleared.
    pub fn signed_out(&mut self) {
        self.user = None;
        self.todos.clear();
        self.new_task.clear();
        self.forms = AuthForms::default();
        self.pending_email = None;
        self.view = View::SignIn;
        self.ready = true;
    }

    /// Show `text`, replacing any current notice. Returns its generation.
    pub fn notify(&mut self, text: impl Into<String>, is_error: bool) -> u64 {
        self.notice_generation += 1;
        self.notice = Some(Notice {
            text: text.into(),
            is_error,
            generation: self.notice_generation,
        });
        self.notice_generation
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Hide the notice only if it is still the one with `generation`.
    pub fn dismiss_notice(&mut self, generation: u64) {
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.generation == generation)
        {
            self.notice = None;
        }
    }
}

/// Somewhere an [`AppState`] lives.
///
/// Implementations must not hold a borrow across an `.await`; the controller
/// only touches state through short `update` calls.
pub trait StateCell {
    fn update<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R;
    fn snapshot(&self) -> AppState;
}

impl StateCell for AppState {
    fn update<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(self)
    }

    fn snapshot(&self) -> AppState {
        self.clone()
    }
}

impl StateCell for Signal<AppState> {
    fn update<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let mut state = self.write();
        f(&mut state)
    }

    fn snapshot(&self) -> AppState {
        self.read().clone()
    }
}

/// Get the application state provided by [`TodoApp`](crate::TodoApp).
pub fn use_app_state() -> Signal<AppState> {
    use_context::<Signal<AppState>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            username: "a@b.com".to_string(),
            email: Some("a@b.com".to_string()),
        }
    }

    #[test]
    fn test_default_is_sign_in_and_not_ready() {
        let state = AppState::default();
        assert_eq!(state.view, View::SignIn);
        assert!(!state.ready);
    }

    #[test]
    fn test_manual_switch_only_before_authentication() {
        let mut state = AppState::default();
        state.show_sign_up();
        assert_eq!(state.view, View::SignUp);
        state.show_sign_in();
        assert_eq!(state.view, View::SignIn);

        state.authenticated(user());
        state.show_sign_up();
        assert_eq!(state.view, View::Authenticated);
    }

    #[test]
    fn test_confirmation_prefills_sign_in() {
        let mut state = AppState::default();
        state.forms.sign_in_password = "stale".to_string();
        state.enter_confirmation("a@b.com".to_string());
        assert_eq!(state.view, View::ConfirmSignUp);
        assert_eq!(state.pending_email.as_deref(), Some("a@b.com"));

        state.forms.confirm_code = "123456".to_string();
        state.confirmed();
        assert_eq!(state.view, View::SignIn);
        assert_eq!(state.forms.sign_in_email, "a@b.com");
        assert!(state.forms.sign_in_password.is_empty());
        assert!(state.forms.confirm_code.is_empty());
        assert!(state.pending_email.is_none());
    }

    #[test]
    fn test_sign_out_clears_everything_but_the_notice() {
        let mut state = AppState::default();
        state.authenticated(user());
        state.todos = vec![Todo::new("1", "A", false)];
        state.new_task = "draft".to_string();
        state.forms.sign_up_email = "x@y.z".to_string();
        state.forms.sign_in_email = "a@b.com".to_string();
        state.forms.sign_in_password = "pw".to_string();
        state.notify("bye", false);

        state.signed_out();
        assert_eq!(state.view, View::SignIn);
        assert!(state.user.is_none());
        assert!(state.todos.is_empty());
        assert!(state.new_task.is_empty());
        assert_eq!(state.forms, AuthForms::default());
        assert_eq!(state.notice.as_ref().unwrap().text, "bye");
    }

    #[test]
    fn test_last_notice_wins() {
        let mut state = AppState::default();
        let first = state.notify("first", false);
        let second = state.notify("second", true);
        assert_ne!(first, second);

        // The timer started for the first notice must not hide the second
        state.dismiss_notice(first);
        let notice = state.notice.as_ref().unwrap();
        assert_eq!(notice.text, "second");
        assert!(notice.is_error);

        state.dismiss_notice(second);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_clear_notice() {
        let mut state = AppState::default();
        state.notify("x", false);
        state.clear_notice();
        assert!(state.notice.is_none());
    }
}
