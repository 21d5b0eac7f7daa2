//! # Controller
//!
//! Every user action goes through [`Controller`]: it validates input, calls the
//! session provider or the [`TodoClient`], and writes the outcome into the
//! [`AppState`](crate::AppState) through a [`StateCell`].
//!
//! Mutations (create, toggle, rename, delete) follow one sequence: clear the
//! notice, send the request, report the result, and on success fetch the list
//! once and replace the rendered list with it. An [`ApiError::AuthRequired`]
//! from any call signs the user out exactly once and shows the session-expired
//! notice instead.
//!
//! Nothing is retried, cancelled or serialised; overlapping actions each run
//! to completion and the last list fetch to finish wins.

use api::{ApiError, SessionProvider, TodoClient, Transport, UserAttribute};

use crate::state::StateCell;

pub const MSG_MISSING_CREDENTIALS: &str = "Please enter both email and password.";
pub const MSG_MISSING_CODE: &str = "Please enter the verification code.";
pub const MSG_SIGNED_UP: &str =
    "Sign up successful! Please check your email for a verification code.";
pub const MSG_CONFIRMED: &str = "Account confirmed! You can now sign in.";
pub const MSG_SIGNED_IN: &str = "Successfully signed in!";
pub const MSG_SIGNED_OUT: &str = "You have been signed out.";
pub const MSG_SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
pub const MSG_CREATED: &str = "To-Do created successfully!";
pub const MSG_UPDATED: &str = "To-Do updated successfully!";
pub const MSG_DELETED: &str = "To-Do deleted successfully!";

/// Which mutation a result belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn success(self) -> &'static str {
        match self {
            Mutation::Create => MSG_CREATED,
            Mutation::Update => MSG_UPDATED,
            Mutation::Delete => MSG_DELETED,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Mutation::Create => "creating",
            Mutation::Update => "updating",
            Mutation::Delete => "deleting",
        }
    }
}

/// Orchestrates authentication and todo operations against an [`AppState`](crate::AppState).
pub struct Controller<P, T> {
    client: TodoClient<P, T>,
}

impl<P: SessionProvider, T: Transport> Controller<P, T> {
    pub fn new(client: TodoClient<P, T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &TodoClient<P, T> {
        &self.client
    }

    fn provider(&self) -> &P {
        self.client.session()
    }

    /// Startup check: resume an existing session or show the sign-in form.
    pub async fn bootstrap(&self, state: &mut impl StateCell) {
        match self.provider().current_authenticated_user().await {
            Ok(user) => {
                tracing::info!("Resumed session for {}", user.display_name());
                state.update(|s| s.authenticated(user));
                self.refresh(state).await;
            }
            Err(e) => {
                tracing::debug!("No session at startup: {}", e);
                state.update(|s| s.signed_out());
            }
        }
    }

    pub async fn sign_up(&self, state: &mut impl StateCell) {
        let forms = state.snapshot().forms;
        let email = forms.sign_up_email.trim().to_string();
        if email.is_empty() || forms.sign_up_password.is_empty() {
            state.update(|s| s.notify(MSG_MISSING_CREDENTIALS, true));
            return;
        }

        let attributes = [UserAttribute::email(&email)];
        match self
            .provider()
            .sign_up(&email, &forms.sign_up_password, &attributes)
            .await
        {
            Ok(()) => {
                tracing::info!("Sign-up accepted for {}", email);
                state.update(|s| {
                    s.forms.sign_up_password.clear();
                    s.enter_confirmation(email);
                    s.notify(MSG_SIGNED_UP, false);
                });
            }
            Err(e) => {
                tracing::warn!("Sign-up failed: {}", e);
                state.update(|s| s.notify(format!("Sign Up Error: {e}"), true));
            }
        }
    }

    pub async fn confirm_sign_up(&self, state: &mut impl StateCell) {
        let snapshot = state.snapshot();
        let code = snapshot.forms.confirm_code.trim().to_string();
        if code.is_empty() {
            state.update(|s| s.notify(MSG_MISSING_CODE, true));
            return;
        }
        let email = snapshot.pending_email.unwrap_or_default();

        match self.provider().confirm_sign_up(&email, &code).await {
            Ok(()) => state.update(|s| {
                s.confirmed();
                s.notify(MSG_CONFIRMED, false);
            }),
            Err(e) => {
                tracing::warn!("Confirmation failed: {}", e);
                state.update(|s| s.notify(format!("Confirmation Error: {e}"), true));
            }
        }
    }

    pub async fn sign_in(&self, state: &mut impl StateCell) {
        let forms = state.snapshot().forms;
        let email = forms.sign_in_email.trim().to_string();
        if email.is_empty() || forms.sign_in_password.is_empty() {
            state.update(|s| s.notify(MSG_MISSING_CREDENTIALS, true));
            return;
        }

        match self.provider().sign_in(&email, &forms.sign_in_password).await {
            Ok(user) => {
                tracing::info!("Signed in as {}", user.display_name());
                state.update(|s| {
                    s.forms.sign_in_password.clear();
                    s.authenticated(user);
                    s.notify(MSG_SIGNED_IN, false);
                });
                self.refresh(state).await;
            }
            Err(e) => {
                tracing::warn!("Sign-in failed: {}", e);
                state.update(|s| s.notify(format!("Sign In Error: {e}"), true));
            }
        }
    }

    pub async fn sign_out(&self, state: &mut impl StateCell) {
        match self.provider().sign_out().await {
            Ok(()) => state.update(|s| {
                s.signed_out();
                s.notify(MSG_SIGNED_OUT, false);
            }),
            Err(e) => {
                tracing::error!("Sign-out failed: {}", e);
                state.update(|s| s.notify(format!("Sign Out Error: {e}"), true));
            }
        }
    }

    /// Fetch the list and replace the rendered one with it.
    ///
    /// Leaves the current notice alone so a mutation's success message
    /// survives its refresh.
    pub async fn refresh(&self, state: &mut impl StateCell) {
        match self.client.list().await {
            Ok(todos) => {
                tracing::debug!("Fetched {} todos", todos.len());
                state.update(|s| s.todos = todos);
            }
            Err(ApiError::AuthRequired) => self.force_sign_out(state).await,
            Err(e) => {
                tracing::error!("Failed to fetch todos: {}", e);
                state.update(|s| s.notify(format!("Error fetching To-Dos: {e}"), true));
            }
        }
    }

    /// Create a todo from the new-task input.
    pub async fn create(&self, state: &mut impl StateCell) {
        let task = state.update(|s| {
            s.clear_notice();
            s.new_task.clone()
        });
        let result = self.client.create(&task).await;
        if result.is_ok() {
            state.update(|s| s.new_task.clear());
        }
        self.finish(state, Mutation::Create, result).await;
    }

    /// Flip the completed flag of the todo rendered with `completed`.
    pub async fn toggle(&self, state: &mut impl StateCell, id: &str, completed: bool) {
        state.update(|s| s.clear_notice());
        let result = self.client.update(id, completed).await;
        self.finish(state, Mutation::Update, result).await;
    }

    pub async fn rename(&self, state: &mut impl StateCell, id: &str, task: &str) {
        state.update(|s| s.clear_notice());
        let result = self.client.rename(id, task).await;
        self.finish(state, Mutation::Update, result).await;
    }

    pub async fn delete(&self, state: &mut impl StateCell, id: &str) {
        state.update(|s| s.clear_notice());
        let result = self.client.delete(id).await;
        self.finish(state, Mutation::Delete, result).await;
    }

    async fn finish(
        &self,
        state: &mut impl StateCell,
        mutation: Mutation,
        result: Result<(), ApiError>,
    ) {
        match result {
            Ok(()) => {
                state.update(|s| s.notify(mutation.success(), false));
                self.refresh(state).await;
            }
            Err(ApiError::AuthRequired) => self.force_sign_out(state).await,
            Err(e @ ApiError::EmptyTask) => {
                state.update(|s| s.notify(e.to_string(), true));
            }
            Err(e) => {
                tracing::error!("Error {} todo: {}", mutation.verb(), e);
                state.update(|s| {
                    s.notify(format!("Error {} To-Do: {e}", mutation.verb()), true)
                });
            }
        }
    }

    async fn force_sign_out(&self, state: &mut impl StateCell) {
        tracing::warn!("Session no longer valid, signing out");
        if let Err(e) = self.provider().sign_out().await {
            // The local state is reset regardless
            tracing::error!("Sign-out after expiry failed: {}", e);
        }
        state.update(|s| {
            s.signed_out();
            s.notify(MSG_SESSION_EXPIRED, true);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, View};
    use api::testing::{FakeSessionProvider, RecordingTransport};
    use api::Method;
    use serde_json::Value;

    const BASE: &str = "https://api.example.com/prod/todos";

    fn controller(
        provider: &FakeSessionProvider,
        transport: &RecordingTransport,
    ) -> Controller<FakeSessionProvider, RecordingTransport> {
        Controller::new(TodoClient::new(BASE, provider.clone(), transport.clone()))
    }

    fn signed_in_state() -> AppState {
        let mut state = AppState::default();
        state.authenticated(api::AuthUser {
            username: "a@b.com".to_string(),
            email: Some("a@b.com".to_string()),
        });
        state
    }

    fn list_calls(transport: &RecordingTransport) -> usize {
        transport
            .requests()
            .iter()
            .filter(|r| r.method == Method::Get && r.url == BASE)
            .count()
    }

    fn notice(state: &AppState) -> (String, bool) {
        let n = state.notice.as_ref().expect("notice");
        (n.text.clone(), n.is_error)
    }

    #[tokio::test]
    async fn test_end_to_end_flow() {
        let provider = FakeSessionProvider::new();
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = AppState::default();

        controller.bootstrap(&mut state).await;
        assert!(state.ready);
        assert_eq!(state.view, View::SignIn);

        state.show_sign_up();
        state.forms.sign_up_email = "a@b.com".to_string();
        state.forms.sign_up_password = "pw".to_string();
        controller.sign_up(&mut state).await;
        assert_eq!(state.view, View::ConfirmSignUp);
        assert_eq!(state.pending_email.as_deref(), Some("a@b.com"));
        assert_eq!(notice(&state), (MSG_SIGNED_UP.to_string(), false));

        state.forms.confirm_code = "123456".to_string();
        controller.confirm_sign_up(&mut state).await;
        assert_eq!(state.view, View::SignIn);
        assert_eq!(state.forms.sign_in_email, "a@b.com");
        assert!(state.forms.sign_in_password.is_empty());

        transport.respond(200, r#"[{"id":"42","task":"Buy milk","completed":false}]"#);
        state.forms.sign_in_password = "pw".to_string();
        controller.sign_in(&mut state).await;
        assert_eq!(state.view, View::Authenticated);
        assert_eq!(list_calls(&transport), 1);
        assert_eq!(state.todos.len(), 1);
        assert_eq!(state.todos[0].id, "42");

        transport.respond(200, "");
        transport.respond(200, "[]");
        controller.delete(&mut state, "42").await;

        let requests = transport.requests();
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].url, format!("{BASE}/42"));
        assert_eq!(requests[2].method, Method::Get);
        assert_eq!(list_calls(&transport), 2);
        assert!(state.todos.is_empty());
        assert_eq!(notice(&state), (MSG_DELETED.to_string(), false));

        assert_eq!(
            provider.calls(),
            vec!["sign_up:a@b.com", "confirm:a@b.com:123456", "sign_in:a@b.com"]
        );
    }

    #[tokio::test]
    async fn test_bootstrap_resumes_session() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        let transport = RecordingTransport::new();
        transport.respond(200, r#"[{"id":"1","task":"A","completed":true}]"#);
        let controller = controller(&provider, &transport);
        let mut state = AppState::default();

        controller.bootstrap(&mut state).await;
        assert_eq!(state.view, View::Authenticated);
        assert!(state.ready);
        assert_eq!(state.user.as_ref().unwrap().display_name(), "a@b.com");
        assert_eq!(state.todos.len(), 1);
        assert!(state.notice.is_none());
    }

    #[tokio::test]
    async fn test_auth_validation_sends_nothing() {
        let provider = FakeSessionProvider::new();
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = AppState::default();

        state.forms.sign_up_email = "a@b.com".to_string();
        controller.sign_up(&mut state).await;
        assert_eq!(notice(&state), (MSG_MISSING_CREDENTIALS.to_string(), true));

        state.forms.sign_in_password = "pw".to_string();
        controller.sign_in(&mut state).await;
        assert_eq!(notice(&state), (MSG_MISSING_CREDENTIALS.to_string(), true));

        state.enter_confirmation("a@b.com".to_string());
        state.forms.confirm_code = "  ".to_string();
        controller.confirm_sign_up(&mut state).await;
        assert_eq!(notice(&state), (MSG_MISSING_CODE.to_string(), true));
        assert_eq!(state.view, View::ConfirmSignUp);

        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_auth_errors_leave_view_unchanged() {
        let provider = FakeSessionProvider::new();
        provider.fail_sign_up("User already exists");
        provider.fail_sign_in("Incorrect username or password.");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = AppState::default();

        state.show_sign_up();
        state.forms.sign_up_email = "a@b.com".to_string();
        state.forms.sign_up_password = "pw".to_string();
        controller.sign_up(&mut state).await;
        assert_eq!(state.view, View::SignUp);
        assert_eq!(
            notice(&state),
            ("Sign Up Error: User already exists".to_string(), true)
        );

        state.show_sign_in();
        state.forms.sign_in_email = "a@b.com".to_string();
        state.forms.sign_in_password = "bad".to_string();
        controller.sign_in(&mut state).await;
        assert_eq!(state.view, View::SignIn);
        assert_eq!(
            notice(&state),
            (
                "Sign In Error: Incorrect username or password.".to_string(),
                true
            )
        );
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_confirm_error() {
        let provider = FakeSessionProvider::new();
        provider.fail_confirm("Invalid verification code provided, please try again.");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = AppState::default();
        state.enter_confirmation("a@b.com".to_string());
        state.forms.confirm_code = "000000".to_string();

        controller.confirm_sign_up(&mut state).await;
        assert_eq!(state.view, View::ConfirmSignUp);
        assert_eq!(state.pending_email.as_deref(), Some("a@b.com"));
        assert!(notice(&state).0.starts_with("Confirmation Error: "));
    }

    #[tokio::test]
    async fn test_sign_out() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = signed_in_state();
        state.todos = vec![store::Todo::new("1", "A", false)];
        state.new_task = "draft".to_string();

        controller.sign_out(&mut state).await;
        assert_eq!(state.view, View::SignIn);
        assert!(state.todos.is_empty());
        assert!(state.new_task.is_empty());
        assert_eq!(notice(&state), (MSG_SIGNED_OUT.to_string(), false));
        assert_eq!(provider.sign_out_count(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_error_keeps_state() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        provider.fail_sign_out("boom");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = signed_in_state();

        controller.sign_out(&mut state).await;
        assert_eq!(state.view, View::Authenticated);
        assert_eq!(notice(&state), ("Sign Out Error: boom".to_string(), true));
    }

    #[tokio::test]
    async fn test_blank_create_sends_no_request() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = signed_in_state();

        for input in ["", "   ", "\t\n"] {
            state.new_task = input.to_string();
            controller.create(&mut state).await;
            assert_eq!(
                notice(&state),
                ("To-Do task cannot be empty.".to_string(), true)
            );
        }
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_refreshes_once_and_replaces_list() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = signed_in_state();
        state.todos = vec![store::Todo::new("old", "Old", false)];
        state.new_task = "  Buy milk ".to_string();

        transport.respond(201, r#"{"id":"7","task":"Buy milk","completed":false}"#);
        transport.respond(
            200,
            r#"[{"id":"7","task":"Buy milk","completed":false},{"id":"8","task":"Walk","completed":true}]"#,
        );
        controller.create(&mut state).await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Post);
        let body: Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["task"], "Buy milk");
        assert_eq!(list_calls(&transport), 1);

        let ids: Vec<&str> = state.todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "8"]);
        assert!(state.new_task.is_empty());
        assert_eq!(notice(&state), (MSG_CREATED.to_string(), false));
    }

    #[tokio::test]
    async fn test_toggle_negates_rendered_value() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = signed_in_state();

        controller.toggle(&mut state, "1", true).await;
        controller.toggle(&mut state, "2", false).await;

        let puts: Vec<Value> = transport
            .requests()
            .iter()
            .filter(|r| r.method == Method::Put)
            .map(|r| serde_json::from_str(r.body.as_deref().unwrap()).unwrap())
            .collect();
        assert_eq!(puts[0]["completed"], false);
        assert_eq!(puts[1]["completed"], true);
        assert_eq!(list_calls(&transport), 2);
        assert_eq!(notice(&state), (MSG_UPDATED.to_string(), false));
    }

    #[tokio::test]
    async fn test_rename() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = signed_in_state();

        controller.rename(&mut state, "3", " New name ").await;
        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].url, format!("{BASE}/3"));
        let body: Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["task"], "New name");
        assert_eq!(list_calls(&transport), 1);
    }

    #[tokio::test]
    async fn test_request_error_keeps_list() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = signed_in_state();
        state.todos = vec![store::Todo::new("1", "A", false)];

        transport.respond(500, r#"{"message":"Internal failure"}"#);
        controller.delete(&mut state, "1").await;

        assert_eq!(transport.request_count(), 1);
        assert_eq!(state.todos.len(), 1);
        let (text, is_error) = notice(&state);
        assert!(is_error);
        assert!(text.starts_with("Error deleting To-Do: "));
        assert!(text.contains("Internal failure"));
    }

    #[tokio::test]
    async fn test_network_error_is_reported() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = signed_in_state();

        transport.fail("connection reset");
        controller.toggle(&mut state, "1", false).await;

        let (text, is_error) = notice(&state);
        assert!(is_error);
        assert!(text.starts_with("Error updating To-Do: "));
        assert!(text.contains("connection reset"));
        assert_eq!(list_calls(&transport), 0);
    }

    #[tokio::test]
    async fn test_failed_refresh_is_reported() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);
        let mut state = signed_in_state();
        state.todos = vec![store::Todo::new("1", "A", false)];

        transport.respond(503, "not json");
        controller.refresh(&mut state).await;
        assert_eq!(state.todos.len(), 1);
        let (text, is_error) = notice(&state);
        assert!(is_error);
        assert!(text.starts_with("Error fetching To-Dos: "));
    }

    #[tokio::test]
    async fn test_expired_session_forces_one_sign_out() {
        let provider = FakeSessionProvider::signed_in("a@b.com");
        let transport = RecordingTransport::new();
        let controller = controller(&provider, &transport);

        provider.expire();
        let mut state = signed_in_state();
        state.new_task = "Buy milk".to_string();
        controller.create(&mut state).await;
        assert_eq!(state.view, View::SignIn);
        assert_eq!(notice(&state), (MSG_SESSION_EXPIRED.to_string(), true));
        assert_eq!(provider.sign_out_count(), 1);

        for op in 0..3 {
            let mut state = signed_in_state();
            match op {
                0 => controller.toggle(&mut state, "1", false).await,
                1 => controller.delete(&mut state, "1").await,
                _ => controller.refresh(&mut state).await,
            }
            assert_eq!(state.view, View::SignIn);
        }
        assert_eq!(provider.sign_out_count(), 4);
        assert_eq!(transport.request_count(), 0);
    }
}
