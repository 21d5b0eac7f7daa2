//! Root components and context hooks.

use std::future::Future;
use std::rc::Rc;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use store::AppConfig;

use crate::auth_panels::{ConfirmSignUpPanel, SignInPanel, SignUpPanel};
use crate::client::{make_controller, SharedController};
use crate::dashboard::Dashboard;
use crate::notification::NotificationBar;
use crate::state::{AppState, View};

/// Get the controller provided by [`TodoApp`].
pub fn use_controller() -> SharedController {
    use_context::<SharedController>()
}

/// Run a controller action on the root scope.
///
/// Actions change the view, which unmounts the component that started them.
/// A task spawned with [`spawn`] would be dropped with that component, so
/// work that follows the view change (the list refresh after sign-in) would
/// never finish.
pub fn spawn_action(action: impl Future<Output = ()> + 'static) {
    let _ = spawn_forever(action);
}

/// The whole client: provides the state and controller, checks for an
/// existing session on mount, then shows exactly one view.
#[component]
pub fn TodoApp(config: AppConfig) -> Element {
    let state = use_signal(AppState::default);
    use_context_provider(|| state);
    let controller = use_context_provider(|| Rc::new(make_controller(&config)));

    use_future(move || {
        let controller = controller.clone();
        let mut state = state;
        async move {
            controller.bootstrap(&mut state).await;
        }
    });

    let (view, ready) = {
        let s = state.read();
        (s.view, s.ready)
    };

    let body = if !ready {
        rsx! { p { class: "todo-loading", "Loading..." } }
    } else {
        match view {
            View::SignUp => rsx! { SignUpPanel {} },
            View::ConfirmSignUp => rsx! { ConfirmSignUpPanel {} },
            View::SignIn => rsx! { SignInPanel {} },
            View::Authenticated => rsx! { Dashboard {} },
        }
    };

    rsx! {
        main {
            class: "todo-app",
            h1 { "To-Do List" }
            NotificationBar {}
            {body}
        }
    }
}

/// Shown instead of [`TodoApp`] when the startup configuration is incomplete.
#[component]
pub fn ConfigErrorView(error: String) -> Element {
    let message = format!("Error: {error}");
    let notice = message.clone();
    let state = use_signal(move || {
        let mut state = AppState::default();
        state.notify(notice, true);
        state
    });
    use_context_provider(|| state);

    rsx! {
        main {
            class: "todo-app",
            h1 { "To-Do List" }
            NotificationBar {}
            p { class: "config-error", "{message}" }
        }
    }
}
