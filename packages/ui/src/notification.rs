//! Transient success/error banner.

use std::time::Duration;

use dioxus::prelude::*;

use crate::state::use_app_state;

/// How long a notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

/// A message shown in the notification area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    /// Increases with every notice, so a stale timer can tell it was replaced.
    pub generation: u64,
}

pub(crate) async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Renders the current notice and hides it after [`NOTICE_DURATION`].
#[component]
pub fn NotificationBar() -> Element {
    let mut state = use_app_state();
    let notice = state.read().notice.clone();
    let generation = notice.as_ref().map(|n| n.generation);

    use_effect(use_reactive!(|(generation,)| {
        if let Some(generation) = generation {
            spawn(async move {
                sleep(NOTICE_DURATION).await;
                state.write().dismiss_notice(generation);
            });
        }
    }));

    let Some(notice) = notice else {
        return rsx! {};
    };

    rsx! {
        div {
            class: if notice.is_error { "notification notification--error" } else { "notification notification--success" },
            role: "status",
            "{notice.text}"
        }
    }
}
