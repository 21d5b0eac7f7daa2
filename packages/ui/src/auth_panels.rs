//! Sign-up, confirmation and sign-in forms.

use dioxus::prelude::*;

use crate::app::{spawn_action, use_controller};
use crate::state::use_app_state;

#[component]
pub fn SignUpPanel() -> Element {
    let controller = use_controller();
    let mut state = use_app_state();
    let forms = state.read().forms.clone();

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let controller = controller.clone();
        spawn_action(async move {
            controller.sign_up(&mut state).await;
        });
    };

    rsx! {
        section {
            class: "auth-panel",
            h2 { "Sign Up" }
            form {
                onsubmit: submit,
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: forms.sign_up_email,
                    oninput: move |evt: FormEvent| state.write().forms.sign_up_email = evt.value(),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: forms.sign_up_password,
                    oninput: move |evt: FormEvent| state.write().forms.sign_up_password = evt.value(),
                }
                button { r#type: "submit", "Sign Up" }
            }
            p {
                class: "auth-switch",
                "Already have an account? "
                a {
                    href: "#",
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        state.write().show_sign_in();
                    },
                    "Sign In"
                }
            }
        }
    }
}

#[component]
pub fn ConfirmSignUpPanel() -> Element {
    let controller = use_controller();
    let mut state = use_app_state();
    let code = state.read().forms.confirm_code.clone();
    let email = state.read().pending_email.clone().unwrap_or_default();

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let controller = controller.clone();
        spawn_action(async move {
            controller.confirm_sign_up(&mut state).await;
        });
    };

    rsx! {
        section {
            class: "auth-panel",
            h2 { "Confirm Sign Up" }
            p {
                "A verification code was sent to "
                strong { class: "auth-pending-email", "{email}" }
                "."
            }
            form {
                onsubmit: submit,
                input {
                    r#type: "text",
                    placeholder: "Verification code",
                    autocomplete: "one-time-code",
                    value: code,
                    oninput: move |evt: FormEvent| state.write().forms.confirm_code = evt.value(),
                }
                button { r#type: "submit", "Confirm" }
            }
        }
    }
}

#[component]
pub fn SignInPanel() -> Element {
    let controller = use_controller();
    let mut state = use_app_state();
    let forms = state.read().forms.clone();

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let controller = controller.clone();
        spawn_action(async move {
            controller.sign_in(&mut state).await;
        });
    };

    rsx! {
        section {
            class: "auth-panel",
            h2 { "Sign In" }
            form {
                onsubmit: submit,
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: forms.sign_in_email,
                    oninput: move |evt: FormEvent| state.write().forms.sign_in_email = evt.value(),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: forms.sign_in_password,
                    oninput: move |evt: FormEvent| state.write().forms.sign_in_password = evt.value(),
                }
                button { r#type: "submit", "Sign In" }
            }
            p {
                class: "auth-switch",
                "Need an account? "
                a {
                    href: "#",
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        state.write().show_sign_up();
                    },
                    "Sign Up"
                }
            }
        }
    }
}
