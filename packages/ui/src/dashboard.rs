use dioxus::prelude::*;

use crate::app::{spawn_action, use_controller};
use crate::icons::{FaPlus, FaRightFromBracket};
use crate::state::use_app_state;
use crate::todo_list::TodoList;
use crate::Icon;

/// Signed-in view: header, new-task input and the list.
#[component]
pub fn Dashboard() -> Element {
    let controller = use_controller();
    let mut state = use_app_state();
    let new_task = state.read().new_task.clone();
    let display_name = state
        .read()
        .user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    let create = {
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            spawn_action(async move {
                controller.create(&mut state).await;
            });
        }
    };
    let create_on_enter = create.clone();
    let create_on_click = create;

    let sign_out = move |_| {
        let controller = controller.clone();
        spawn_action(async move {
            controller.sign_out(&mut state).await;
        });
    };

    rsx! {
        section {
            class: "dashboard",
            header {
                class: "dashboard-header",
                span { class: "dashboard-user", "{display_name}" }
                button {
                    class: "dashboard-sign-out",
                    onclick: sign_out,
                    Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                    " Sign Out"
                }
            }
            div {
                class: "todo-new",
                input {
                    r#type: "text",
                    placeholder: "What needs to be done?",
                    value: new_task,
                    oninput: move |evt: FormEvent| state.write().new_task = evt.value(),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            create_on_enter();
                        }
                    },
                }
                button {
                    title: "Add",
                    onclick: move |_| create_on_click(),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    " Add"
                }
            }
            TodoList {}
        }
    }
}
