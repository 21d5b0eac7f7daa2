//! # Todo list
//!
//! [`TodoListView::project`] turns the fetched records into display rows; the
//! [`TodoList`] component renders those rows. Rendering is a full replacement
//! keyed by todo id, and each row's handlers capture that row's `id` and
//! `completed` at render time.

use dioxus::prelude::*;
use store::Todo;

use crate::app::{spawn_action, use_controller};
use crate::icons::{FaCircleCheck, FaCircleXmark, FaPen, FaTrash};
use crate::state::use_app_state;
use crate::Icon;

const TODO_LIST_CSS: Asset = asset!("/assets/styling/todo_list.css");

/// Shown when there are no todos.
pub const EMPTY_MESSAGE: &str = "No To-Dos yet! Add one above.";

/// Display form of one todo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoRow {
    pub id: String,
    pub task: String,
    pub completed: bool,
    /// Due date as `M/D/YYYY`.
    pub due_label: Option<String>,
    pub category: Option<String>,
    pub priority_label: Option<String>,
    pub toggle_title: &'static str,
}

impl TodoRow {
    fn from_todo(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            task: todo.task.clone(),
            completed: todo.completed,
            due_label: todo.due().map(|d| d.format("%-m/%-d/%Y").to_string()),
            category: todo.category.clone().filter(|c| !c.is_empty()),
            priority_label: todo
                .priority
                .as_ref()
                .map(|p| p.label())
                .filter(|l| !l.is_empty()),
            toggle_title: if todo.completed {
                "Mark as incomplete"
            } else {
                "Mark as complete"
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoListView {
    pub rows: Vec<TodoRow>,
}

impl TodoListView {
    /// One row per record, in the order given.
    pub fn project(todos: &[Todo]) -> Self {
        Self {
            rows: todos.iter().map(TodoRow::from_todo).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[component]
pub fn TodoList() -> Element {
    let state = use_app_state();
    let view = TodoListView::project(&state.read().todos);

    rsx! {
        document::Stylesheet { href: TODO_LIST_CSS }

        if view.is_empty() {
            p { class: "todo-empty", "{EMPTY_MESSAGE}" }
        } else {
            ul {
                class: "todo-list",
                for row in view.rows {
                    TodoItem { key: "{row.id}", row }
                }
            }
        }
    }
}

#[component]
fn TodoItem(row: TodoRow) -> Element {
    let controller = use_controller();
    let mut state = use_app_state();
    let mut editing = use_signal(|| false);
    let mut draft = use_signal(String::new);

    let id = row.id.clone();
    let completed = row.completed;

    let on_toggle = {
        let controller = controller.clone();
        let id = id.clone();
        move |_| {
            let controller = controller.clone();
            let id = id.clone();
            spawn_action(async move {
                controller.toggle(&mut state, &id, completed).await;
            });
        }
    };

    let on_delete = {
        let controller = controller.clone();
        let id = id.clone();
        move |_| {
            let controller = controller.clone();
            let id = id.clone();
            spawn_action(async move {
                controller.delete(&mut state, &id).await;
            });
        }
    };

    let on_edit_key = {
        let controller = controller.clone();
        let id = id.clone();
        move |evt: KeyboardEvent| match evt.key() {
            Key::Enter => {
                editing.set(false);
                let controller = controller.clone();
                let id = id.clone();
                let task = draft();
                spawn_action(async move {
                    controller.rename(&mut state, &id, &task).await;
                });
            }
            Key::Escape => editing.set(false),
            _ => {}
        }
    };

    let task = row.task.clone();
    let on_start_edit = move |_| {
        draft.set(task.clone());
        editing.set(true);
    };

    rsx! {
        li {
            class: if row.completed { "todo-item todo-item--completed" } else { "todo-item" },
            div {
                class: "todo-item-body",
                if editing() {
                    input {
                        class: "todo-item-edit",
                        r#type: "text",
                        value: draft(),
                        autofocus: true,
                        oninput: move |evt: FormEvent| draft.set(evt.value()),
                        onkeydown: on_edit_key,
                        onblur: move |_| editing.set(false),
                    }
                } else {
                    span { class: "todo-item-task", "{row.task}" }
                }
                div {
                    class: "todo-item-meta",
                    if let Some(due) = &row.due_label {
                        span { class: "todo-item-due", "Due: {due}" }
                    }
                    if let Some(category) = &row.category {
                        span { class: "todo-item-category", "{category}" }
                    }
                    if let Some(priority) = &row.priority_label {
                        span { class: "todo-item-priority", "Priority: {priority}" }
                    }
                }
            }
            div {
                class: "todo-item-actions",
                button {
                    class: "todo-item-toggle",
                    title: row.toggle_title,
                    onclick: on_toggle,
                    if row.completed {
                        Icon { icon: FaCircleXmark, width: 16, height: 16 }
                    } else {
                        Icon { icon: FaCircleCheck, width: 16, height: 16 }
                    }
                }
                button {
                    class: "todo-item-rename",
                    title: "Rename",
                    onclick: on_start_edit,
                    Icon { icon: FaPen, width: 14, height: 14 }
                }
                button {
                    class: "todo-item-delete",
                    title: "Delete",
                    onclick: on_delete,
                    Icon { icon: FaTrash, width: 14, height: 14 }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::Priority;

    #[test]
    fn test_empty_projection() {
        let view = TodoListView::project(&[]);
        assert!(view.is_empty());
        assert_eq!(view.rows.len(), 0);
    }

    #[test]
    fn test_one_row_per_record_in_order() {
        let todos = vec![
            Todo::new("b", "Second", true),
            Todo::new("a", "First", false),
            Todo::new("c", "Third", false),
        ];
        let view = TodoListView::project(&todos);
        assert!(!view.is_empty());
        let rows: Vec<(&str, bool)> = view
            .rows
            .iter()
            .map(|r| (r.id.as_str(), r.completed))
            .collect();
        assert_eq!(rows, vec![("b", true), ("a", false), ("c", false)]);
        assert_eq!(view.rows[0].toggle_title, "Mark as incomplete");
        assert_eq!(view.rows[1].toggle_title, "Mark as complete");
    }

    #[test]
    fn test_optional_fields() {
        let mut todo = Todo::new("1", "Pay rent", false);
        todo.due_date = Some("2024-03-05".to_string());
        todo.category = Some("Home".to_string());
        todo.priority = Some(Priority::High);

        let view = TodoListView::project(&[todo]);
        let row = &view.rows[0];
        assert_eq!(row.due_label.as_deref(), Some("3/5/2024"));
        assert_eq!(row.category.as_deref(), Some("Home"));
        assert_eq!(row.priority_label.as_deref(), Some("High"));

        let bare_view = TodoListView::project(&[Todo::new("2", "x", false)]);
        let bare = &bare_view.rows[0];
        assert!(bare.due_label.is_none());
        assert!(bare.category.is_none());
        assert!(bare.priority_label.is_none());
    }

    #[test]
    fn test_unparseable_due_date_is_dropped() {
        let mut todo = Todo::new("1", "x", false);
        todo.due_date = Some("someday".to_string());
        let view = TodoListView::project(&[todo]);
        assert!(view.rows[0].due_label.is_none());
    }
}
