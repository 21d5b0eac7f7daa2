//! This crate contains all UI for the to-do client.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`state`] | [`AppState`], the visible [`View`] and the [`StateCell`] seam |
//! | [`controller`] | [`Controller`], which runs every user action against the state |
//! | [`todo_list`] | Projection of todos into rows, and the list component |
//! | `notification` | The auto-hiding notice banner |
//! | `app` | [`TodoApp`] and [`ConfigErrorView`], the two roots |

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const UI_CSS: Asset = asset!("/assets/styling/main.css");

pub mod state;
pub use state::{use_app_state, AppState, AuthForms, StateCell, View};

mod notification;
pub use notification::{Notice, NotificationBar, NOTICE_DURATION};

pub mod controller;
pub use controller::Controller;

mod client;
pub use client::{make_controller, AppController, PlatformSessionStore, SharedController};

pub mod todo_list;
pub use todo_list::{TodoList, TodoListView, TodoRow};

mod auth_panels;
pub use auth_panels::{ConfirmSignUpPanel, SignInPanel, SignUpPanel};

mod dashboard;
pub use dashboard::Dashboard;

mod app;
pub use app::{spawn_action, use_controller, ConfigErrorView, TodoApp};
