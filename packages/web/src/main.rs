use dioxus::prelude::*;

use store::AppConfig;
use ui::{ConfigErrorView, TodoApp};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(AppConfig::from_build_env);

    let body = match config {
        Ok(config) => rsx! { TodoApp { config } },
        Err(e) => {
            tracing::error!("Startup configuration is incomplete: {}", e);
            rsx! { ConfigErrorView { error: e.to_string() } }
        }
    };

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::UI_CSS }

        {body}
    }
}
