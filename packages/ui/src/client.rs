//! Platform-specific controller constructor.
//!
//! The session store differs per platform:
//! - **Web** (WASM + `web` feature): browser localStorage via [`store::LocalStorageStore`],
//!   keyed by the app-client id so two pools never share tokens
//! - **Native**: an in-memory [`store::MemorySessionStore`]

use std::rc::Rc;

use api::{CognitoConfig, CognitoSession, ReqwestTransport, TodoClient};
use store::AppConfig;

use crate::controller::Controller;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformSessionStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformSessionStore = store::MemorySessionStore;

pub type AppSession = CognitoSession<ReqwestTransport, PlatformSessionStore>;
pub type AppController = Controller<AppSession, ReqwestTransport>;
/// Handle shared through the component context.
pub type SharedController = Rc<AppController>;

fn platform_store(config: &AppConfig) -> PlatformSessionStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::with_namespace(Some(&config.client_id))
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let _ = config;
        store::MemorySessionStore::new()
    }
}

/// Wire the Cognito session provider and the todo client for `config`.
pub fn make_controller(config: &AppConfig) -> AppController {
    let transport = ReqwestTransport::new();
    let session = CognitoSession::configure(
        CognitoConfig::from(config),
        transport.clone(),
        platform_store(config),
    );
    tracing::debug!("Todo endpoint: {}", config.api_url);
    Controller::new(TodoClient::new(&config.api_url, session, transport))
}
