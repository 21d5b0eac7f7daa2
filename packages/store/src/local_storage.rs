//! # `localStorage` session store
//!
//! [`LocalStorageStore`] is the [`SessionStore`] used on the **web platform**.
//! The session is serialised to JSON and kept under a single key in
//! `window.localStorage`, so a reload keeps the user signed in until the
//! refresh token is rejected.
//!
//! When scoped to an app-client id the key is `"todo-session-<client id>"`,
//! which keeps two deployments on the same origin from sharing tokens.
//!
//! All trait methods swallow errors. Private browsing modes and quota errors
//! degrade to "not signed in".

use crate::models::Session;
use crate::session_store::SessionStore;

const DEFAULT_KEY: &str = "todo-session";

#[derive(Clone, Debug)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageStore {
    /// Create a store using the default `"todo-session"` key.
    pub fn new() -> Self {
        Self::with_namespace(None)
    }

    /// Create a store scoped to an optional namespace (usually the app-client id).
    pub fn with_namespace(namespace: Option<&str>) -> Self {
        let key = match namespace {
            Some(ns) => format!("{DEFAULT_KEY}-{ns}"),
            None => DEFAULT_KEY.to_string(),
        };
        Self { key }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStore for LocalStorageStore {
    async fn load(&self) -> Option<Session> {
        let raw = Self::storage()?.get_item(&self.key).ok()??;
        serde_json::from_str(&raw).ok()
    }

    async fn save(&self, session: &Session) {
        let Some(storage) = Self::storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(session) else {
            return;
        };
        let _ = storage.set_item(&self.key, &raw);
    }

    async fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
