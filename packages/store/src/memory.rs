use std::sync::{Arc, Mutex};

use crate::models::Session;
use crate::session_store::SessionStore;

/// In-memory SessionStore for testing and native builds.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(Some(session))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    async fn save(&self, session: &Session) {
        *self.session.lock().unwrap() = Some(session.clone());
    }

    async fn clear(&self) {
        self.session.lock().unwrap().take();
    }
}
