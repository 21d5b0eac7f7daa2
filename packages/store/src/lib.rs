pub mod config;
pub mod models;
pub mod session_store;

mod memory;
pub use memory::MemorySessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::{AppConfig, ConfigError};
pub use models::{Priority, Session, Todo};
pub use session_store::SessionStore;
