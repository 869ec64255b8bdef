//! Session module for client-side token persistence
//!
//! Adapters for the core `SessionStore` port, and the `AuthSession` wrapper
//! that mirrors sign-in state on top of any of them.

pub mod auth_session;
pub mod file_store;
pub mod memory_store;


pub use auth_session::AuthSession;
pub use file_store::FileSessionStore;
pub use memory_store::InMemorySessionStore;

// Re-export commonly used types
pub use tg_core::repositories::SessionStore;
pub use tg_shared::config::SessionConfig;
