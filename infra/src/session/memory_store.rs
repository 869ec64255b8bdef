//! In-memory session store

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tg_core::errors::SessionError;
use tg_core::repositories::SessionStore;

/// Session store keeping the token in process memory
///
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    token: Arc<RwLock<Option<String>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.read().await.clone())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.token.write().await.take();
        Ok(())
    }
}

impl std::fmt::Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySessionStore").finish_non_exhaustive()
    }
}
