//! Mock implementation of SessionStore for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::SessionError;

use super::r#trait::SessionStore;

/// Mock session store for testing
pub struct MockSessionStore {
    token: Arc<RwLock<Option<String>>>,
    fail_writes: AtomicBool,
}

impl MockSessionStore {
    /// Create a new, empty mock store
    pub fn new() -> Self {
        Self {
            token: Arc::new(RwLock::new(None)),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent saves and clears fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), SessionError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SessionError::Storage("write rejected by mock".to_string()));
        }
        Ok(())
    }
}

impl Default for MockSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn save(&self, token: &str) -> Result<(), SessionError> {
        self.check_writable()?;
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.read().await.clone())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.check_writable()?;
        *self.token.write().await = None;
        Ok(())
    }
}
