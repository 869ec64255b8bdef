//! File-backed session store
//!
//! Sessions live in a small JSON object mapping slot names to tokens, so
//! several clients can share one file. Only the configured slot is ever
//! touched; other keys are written back unchanged.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use tg_core::errors::SessionError;
use tg_core::repositories::SessionStore;
use tg_shared::config::SessionConfig;

/// Session store persisting one slot of a JSON file
pub struct FileSessionStore {
    path: PathBuf,
    slot: String,
    // Serializes read-modify-write cycles issued through this instance
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Create a store for `slot` inside the file at `path`
    pub fn new(path: impl Into<PathBuf>, slot: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            slot: slot.into(),
            lock: Mutex::new(()),
        }
    }

    /// Create a store from session configuration
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.file_path.clone(), config.slot.clone())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Slot this store reads and writes
    pub fn slot(&self) -> &str {
        &self.slot
    }

    async fn read_slots(&self) -> Result<Map<String, Value>, SessionError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(SessionError::Storage(e.to_string())),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(slots)) => Ok(slots),
            Ok(_) => Err(SessionError::Corrupted(
                "session file is not a JSON object".to_string(),
            )),
            Err(e) => Err(SessionError::Corrupted(e.to_string())),
        }
    }

    async fn write_slots(&self, slots: &Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SessionError::Storage(e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(slots)
            .map_err(|e| SessionError::Corrupted(e.to_string()))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, token: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().await;

        let mut slots = self.read_slots().await?;
        slots.insert(self.slot.clone(), Value::String(token.to_string()));
        self.write_slots(&slots).await?;

        tracing::debug!(
            path = %self.path.display(),
            slot = %self.slot,
            event = "session_saved",
            "Persisted session token"
        );
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().await;

        match self.read_slots().await?.remove(&self.slot) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(token)) => Ok(Some(token)),
            Some(_) => Err(SessionError::Corrupted(format!(
                "slot '{}' does not hold a string",
                self.slot
            ))),
        }
    }

    async fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.lock.lock().await;

        let mut slots = self.read_slots().await?;
        if slots.remove(&self.slot).is_none() {
            return Ok(());
        }
        self.write_slots(&slots).await?;

        tracing::debug!(
            path = %self.path.display(),
            slot = %self.slot,
            event = "session_cleared",
            "Cleared session token"
        );
        Ok(())
    }
}

impl std::fmt::Debug for FileSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSessionStore")
            .field("path", &self.path)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
