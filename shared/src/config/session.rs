//! Client-side session store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Slot name under which the bearer token is persisted
pub const DEFAULT_SESSION_SLOT: &str = "auth_token";

/// Client session persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// File holding the persisted session slots
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,

    /// Name of the slot holding the token
    #[serde(default = "default_slot")]
    pub slot: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file_path: default_file_path(),
            slot: default_slot(),
        }
    }
}

impl SessionConfig {
    /// Create a session configuration persisting to `file_path`
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Default::default()
        }
    }

    /// Use a different slot name
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }
}

fn default_file_path() -> PathBuf {
    PathBuf::from(".tokengate/session.json")
}

fn default_slot() -> String {
    String::from(DEFAULT_SESSION_SLOT)
}
