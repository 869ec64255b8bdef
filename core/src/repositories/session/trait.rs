//! Session store trait for mirroring the current token on the client.

use async_trait::async_trait;

use crate::errors::SessionError;

/// Persisted slot holding the client's current session token
///
/// The token is treated as an opaque string. Implementations never decode or
/// validate it; that is the token service's job.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `token`, replacing any previous value
    ///
    /// # Arguments
    /// * `token` - Token returned by issue or refresh
    ///
    /// # Returns
    /// * `Ok(())` - Token persisted
    /// * `Err(SessionError)` - Underlying storage failed
    async fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Read the stored token
    ///
    /// # Returns
    /// * `Ok(Some(String))` - A token is stored
    /// * `Ok(None)` - Slot is empty
    /// * `Err(SessionError)` - Storage could not be read or parsed
    async fn load(&self) -> Result<Option<String>, SessionError>;

    /// Empty the slot. Clearing an empty slot is not an error.
    async fn clear(&self) -> Result<(), SessionError>;
}
