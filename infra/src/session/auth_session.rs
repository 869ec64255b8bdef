//! Client-side mirror of the current authentication state

use tg_core::errors::SessionError;
use tg_core::repositories::SessionStore;
use tg_core::services::token::bearer_header_value;

/// Keeps the client's current token in a [`SessionStore`]
///
/// The token is stored and handed back verbatim. Whether it is still
/// accepted is for the token service to decide on the next request.
pub struct AuthSession<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> AuthSession<S> {
    /// Wrap a session store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Remember the token returned by a login or refresh
    pub async fn sign_in(&self, token: &str) -> Result<(), SessionError> {
        self.store.save(token).await?;
        tracing::info!(event = "session_signed_in", "Session token stored");
        Ok(())
    }

    /// Forget the stored token
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.store.clear().await?;
        tracing::info!(event = "session_signed_out", "Session token cleared");
        Ok(())
    }

    /// Currently stored token, if any
    pub async fn token(&self) -> Result<Option<String>, SessionError> {
        self.store.load().await
    }

    /// True while a token is stored
    pub async fn is_authenticated(&self) -> Result<bool, SessionError> {
        Ok(self.token().await?.is_some())
    }

    /// `Authorization` header value for the stored token
    pub async fn authorization_header(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token().await?.map(|token| bearer_header_value(&token)))
    }
}

impl<S: SessionStore + std::fmt::Debug> std::fmt::Debug for AuthSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession").field("store", &self.store).finish()
    }
}
