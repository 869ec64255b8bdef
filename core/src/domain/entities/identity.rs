//! Authenticated principal embedded in tokens.

use serde::{Deserialize, Serialize};

/// The principal a token speaks for
///
/// Fields are taken as given; callers are responsible for having
/// authenticated the user before asking for a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric user identifier
    pub user_id: u64,

    /// Login name
    pub username: String,

    /// Contact email
    pub email: String,
}

impl Identity {
    /// Creates a new identity
    pub fn new(user_id: u64, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            email: email.into(),
        }
    }
}
