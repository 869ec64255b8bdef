//! Token claims for JWT-based sessions.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::identity::Identity;

/// JWT issuer stamped into every token
pub const TOKEN_ISSUER: &str = "tokengate";

/// Claims structure for JWT payload
///
/// Serialized flat: `user_id`, `username`, `email`, `iat`, `exp`, `iss`.
/// `exp` is always `iat` plus the issuing service's expiry and is never
/// changed after issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub user_id: u64,

    /// Username
    pub username: String,

    /// Email
    pub email: String,

    /// Issued at timestamp (Unix seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates claims for `identity`, valid from `issued_at` for `lifetime`
    ///
    /// # Arguments
    ///
    /// * `identity` - The principal the token speaks for
    /// * `issued_at` - Issuance instant, truncated to whole seconds
    /// * `lifetime` - How long the token is accepted
    pub fn new(identity: &Identity, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let iat = issued_at.timestamp();

        Self {
            user_id: identity.user_id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            iat,
            exp: iat + lifetime.num_seconds(),
            iss: TOKEN_ISSUER.to_string(),
        }
    }

    /// Gets the identity embedded in the claims
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    /// Checks whether the claims have expired at `now`
    ///
    /// The expiry instant itself is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Remaining lifetime at `now`, zero once expired
    pub fn expires_in(&self, now: DateTime<Utc>) -> Duration {
        Duration::seconds((self.exp - now.timestamp()).max(0))
    }

    /// Issuance instant
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    /// Expiry instant
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}
