//! Token signing configuration

use serde::{Deserialize, Serialize};

/// Secret used when nothing else is configured. Only fit for local development.
pub const DEFAULT_DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// Default token lifetime in hours
pub const DEFAULT_EXPIRE_HOURS: i64 = 24;

/// Variable holding the signing secret
pub const SECRET_ENV_VAR: &str = "JWT_SECRET";

/// Variable holding the token lifetime in hours
pub const EXPIRE_HOURS_ENV_VAR: &str = "JWT_EXPIRE_HOURS";

/// JWT signing configuration
///
/// Only the two values the token service needs are kept here: the raw key
/// material and the token lifetime. Validation of these values happens when
/// the service is constructed, not while loading.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Token expiry time in hours
    #[serde(default = "default_expire_hours")]
    pub expire_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_DEVELOPMENT_SECRET),
            expire_hours: DEFAULT_EXPIRE_HOURS,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expire_hours", &self.expire_hours)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token expiry in hours
    pub fn with_expire_hours(mut self, hours: i64) -> Self {
        self.expire_hours = hours;
        self
    }

    /// Create from environment variables
    ///
    /// Reads `JWT_SECRET` and `JWT_EXPIRE_HOURS`. A missing or unparsable
    /// expiry falls back to the default; a missing secret falls back to the
    /// development secret.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup, with the same fallbacks as
    /// [`from_env`](Self::from_env)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secret =
            lookup(SECRET_ENV_VAR).unwrap_or_else(|| DEFAULT_DEVELOPMENT_SECRET.to_string());
        let expire_hours = lookup(EXPIRE_HOURS_ENV_VAR)
            .and_then(|value| parse_expire_hours(&value))
            .unwrap_or(DEFAULT_EXPIRE_HOURS);

        Self {
            secret,
            expire_hours,
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_DEVELOPMENT_SECRET
    }

    /// Token lifetime in seconds, `None` on overflow
    pub fn expire_seconds(&self) -> Option<i64> {
        self.expire_hours.checked_mul(3600)
    }
}

fn default_expire_hours() -> i64 {
    DEFAULT_EXPIRE_HOURS
}

/// Parse a `JWT_EXPIRE_HOURS` value, ignoring surrounding whitespace
pub(crate) fn parse_expire_hours(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}
