//! Configuration for the token service

use chrono::Duration;
use tg_shared::config::JwtConfig;

use crate::errors::ConfigError;

/// Configuration for the token service
///
/// Holds the raw key material and the token lifetime. Values are checked
/// when the service is constructed.
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub secret: Vec<u8>,
    /// Token lifetime, `None` when the requested span does not fit a `Duration`
    expiry: Option<Duration>,
}

impl TokenServiceConfig {
    /// Creates a configuration from a secret and a lifetime in hours
    pub fn new(secret: impl AsRef<[u8]>, expire_hours: i64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            expiry: Duration::try_hours(expire_hours),
        }
    }

    /// Creates a configuration with an arbitrary lifetime
    pub fn with_expiry(secret: impl AsRef<[u8]>, expiry: Duration) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            expiry: Some(expiry),
        }
    }

    /// Requested lifetime, if it is representable
    pub fn expiry(&self) -> Option<Duration> {
        self.expiry
    }

    /// Rejects an empty secret or an unusable lifetime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        self.lifetime().map(|_| ())
    }

    /// Token lifetime, checked to be at least one second and representable
    pub fn lifetime(&self) -> Result<Duration, ConfigError> {
        let expiry = self.expiry.ok_or(ConfigError::ExpiryOutOfRange)?;
        if expiry.num_seconds() <= 0 {
            return Err(ConfigError::NonPositiveExpiry {
                seconds: expiry.num_seconds(),
            });
        }
        Ok(expiry)
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.as_bytes().to_vec(),
            expiry: config.expire_seconds().and_then(Duration::try_seconds),
        }
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("secret", &"<redacted>")
            .field("expiry", &self.expiry)
            .finish()
    }
}
