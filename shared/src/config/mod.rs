//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing secret and lifetime
//! - `environment` - Environment detection and logging configuration
//! - `session` - Client-side session persistence

pub mod auth;
pub mod environment;
pub mod session;

use std::path::Path;

use config::{Config, ConfigError, File, Map};
use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use session::SessionConfig;

/// Prefix for environment variable overrides (`APP__JWT__SECRET`, ...)
pub const ENV_PREFIX: &str = "APP";

/// Separator between nested keys in environment variable overrides
pub const ENV_SEPARATOR: &str = "__";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Client session persistence
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            jwt: JwtConfig::default(),
            logging: LoggingConfig::for_environment(environment),
            session: SessionConfig::default(),
        }
    }

    /// Load configuration for the environment named by `ENVIRONMENT`
    ///
    /// Sources are layered, later ones winning: built-in defaults, the
    /// environment's `config.<env>.toml` (optional), `JWT_SECRET` /
    /// `JWT_EXPIRE_HOURS`, then `APP__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Self::load_from(environment, Path::new(environment.config_file()))
    }

    /// Load configuration using an explicit file path
    pub fn load_from(environment: Environment, path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_vars(environment, path, process_vars())
    }

    /// Load configuration reading variables from `vars` instead of the
    /// process environment
    pub fn load_with_vars(
        environment: Environment,
        path: &Path,
        vars: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Self::for_environment(environment))?;

        let jwt_vars = Config::builder()
            .set_override_option("jwt.secret", vars.get(auth::SECRET_ENV_VAR).cloned())?
            .set_override_option(
                "jwt.expire_hours",
                vars.get(auth::EXPIRE_HOURS_ENV_VAR)
                    .and_then(|value| auth::parse_expire_hours(value)),
            )?
            .build()?;

        let config: Self = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).required(false))
            .add_source(jwt_vars)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            environment = %config.environment,
            file = %path.display(),
            expire_hours = config.jwt.expire_hours,
            "Loaded application configuration"
        );

        Ok(config)
    }
}

/// Process environment, skipping entries that are not valid UTF-8
fn process_vars() -> Map<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
