//! Wiring loaded configuration into ready-to-use services

use std::sync::Arc;

use tg_core::services::token::{TokenService, TokenServiceConfig};
use tg_shared::config::AppConfig;

use crate::session::{AuthSession, FileSessionStore};
use crate::InfrastructureError;

/// Build a token service from loaded application configuration
///
/// Logs the configured lifetime, never the secret. Falling back to the
/// development secret outside development is logged as a warning.
pub fn token_service_from_config(config: &AppConfig) -> Result<TokenService, InfrastructureError> {
    if config.jwt.is_using_default_secret() {
        tracing::warn!(
            environment = %config.environment,
            production = config.environment.is_production(),
            "JWT secret is the development default; set APP__JWT__SECRET or JWT_SECRET"
        );
    }

    let service = TokenService::new(TokenServiceConfig::from(&config.jwt)).map_err(|e| {
        tracing::error!(error = %e, event = "token_service_config_invalid", "Invalid token configuration");
        InfrastructureError::Configuration(e)
    })?;

    tracing::info!(
        expire_hours = config.jwt.expire_hours,
        environment = %config.environment,
        "Token service ready"
    );

    Ok(service)
}

/// Build the client session mirror described by the configuration
pub fn auth_session_from_config(config: &AppConfig) -> AuthSession<FileSessionStore> {
    AuthSession::new(FileSessionStore::from_config(&config.session))
}

/// Infrastructure service container
pub struct InfrastructureServices {
    /// Configuration the services were built from
    pub config: AppConfig,
    /// Shared token service
    pub token_service: Arc<TokenService>,
    /// File-backed client session
    pub session: Arc<AuthSession<FileSessionStore>>,
}

impl InfrastructureServices {
    /// Build every service from an already loaded configuration
    pub fn from_config(config: AppConfig) -> Result<Self, InfrastructureError> {
        let token_service = Arc::new(token_service_from_config(&config)?);
        let session = Arc::new(auth_session_from_config(&config));

        Ok(Self {
            config,
            token_service,
            session,
        })
    }
}

impl std::fmt::Debug for InfrastructureServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfrastructureServices")
            .field("config", &self.config)
            .field("token_service", &self.token_service)
            .field("session", &self.session)
            .finish()
    }
}

/// Initialize infrastructure services
///
/// This function:
/// - Loads `.env` if present
/// - Loads layered application configuration
/// - Installs the tracing subscriber
/// - Builds the token service and the client session
pub fn initialize() -> Result<InfrastructureServices, InfrastructureError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().map_err(|e| InfrastructureError::Config(e.to_string()))?;
    tg_shared::logging::init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Initializing infrastructure services");

    let services = InfrastructureServices::from_config(config)?;

    tracing::info!("Infrastructure services initialized successfully");

    Ok(services)
}
