//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for TokenGate. It provides
//! concrete adapters for the ports declared in `tg_core` and the bootstrap
//! that turns loaded configuration into running services.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Session**: file-backed and in-memory session stores, and the
//!   `AuthSession` client mirror built on them
//! - **Bootstrap**: configuration loading, logging setup and token service
//!   construction

// Re-export core types for convenience
pub use tg_core::errors::*;

/// Session module - client-side token persistence
pub mod session;

/// Bootstrap module - configuration to services
pub mod bootstrap;

pub use bootstrap::{
    auth_session_from_config, initialize, token_service_from_config, InfrastructureServices,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Loaded configuration was rejected by the token service
    #[error("Invalid token configuration: {0}")]
    Configuration(#[from] tg_core::errors::ConfigError),

    /// Session store error
    #[error("Session error: {0}")]
    Session(#[from] tg_core::errors::SessionError),
}
