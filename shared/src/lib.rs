//! Shared utilities and common types for TokenGate
//!
//! This crate provides functionality used across the workspace:
//! - Configuration types and loading
//! - Error response structures
//! - Tracing subscriber bootstrap

pub mod config;
pub mod errors;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, JwtConfig, LogFormat, LoggingConfig, SessionConfig};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use logging::init_tracing;
