//! # TokenGate Core
//!
//! Core token lifecycle and domain layer for TokenGate.
//! This crate contains the identity and claims entities, the token service
//! that issues, verifies and refreshes signed session tokens, the session
//! store port, and the error types shared by the adapters.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
