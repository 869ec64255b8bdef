//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - Issuing HS256-signed session tokens carrying an identity
//! - Verifying presented tokens against tampering and expiry
//! - Refreshing a still-valid token into a new one
//! - Extracting bearer credentials from `Authorization` header values

mod bearer;
mod clock;
mod config;
mod service;
mod signer;

#[cfg(test)]
mod tests;

pub use bearer::{bearer_header_value, extract_bearer_token};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::{TokenService, TOKEN_ALGORITHM};
