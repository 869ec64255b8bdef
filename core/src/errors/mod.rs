//! Domain-specific error types and error handling.

mod types;


pub use types::{ConfigError, InvalidTokenReason, SessionError, TokenError, TokenErrorKind};
