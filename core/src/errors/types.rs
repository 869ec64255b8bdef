//! Error types for the token lifecycle
//!
//! Three kinds are visible to callers: configuration problems detected when a
//! service is built, tokens that must be rejected outright, and tokens that
//! were genuine but have run out of time.

use tg_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Errors raised while constructing a token service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Signing secret is missing or empty")]
    EmptySecret,

    #[error("Token expiry must be positive, got {seconds} seconds")]
    NonPositiveExpiry { seconds: i64 },

    #[error("Token expiry is too large")]
    ExpiryOutOfRange,
}

/// Why a presented token was rejected as invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenReason {
    /// Not three base64url segments, or a segment failed to decode
    Malformed,
    /// Header declares an algorithm other than HS256
    UnsupportedAlgorithm,
    /// Signature does not match the header and payload
    InvalidSignature,
    /// Signed payload is missing required claims or names another issuer
    InvalidClaims,
}

impl std::fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            InvalidTokenReason::Malformed => "malformed token",
            InvalidTokenReason::UnsupportedAlgorithm => "unsupported algorithm",
            InvalidTokenReason::InvalidSignature => "invalid signature",
            InvalidTokenReason::InvalidClaims => "invalid claims",
        };
        f.write_str(reason)
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(InvalidTokenReason),

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Errors raised by a client-side session store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session storage failed: {0}")]
    Storage(String),

    #[error("Session data is corrupted: {0}")]
    Corrupted(String),
}

/// Coarse classification of a [`TokenError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenErrorKind {
    InvalidToken,
    TokenExpired,
    GenerationFailed,
}

impl TokenError {
    pub(crate) fn malformed() -> Self {
        TokenError::InvalidToken(InvalidTokenReason::Malformed)
    }

    /// Classify the error without its detail
    pub fn kind(&self) -> TokenErrorKind {
        match self {
            TokenError::TokenExpired => TokenErrorKind::TokenExpired,
            TokenError::InvalidToken(_) => TokenErrorKind::InvalidToken,
            TokenError::TokenGenerationFailed => TokenErrorKind::GenerationFailed,
        }
    }

    /// True when the token was genuine but is past its expiry, so the caller
    /// should ask the user to authenticate again
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::TokenExpired)
    }

    /// True when the token failed structural or signature checks
    pub fn is_invalid(&self) -> bool {
        matches!(self, TokenError::InvalidToken(_))
    }
}

impl IntoErrorResponse for TokenError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            TokenError::TokenExpired => {
                ErrorResponse::new(error_codes::TOKEN_EXPIRED, self.to_string())
            }
            TokenError::InvalidToken(reason) => {
                ErrorResponse::new(error_codes::TOKEN_INVALID, "Invalid token")
                    .add_detail("reason", reason.to_string())
            }
            TokenError::TokenGenerationFailed => {
                ErrorResponse::new(error_codes::TOKEN_GENERATION_FAILED, self.to_string())
            }
        }
    }
}

impl IntoErrorResponse for ConfigError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(error_codes::CONFIG_ERROR, self.to_string())
    }
}
