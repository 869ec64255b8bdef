//! Bearer credential extraction

use crate::errors::TokenError;

const BEARER_SCHEME: &str = "Bearer";

/// Extracts the token from an `Authorization` header value
///
/// Accepts `Bearer <token>` with the scheme in any letter case. Anything
/// else, including an empty token, is rejected as a malformed token.
pub fn extract_bearer_token(header_value: &str) -> Result<&str, TokenError> {
    let (scheme, token) = header_value
        .trim()
        .split_once(' ')
        .ok_or_else(TokenError::malformed)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(TokenError::malformed());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::malformed());
    }

    Ok(token)
}

/// Formats a token as an `Authorization` header value
pub fn bearer_header_value(token: &str) -> String {
    format!("{} {}", BEARER_SCHEME, token)
}
