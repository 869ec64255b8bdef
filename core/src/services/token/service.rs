//! Main token service implementation

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Duration;
use jsonwebtoken::{Algorithm, Header};
use serde::Deserialize;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{Claims, TOKEN_ISSUER};
use crate::errors::{ConfigError, InvalidTokenReason, TokenError};

use super::bearer::extract_bearer_token;
use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;
use super::signer::Signer;

/// Signing algorithm for every token this service issues or accepts
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Header fields inspected before the signature is checked
#[derive(Deserialize)]
struct TokenHeader {
    alg: String,
}

/// Service issuing, verifying and refreshing signed session tokens
///
/// Holds no mutable state after construction: every call is a function of
/// the configured secret and expiry, its input, and one clock read. A single
/// instance can be shared across threads without locking.
pub struct TokenService<C: Clock = SystemClock> {
    expiry: Duration,
    signer: Signer,
    clock: C,
}

impl TokenService<SystemClock> {
    /// Creates a new token service reading the wall clock
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or the configuration problem that prevents one
    pub fn new(config: TokenServiceConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TokenService<C> {
    /// Creates a new token service with an explicit time source
    pub fn with_clock(config: TokenServiceConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let expiry = config.lifetime()?;
        let signer = Signer::new(&config.secret)?;

        tracing::info!(
            algorithm = ?TOKEN_ALGORITHM,
            expiry_seconds = expiry.num_seconds(),
            "Token service initialized"
        );

        Ok(Self {
            expiry,
            signer,
            clock,
        })
    }

    /// Lifetime given to every issued token
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Time source used for issuance and expiry checks
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Issues a signed token for `identity`
    ///
    /// # Arguments
    ///
    /// * `identity` - Caller-authenticated principal
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The token, valid from now for the configured expiry
    /// * `Err(TokenError)` - Claims could not be encoded
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let claims = Claims::new(identity, self.clock.now(), self.expiry);
        let token = self.encode_jwt(&claims)?;

        tracing::debug!(
            user_id = identity.user_id,
            exp = claims.exp,
            event = "token_issued",
            "Issued session token"
        );

        Ok(token)
    }

    /// Verifies a token and returns its claims
    ///
    /// Structure, algorithm, signature and claims are checked before expiry,
    /// so a tampered token is reported as invalid even when it has also
    /// expired.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The embedded claims, unchanged
    /// * `Err(TokenError::InvalidToken)` - Malformed, foreign or tampered token
    /// * `Err(TokenError::TokenExpired)` - Genuine token past its expiry
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let result = self
            .decode_verified(token)
            .and_then(|claims| self.check_expiry(claims));

        match &result {
            Ok(_) => {}
            Err(TokenError::TokenExpired) => {
                tracing::info!(event = "token_expired", "Rejected expired token");
            }
            Err(e) => {
                tracing::debug!(error = %e, event = "token_rejected", "Rejected invalid token");
            }
        }

        result
    }

    /// Verifies the token carried by an `Authorization` header value
    pub fn verify_bearer(&self, header_value: &str) -> Result<Claims, TokenError> {
        self.verify(extract_bearer_token(header_value)?)
    }

    /// Exchanges a valid token for a new one carrying the same identity
    ///
    /// Fails with exactly the error [`verify`](Self::verify) reports, without
    /// signing anything. The old token is not revoked and stays valid until
    /// its own expiry.
    pub fn refresh(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.verify(token)?;
        let refreshed = self.issue(&claims.identity())?;

        tracing::debug!(
            user_id = claims.user_id,
            previous_iat = claims.iat,
            event = "token_refreshed",
            "Refreshed session token"
        );

        Ok(refreshed)
    }

    /// Encodes claims into a JWT signed with the service key
    fn encode_jwt(&self, claims: &Claims) -> Result<String, TokenError> {
        let header =
            serde_json::to_vec(&Header::new(TOKEN_ALGORITHM)).map_err(generation_failed)?;
        let payload = serde_json::to_vec(claims).map_err(generation_failed)?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = self.signer.sign(signing_input.as_bytes());

        Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
    }

    /// Checks structure, header and signature, then decodes the claims
    fn decode_verified(&self, token: &str) -> Result<Claims, TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::malformed());
        };

        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(TokenError::malformed());
        }

        self.check_header(header)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::malformed())?;
        let signing_input = &token[..header.len() + 1 + payload.len()];

        if !self.signer.verify(signing_input.as_bytes(), &signature) {
            return Err(TokenError::InvalidToken(InvalidTokenReason::InvalidSignature));
        }

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::malformed())?;
        let claims: Claims = serde_json::from_slice(&payload)
            .map_err(|_| TokenError::InvalidToken(InvalidTokenReason::InvalidClaims))?;

        if claims.iss != TOKEN_ISSUER || claims.exp <= claims.iat {
            return Err(TokenError::InvalidToken(InvalidTokenReason::InvalidClaims));
        }

        Ok(claims)
    }

    fn check_header(&self, header: &str) -> Result<(), TokenError> {
        let header = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(|_| TokenError::malformed())?;
        let header: TokenHeader =
            serde_json::from_slice(&header).map_err(|_| TokenError::malformed())?;

        match header.alg.parse::<Algorithm>() {
            Ok(algorithm) if algorithm == TOKEN_ALGORITHM => Ok(()),
            _ => Err(TokenError::InvalidToken(InvalidTokenReason::UnsupportedAlgorithm)),
        }
    }

    fn check_expiry(&self, claims: Claims) -> Result<Claims, TokenError> {
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::TokenExpired);
        }
        Ok(claims)
    }
}

fn generation_failed(e: serde_json::Error) -> TokenError {
    tracing::error!(error = %e, event = "token_generation_failed", "Failed to encode token");
    TokenError::TokenGenerationFailed
}

impl<C: Clock> std::fmt::Debug for TokenService<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &TOKEN_ALGORITHM)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}
