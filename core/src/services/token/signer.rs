//! HMAC-SHA256 signing over the `header.payload` signing input

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::ConfigError;

type HmacSha256 = Hmac<Sha256>;

/// Keyed HMAC state, cloned for every computation
#[derive(Clone)]
pub(crate) struct Signer {
    mac: HmacSha256,
}

impl Signer {
    pub(crate) fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| ConfigError::EmptySecret)?;
        Ok(Self { mac })
    }

    /// Raw HMAC tag over `message`
    pub(crate) fn sign(&self, message: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }

    /// Recompute the tag over `message` and compare it with `signature`
    ///
    /// The comparison visits every byte regardless of where the first
    /// difference is. A length mismatch is rejected without comparing.
    pub(crate) fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let expected = self.sign(message);
        constant_time_eq(&expected, signature)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").field("algorithm", &"HS256").finish_non_exhaustive()
    }
}
