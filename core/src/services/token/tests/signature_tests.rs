//! Tests for signature handling, header checks and wire compatibility

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::json;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{Claims, TOKEN_ISSUER};
use crate::errors::{InvalidTokenReason, TokenError};
use crate::services::token::signer::Signer;
use crate::services::token::{Clock, ManualClock, TokenService, TokenServiceConfig};

const SECRET: &str = "s3cr3t";

fn create_test_service() -> TokenService<Arc<ManualClock>> {
    let clock = Arc::new(ManualClock::starting_now());
    TokenService::with_clock(TokenServiceConfig::new(SECRET, 1), clock).unwrap()
}

/// Signs `claims` with the service secret under an arbitrary header
fn forge(header: serde_json::Value, claims: serde_json::Value, secret: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(header.to_string());
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    let signing_input = format!("{}.{}", header, payload);
    let signature = Signer::new(secret.as_bytes()).unwrap().sign(signing_input.as_bytes());
    format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature))
}

fn valid_claims(service: &TokenService<Arc<ManualClock>>) -> serde_json::Value {
    let claims = Claims::new(
        &Identity::new(42, "alice", "alice@x.com"),
        service.clock().now(),
        Duration::hours(1),
    );
    serde_json::to_value(claims).unwrap()
}

#[test]
fn test_signer_rejects_empty_secret() {
    assert!(Signer::new(b"").is_err());
}

#[test]
fn test_signer_is_deterministic() {
    let signer = Signer::new(SECRET.as_bytes()).unwrap();
    assert_eq!(signer.sign(b"header.payload"), signer.sign(b"header.payload"));
    assert_eq!(signer.sign(b"header.payload").len(), 32);
    assert_ne!(signer.sign(b"header.payload"), signer.sign(b"header.payloaD"));
}

#[test]
fn test_signer_compares_full_length() {
    let signer = Signer::new(SECRET.as_bytes()).unwrap();
    let message = b"header.payload";
    let tag = signer.sign(message);

    assert!(signer.verify(message, &tag));

    // Differences at the first and the last byte are both rejected; the
    // comparison does not stop early on either.
    let mut first = tag.clone();
    first[0] ^= 0x01;
    assert!(!signer.verify(message, &first));

    let mut last = tag.clone();
    last[31] ^= 0x80;
    assert!(!signer.verify(message, &last));

    // Prefixes and extensions of the correct tag are not accepted.
    assert!(!signer.verify(message, &tag[..31]));
    assert!(!signer.verify(message, &[]));
    let mut extended = tag.clone();
    extended.push(0);
    assert!(!signer.verify(message, &extended));
}

#[test]
fn test_signer_keys_are_independent() {
    let a = Signer::new(b"secret-a").unwrap();
    let b = Signer::new(b"secret-b").unwrap();

    let tag = a.sign(b"message");
    assert!(a.verify(b"message", &tag));
    assert!(!b.verify(b"message", &tag));
}

#[test]
fn test_issued_header_is_hs256_jwt() {
    let service = create_test_service();
    let token = service.issue(&Identity::new(1, "bob", "bob@x.com")).unwrap();

    let header = token.split('.').next().unwrap();
    let header: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header).unwrap()).unwrap();

    assert_eq!(header["alg"], "HS256");
    assert_eq!(header["typ"], "JWT");
}

#[test]
fn test_issued_signature_matches_hmac_of_signing_input() {
    let service = create_test_service();
    let token = service.issue(&Identity::new(1, "bob", "bob@x.com")).unwrap();

    let (signing_input, signature) = token.rsplit_once('.').unwrap();
    let expected = Signer::new(SECRET.as_bytes()).unwrap().sign(signing_input.as_bytes());

    assert_eq!(URL_SAFE_NO_PAD.decode(signature).unwrap(), expected);
}

#[test]
fn test_tokens_decode_with_standard_jwt_library() {
    let service = create_test_service();
    let identity = Identity::new(42, "alice", "alice@x.com");
    let token = service.issue(&identity).unwrap();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);
    let decoded = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(SECRET.as_bytes()),
        &validation,
    )
    .unwrap();

    assert_eq!(decoded.claims.identity(), identity);
}

#[test]
fn test_standard_jwt_library_tokens_verify() {
    let service = create_test_service();
    let claims = valid_claims(&service);

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let verified = service.verify(&token).unwrap();
    assert_eq!(verified.username, "alice");
}

#[test]
fn test_other_algorithms_rejected() {
    let service = create_test_service();
    let claims = valid_claims(&service);

    let hs512 = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    assert_eq!(
        service.verify(&hs512).unwrap_err(),
        TokenError::InvalidToken(InvalidTokenReason::UnsupportedAlgorithm)
    );

    let none = forge(json!({"alg": "none", "typ": "JWT"}), claims.clone(), SECRET);
    assert_eq!(
        service.verify(&none).unwrap_err(),
        TokenError::InvalidToken(InvalidTokenReason::UnsupportedAlgorithm)
    );

    let unsigned = format!(
        "{}.{}.",
        URL_SAFE_NO_PAD.encode(json!({"alg": "none"}).to_string()),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    );
    assert!(service.verify(&unsigned).unwrap_err().is_invalid());
}

#[test]
fn test_header_without_algorithm_is_malformed() {
    let service = create_test_service();
    let token = forge(json!({"typ": "JWT"}), valid_claims(&service), SECRET);

    assert_eq!(
        service.verify(&token).unwrap_err(),
        TokenError::InvalidToken(InvalidTokenReason::Malformed)
    );
}

#[test]
fn test_signed_claims_from_other_issuer_rejected() {
    let service = create_test_service();
    let mut claims = valid_claims(&service);
    claims["iss"] = json!("someone-else");

    let token = forge(json!({"alg": "HS256", "typ": "JWT"}), claims, SECRET);
    assert_eq!(
        service.verify(&token).unwrap_err(),
        TokenError::InvalidToken(InvalidTokenReason::InvalidClaims)
    );
}

#[test]
fn test_signed_claims_missing_keys_rejected() {
    let service = create_test_service();
    let mut claims = valid_claims(&service);
    claims.as_object_mut().unwrap().remove("email");

    let token = forge(json!({"alg": "HS256", "typ": "JWT"}), claims, SECRET);
    assert_eq!(
        service.verify(&token).unwrap_err(),
        TokenError::InvalidToken(InvalidTokenReason::InvalidClaims)
    );
}

#[test]
fn test_forged_signature_with_wrong_secret_rejected() {
    let service = create_test_service();
    let token = forge(
        json!({"alg": "HS256", "typ": "JWT"}),
        valid_claims(&service),
        "guessed-secret",
    );

    assert_eq!(
        service.verify(&token).unwrap_err(),
        TokenError::InvalidToken(InvalidTokenReason::InvalidSignature)
    );
}

#[test]
fn test_padded_signature_is_malformed() {
    let service = create_test_service();
    let token = service.issue(&Identity::new(1, "bob", "bob@x.com")).unwrap();

    assert_eq!(
        service.verify(&format!("{}=", token)).unwrap_err(),
        TokenError::InvalidToken(InvalidTokenReason::Malformed)
    );
}
