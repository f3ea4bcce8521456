//! Interoperability with the `jsonwebtoken` crate
//!
//! Tokens minted here must verify there and vice versa, for both the
//! symmetric and the RSA family.

mod common;

use bearer_jwt::{Algorithm, Claims, JwtError, KeySource, decode, encode};
use common::{current_timestamp, rsa_keypair, test_secret};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes_long_12345678";

fn sample_claims() -> Claims {
    let now = current_timestamp();
    Claims::new()
        .with_subject("user123")
        .with_issuer("https://auth.example.com")
        .with_issued_at(now)
        .with_expiration(now + 3600)
        .with_claim("scope", "read write")
}

fn external_validation(alg: jsonwebtoken::Algorithm) -> Validation {
    let mut validation = Validation::new(alg);
    validation.leeway = 0;
    validation.validate_aud = false;
    validation
}

/// Test: HS256 token from this crate verified by jsonwebtoken
#[test]
fn test_hs256_outbound() {
    // GIVEN: a token minted here
    let claims = sample_claims();
    let token = encode(&claims, &test_secret(), Algorithm::HS256, Some("k1")).unwrap();

    // WHEN: jsonwebtoken verifies it
    let data = jsonwebtoken::decode::<Value>(
        &token,
        &DecodingKey::from_secret(SECRET),
        &external_validation(jsonwebtoken::Algorithm::HS256),
    )
    .expect("jsonwebtoken should accept the token");

    // THEN: claims and header survive
    assert_eq!(data.claims, Value::Object(claims.into_map()));
    assert_eq!(data.header.kid.as_deref(), Some("k1"));
    assert_eq!(data.header.typ.as_deref(), Some("JWT"));
}

/// Test: HS512 token from jsonwebtoken verified here
#[test]
fn test_hs512_inbound() {
    let now = current_timestamp();
    let payload = json!({ "sub": "user123", "iat": now, "exp": now + 60 });
    let token = jsonwebtoken::encode(
        &Header::new(jsonwebtoken::Algorithm::HS512),
        &payload,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    let key = test_secret();
    let claims = decode(&token, Some(KeySource::Single(&key)), &[Algorithm::HS512]).unwrap();
    assert_eq!(Value::Object(claims.into_map()), payload);

    // the same token must not pass an HS256-only verifier
    assert_eq!(
        decode(&token, Some(KeySource::Single(&key)), &[Algorithm::HS256]).unwrap_err(),
        JwtError::AlgorithmNotAllowed { algorithm: Algorithm::HS512 }
    );
}

/// Test: RS256 token from this crate verified by jsonwebtoken
#[test]
fn test_rs256_outbound() {
    let pair = rsa_keypair();
    let claims = sample_claims();
    let token = encode(&claims, &pair.signing_key(), Algorithm::RS256, None).unwrap();

    let data = jsonwebtoken::decode::<Value>(
        &token,
        &DecodingKey::from_rsa_pem(pair.public_pem.as_bytes()).unwrap(),
        &external_validation(jsonwebtoken::Algorithm::RS256),
    )
    .expect("jsonwebtoken should accept the RS256 token");

    assert_eq!(data.claims["sub"], "user123");
    assert_eq!(data.claims["scope"], "read write");
}

/// Test: RS256 token from jsonwebtoken verified here
#[test]
fn test_rs256_inbound() {
    let pair = rsa_keypair();
    let now = current_timestamp();
    let payload = json!({ "sub": "service-a", "aud": ["api", "admin"], "exp": now + 60 });

    let mut header = Header::new(jsonwebtoken::Algorithm::RS256);
    header.kid = Some("rsa-1".to_string());
    let token = jsonwebtoken::encode(
        &header,
        &payload,
        &EncodingKey::from_rsa_pem(pair.private_pem.as_bytes()).unwrap(),
    )
    .unwrap();

    let key = pair.verifying_key();
    let claims = decode(&token, Some(KeySource::Single(&key)), &[Algorithm::RS256]).unwrap();
    assert_eq!(claims.sub(), Some("service-a"));
    assert_eq!(claims.audiences(), vec!["api", "admin"]);
}

/// Test: an expired external token is rejected after its signature verifies
#[test]
fn test_expired_inbound() {
    let now = current_timestamp();
    let payload = json!({ "sub": "user123", "exp": now - 10 });
    let token = jsonwebtoken::encode(
        &Header::new(jsonwebtoken::Algorithm::HS256),
        &payload,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    let key = test_secret();
    assert_eq!(
        decode(&token, Some(KeySource::Single(&key)), &[Algorithm::HS256]).unwrap_err(),
        JwtError::TokenExpired { expired_at: now - 10 }
    );
}
