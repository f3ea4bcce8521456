//! Compact token encoding and decoding
//!
//! Decoding runs a fixed sequence: structure, algorithm, key selection,
//! signature, validity window. Each stage fails with its own
//! [`JwtError`] variant and later stages never run after a failure.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::algorithm::Algorithm;
use crate::base64url;
use crate::claims::Claims;
use crate::header::Header;
use crate::key::{Key, KeySource};
use crate::signer::sign;
use crate::validation::Validation;
use crate::verifier::verify;
use crate::{JwtError, Result};

/// Build a signed compact token
///
/// The header is `{"typ":"JWT","alg":..}` plus `kid` when given. Claim values
/// are serialized as-is; nothing about them is validated here.
///
/// # Errors
///
/// [`JwtError::SigningFailure`] when the key cannot sign under `alg`.
pub fn encode(claims: &Claims, key: &Key, alg: Algorithm, key_id: Option<&str>) -> Result<String> {
    let header = Header::new(alg, key_id);
    let header_segment = encode_segment(&header)?;
    let claims_segment = encode_segment(claims)?;

    let mut token = format!("{header_segment}.{claims_segment}");
    let signature = sign(token.as_bytes(), key, alg)?;
    token.push('.');
    token.push_str(&base64url::encode(signature));

    debug!(alg = %alg, kid = key_id, "encoded token");
    Ok(token)
}

/// Decode a token, verifying it when key material is supplied
///
/// Shorthand for [`decode_with`] with no leeway and the system clock.
///
/// # Errors
///
/// See [`decode_with`].
pub fn decode(token: &str, keys: Option<KeySource<'_>>, allowed: &[Algorithm]) -> Result<Claims> {
    decode_with(token, keys, &Validation::new(allowed))
}

/// Decode a token under an explicit [`Validation`]
///
/// With `keys` set to `None` the claims are returned after structural parsing
/// only: no algorithm, signature or time checks run. Use that for inspection,
/// never for authorization.
///
/// # Errors
///
/// - [`JwtError::MalformedToken`]: wrong segment count, bad base64url or JSON,
///   non-numeric `exp`/`nbf`/`iat`
/// - [`JwtError::MissingAlgorithm`], [`JwtError::UnsupportedAlgorithm`],
///   [`JwtError::AlgorithmNotAllowed`]: header `alg` rejected
/// - [`JwtError::KeyIdRequired`], [`JwtError::UnknownKeyId`]: key map lookup
/// - [`JwtError::SignatureInvalid`]: signature mismatch
/// - [`JwtError::VerificationFailure`]: the key could not be used at all
/// - [`JwtError::TokenNotYetValid`], [`JwtError::TokenExpired`]: validity window
pub fn decode_with(
    token: &str,
    keys: Option<KeySource<'_>>,
    validation: &Validation,
) -> Result<Claims> {
    let parts = Parts::split(token)?;
    let header: Header = parse_segment(parts.header, "header")?;
    let claims: Claims = parse_segment(parts.claims, "claims")?;

    let Some(keys) = keys else {
        debug!(verified = false, "decoded token without verification");
        return Ok(claims);
    };

    let alg = header.algorithm()?;
    if !validation.allows(alg) {
        return Err(JwtError::AlgorithmNotAllowed { algorithm: alg });
    }

    let key = match (&header.kid, keys) {
        // A key map can only be indexed by a string kid
        (Some(kid), KeySource::ById(_)) if !kid.is_string() => {
            return Err(JwtError::UnknownKeyId {
                kid: kid.to_string(),
            });
        }
        _ => keys.resolve(header.kid())?,
    };

    let signature = base64url::decode(parts.signature)?;
    if !verify(parts.signing_input.as_bytes(), &signature, key, alg)? {
        return Err(JwtError::SignatureInvalid);
    }

    validation.check_validity_window(&claims)?;

    debug!(alg = %alg, kid = header.kid(), verified = true, "decoded token");
    Ok(claims)
}

/// Parse the header without verifying anything
///
/// Lets a caller pick key material (say, by `kid`) before calling [`decode`].
///
/// # Errors
///
/// [`JwtError::MalformedToken`] on a bad structure or header segment.
pub fn decode_header(token: &str) -> Result<Header> {
    let parts = Parts::split(token)?;
    parse_segment(parts.header, "header")
}

/// The three segments of a compact token, borrowed from the input
struct Parts<'a> {
    header: &'a str,
    claims: &'a str,
    signature: &'a str,
    /// `header "." claims`, exactly as received
    signing_input: &'a str,
}

impl<'a> Parts<'a> {
    fn split(token: &'a str) -> Result<Self> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, claims, signature] = segments[..] else {
            return Err(JwtError::malformed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        };

        let signing_input = &token[..header.len() + 1 + claims.len()];
        Ok(Self {
            header,
            claims,
            signature,
            signing_input,
        })
    }
}

fn encode_segment<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value).map_err(JwtError::signing)?;
    Ok(base64url::encode(json))
}

fn parse_segment<T: DeserializeOwned>(segment: &str, name: &str) -> Result<T> {
    let bytes = base64url::decode(segment)
        .map_err(|_| JwtError::malformed(format!("{name} segment is not valid base64url")))?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| JwtError::malformed(format!("{name} segment is not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(JwtError::malformed(format!(
            "{name} segment is not a JSON object"
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| JwtError::malformed(format!("invalid {name}: {e}")))
}
