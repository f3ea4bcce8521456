//! Unpadded URL-safe base64 (RFC 4648 §5) for token segments
//!
//! Output never carries `=` padding. Input is accepted with or without
//! padding; anything else (foreign characters, a length of `4n + 1`,
//! non-canonical trailing bits) is a recoverable [`JwtError::MalformedToken`].

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::{JwtError, Result};

/// URL-safe engine: never pads on encode, tolerates padding on decode
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as unpadded base64url
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_LENIENT.encode(input)
}

/// Decode base64url, restoring any stripped padding
///
/// # Errors
///
/// Returns [`JwtError::MalformedToken`] on characters outside the URL-safe
/// alphabet or an impossible input length.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    URL_SAFE_LENIENT
        .decode(input)
        .map_err(|e| JwtError::malformed(format!("invalid base64url: {e}")))
}
