//! # bearer-jwt - Compact JWT Codec
//!
//! Builds and verifies compact JSON Web Tokens (RFC 7519) signed with HMAC
//! (`HS256`, `HS384`, `HS512`) or RSA PKCS#1 v1.5 (`RS256`).
//!
//! ## Key Features
//!
//! - **Strict wire format** - three unpadded base64url segments, nothing else
//! - **Constant-time HMAC verification** via `subtle`
//! - **Algorithm confusion protection** - "supported" (registry) and "allowed"
//!   (caller allow-list) are two independent, mandatory checks
//! - **Multi-key resolution** - select the verification key by header `kid`
//! - **Validity window** - `nbf`, `iat` and `exp` enforced after the signature
//! - **Typed failures** - every rejection reason is its own [`JwtError`] variant
//!
//! ## Architecture
//!
//! - [`base64url`] - unpadded URL-safe base64 used by every segment
//! - [`algorithm`] - immutable algorithm registry
//! - [`key`] - key material (secrets, PEM keys, key-id maps)
//! - [`signer`] / [`verifier`] - raw signature primitives
//! - [`codec`] - token encode/decode orchestration
//! - [`validation`] - decode-time configuration (allow-list, leeway, clock)
//! - [`assertion`] - OAuth 2.0 JWT-bearer assertion helpers (RFC 7523)
//!
//! ## Quick Start
//!
//! ```rust
//! use bearer_jwt::{Algorithm, Claims, Key, KeySource, decode, encode};
//!
//! let key = Key::from_secret("a-shared-secret-of-reasonable-length");
//! let claims = Claims::new()
//!     .with_claim("sub", "user-42")
//!     .with_expiration(4_102_444_800);
//!
//! let token = encode(&claims, &key, Algorithm::HS256, None)?;
//! let decoded = decode(&token, Some(KeySource::Single(&key)), &[Algorithm::HS256])?;
//!
//! assert_eq!(decoded.sub(), Some("user-42"));
//! # Ok::<(), bearer_jwt::JwtError>(())
//! ```
//!
//! ## Concurrency
//!
//! Every operation is synchronous and touches no shared mutable state, so all
//! entry points may be called from any number of threads at once.

pub mod algorithm;
pub mod assertion;
pub mod base64url;
pub mod claims;
pub mod codec;
pub mod error;
pub mod header;
pub mod key;
pub mod signer;
pub mod validation;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_keys;

pub use algorithm::{Algorithm, AlgorithmFamily, HashFunction, is_supported};
pub use assertion::{AssertionConfig, AssertionError, JwtBearerAssertion, parse_token_response};
pub use claims::Claims;
pub use codec::{decode, decode_header, decode_with, encode};
pub use error::JwtError;
pub use header::Header;
pub use key::{Key, KeySet, KeySource};
pub use signer::sign;
pub use validation::{Clock, Validation};
pub use verifier::verify;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, JwtError>;

/// Value of the `typ` header field on every token this crate produces
pub const JWT_TYPE: &str = "JWT";
