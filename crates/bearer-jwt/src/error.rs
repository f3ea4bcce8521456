//! Error taxonomy for token encoding and decoding
//!
//! Each rejection reason is a distinct variant so callers can branch on the
//! failure kind (for example, log downgrade attempts separately from noise)
//! without matching on message text.

use thiserror::Error;

use crate::algorithm::Algorithm;

/// Errors produced by the codec, signer and verifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Wrong segment count, invalid base64url or invalid JSON
    #[error("malformed token: {reason}")]
    MalformedToken {
        /// What was wrong with the token structure
        reason: String,
    },

    /// The header carries no `alg` (or an empty one)
    #[error("token header has no algorithm")]
    MissingAlgorithm,

    /// The header names an algorithm absent from the registry
    #[error("unsupported algorithm: {algorithm}")]
    UnsupportedAlgorithm {
        /// Algorithm name as it appeared in the header
        algorithm: String,
    },

    /// The algorithm is supported but not in the caller's allow-list
    #[error("algorithm {algorithm} is not allowed")]
    AlgorithmNotAllowed {
        /// The rejected algorithm
        algorithm: Algorithm,
    },

    /// A key map was supplied but the header has no `kid`
    #[error("token header has no kid, unable to select a key")]
    KeyIdRequired,

    /// The header `kid` is not present in the supplied key map
    #[error("no key registered for kid '{kid}'")]
    UnknownKeyId {
        /// Key id from the token header
        kid: String,
    },

    /// The signature does not match the signing input
    #[error("signature verification failed")]
    SignatureInvalid,

    /// `nbf` or `iat` lies in the future
    #[error("token is not valid before {valid_from} (epoch seconds)")]
    TokenNotYetValid {
        /// Earliest epoch second at which the token is acceptable
        valid_from: i64,
    },

    /// `exp` has been reached
    #[error("token expired at {expired_at} (epoch seconds)")]
    TokenExpired {
        /// Expiry instant from the `exp` claim
        expired_at: i64,
    },

    /// The signing primitive rejected the key or input
    #[error("signing failed: {reason}")]
    SigningFailure {
        /// Description of the primitive failure
        reason: String,
    },

    /// The verification primitive could not run (not a mismatch)
    #[error("verification failed: {reason}")]
    VerificationFailure {
        /// Description of the primitive failure
        reason: String,
    },
}

impl JwtError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            reason: reason.into(),
        }
    }

    pub(crate) fn signing(reason: impl std::fmt::Display) -> Self {
        Self::SigningFailure {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn verification(reason: impl std::fmt::Display) -> Self {
        Self::VerificationFailure {
            reason: reason.to_string(),
        }
    }

    /// True for `TokenNotYetValid` and `TokenExpired`
    ///
    /// These are the only failures where a freshly issued token for the same
    /// subject could succeed.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::TokenNotYetValid { .. } | Self::TokenExpired { .. }
        )
    }

    /// True for the three ways the `alg` header can be rejected
    pub fn is_algorithm_rejection(&self) -> bool {
        matches!(
            self,
            Self::MissingAlgorithm
                | Self::UnsupportedAlgorithm { .. }
                | Self::AlgorithmNotAllowed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_includes_reason() {
        let err = JwtError::malformed("expected 3 segments, got 2");
        assert_eq!(
            err.to_string(),
            "malformed token: expected 3 segments, got 2"
        );
    }

    #[test]
    fn test_algorithm_not_allowed_display() {
        let err = JwtError::AlgorithmNotAllowed {
            algorithm: Algorithm::HS256,
        };
        assert_eq!(err.to_string(), "algorithm HS256 is not allowed");
    }

    #[test]
    fn test_unknown_key_id_display() {
        let err = JwtError::UnknownKeyId {
            kid: "k9".to_string(),
        };
        assert_eq!(err.to_string(), "no key registered for kid 'k9'");
    }

    #[test]
    fn test_temporal_classification() {
        assert!(JwtError::TokenExpired { expired_at: 1 }.is_temporal());
        assert!(JwtError::TokenNotYetValid { valid_from: 1 }.is_temporal());
        assert!(!JwtError::SignatureInvalid.is_temporal());
    }

    #[test]
    fn test_algorithm_rejection_classification() {
        assert!(JwtError::MissingAlgorithm.is_algorithm_rejection());
        assert!(
            JwtError::UnsupportedAlgorithm {
                algorithm: "none".to_string()
            }
            .is_algorithm_rejection()
        );
        assert!(!JwtError::KeyIdRequired.is_algorithm_rejection());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JwtError>();
    }
}
