//! Algorithm registry
//!
//! A compile-time table binding each algorithm identifier to exactly one
//! signing family and hash function. Membership in [`REGISTRY`] is what
//! "supported" means; whether a caller *allows* an algorithm is decided
//! separately by [`crate::Validation`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::JwtError;

/// JWS algorithms understood by this crate (RFC 7518 §3.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// HMAC with SHA-256
    #[serde(rename = "HS256")]
    HS256,

    /// HMAC with SHA-384
    #[serde(rename = "HS384")]
    HS384,

    /// HMAC with SHA-512
    #[serde(rename = "HS512")]
    HS512,

    /// RSASSA-PKCS1-v1_5 with SHA-256
    #[serde(rename = "RS256")]
    RS256,
}

/// Signature scheme family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// Symmetric keyed hash, shared secret
    Hmac,
    /// Asymmetric signature, PEM private/public key pair
    Rsa,
}

/// Digest used by an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFunction {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashFunction {
    /// Digest length in bytes
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

/// One registry row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmSpec {
    /// Algorithm identifier
    pub algorithm: Algorithm,
    /// Signing family
    pub family: AlgorithmFamily,
    /// Hash function fed to the family primitive
    pub hash: HashFunction,
}

/// Supported algorithms, in declaration order of [`Algorithm`]
pub static REGISTRY: [AlgorithmSpec; 4] = [
    AlgorithmSpec {
        algorithm: Algorithm::HS256,
        family: AlgorithmFamily::Hmac,
        hash: HashFunction::Sha256,
    },
    AlgorithmSpec {
        algorithm: Algorithm::HS384,
        family: AlgorithmFamily::Hmac,
        hash: HashFunction::Sha384,
    },
    AlgorithmSpec {
        algorithm: Algorithm::HS512,
        family: AlgorithmFamily::Hmac,
        hash: HashFunction::Sha512,
    },
    AlgorithmSpec {
        algorithm: Algorithm::RS256,
        family: AlgorithmFamily::Rsa,
        hash: HashFunction::Sha256,
    },
];

/// Find the registry row for an algorithm name (case-sensitive)
pub fn lookup(name: &str) -> Option<&'static AlgorithmSpec> {
    REGISTRY
        .iter()
        .find(|spec| spec.algorithm.as_str() == name)
}

/// Whether `name` is a registered algorithm
pub fn is_supported(name: &str) -> bool {
    lookup(name).is_some()
}

impl Algorithm {
    /// Every supported algorithm
    pub const ALL: [Algorithm; 4] = [Self::HS256, Self::HS384, Self::HS512, Self::RS256];

    /// Name as it appears in the `alg` header
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
            Self::RS256 => "RS256",
        }
    }

    /// Registry row for this algorithm
    pub fn spec(self) -> &'static AlgorithmSpec {
        let index = match self {
            Self::HS256 => 0,
            Self::HS384 => 1,
            Self::HS512 => 2,
            Self::RS256 => 3,
        };
        &REGISTRY[index]
    }

    /// Signing family from the registry
    pub fn family(self) -> AlgorithmFamily {
        self.spec().family
    }

    /// Hash function from the registry
    pub fn hash(self) -> HashFunction {
        self.spec().hash
    }

    /// Whether signing and verification share one secret
    pub fn is_symmetric(self) -> bool {
        self.family() == AlgorithmFamily::Hmac
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s)
            .map(|spec| spec.algorithm)
            .ok_or_else(|| JwtError::UnsupportedAlgorithm {
                algorithm: s.to_string(),
            })
    }
}
