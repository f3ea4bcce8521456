//! Key material
//!
//! A [`Key`] is opaque bytes: an HMAC secret, or a PEM document for RSA.
//! Bytes are zeroized on drop and never appear in `Debug` output. Keys are
//! borrowed for a single call; nothing in this crate retains them.

use std::collections::HashMap;
use std::fmt;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::{JwtError, Result};

/// Secret or PEM-encoded key bytes
#[derive(Clone)]
pub struct Key {
    bytes: Zeroizing<Vec<u8>>,
}

impl Key {
    /// Shared secret for the HMAC family
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: Zeroizing::new(secret.as_ref().to_vec()),
        }
    }

    /// PEM document for the RSA family
    ///
    /// Private keys may be PKCS#8 (`BEGIN PRIVATE KEY`) or PKCS#1
    /// (`BEGIN RSA PRIVATE KEY`); public keys may be SPKI (`BEGIN PUBLIC KEY`)
    /// or PKCS#1 (`BEGIN RSA PUBLIC KEY`). Parsing is deferred to first use.
    pub fn from_pem(pem: impl AsRef<[u8]>) -> Self {
        Self::from_secret(pem)
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn pem_str(&self) -> std::result::Result<&str, String> {
        std::str::from_utf8(&self.bytes).map_err(|_| "key is not UTF-8 PEM text".to_string())
    }

    /// Parse as an RSA private key
    pub(crate) fn rsa_private_key(&self) -> std::result::Result<RsaPrivateKey, String> {
        let pem = self.pem_str()?;
        RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| format!("invalid RSA private key: {e}"))
    }

    /// Parse as an RSA public key, deriving it from a private key if needed
    pub(crate) fn rsa_public_key(&self) -> std::result::Result<RsaPublicKey, String> {
        let pem = self.pem_str()?;
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .or_else(|_| self.rsa_private_key().map(|key| key.to_public_key()))
            .map_err(|_| "invalid RSA public key".to_string())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key").field("bytes", &"[REDACTED]").finish()
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::from_secret(value)
    }
}

impl From<&[u8]> for Key {
    fn from(value: &[u8]) -> Self {
        Self::from_secret(value)
    }
}

impl From<Vec<u8>> for Key {
    fn from(value: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(value),
        }
    }
}

/// Keys indexed by `kid`
pub type KeySet = HashMap<String, Key>;

/// Verification key material for one decode call
#[derive(Debug, Clone, Copy)]
pub enum KeySource<'a> {
    /// Use this key regardless of the header `kid`
    Single(&'a Key),
    /// Select the key named by the header `kid`
    ById(&'a KeySet),
}

impl<'a> KeySource<'a> {
    /// Pick the verification key for a token carrying `kid`
    ///
    /// # Errors
    ///
    /// For a key map: [`JwtError::KeyIdRequired`] when `kid` is absent,
    /// [`JwtError::UnknownKeyId`] when it is not in the map.
    pub fn resolve(self, kid: Option<&str>) -> Result<&'a Key> {
        match self {
            Self::Single(key) => Ok(key),
            Self::ById(keys) => {
                let kid = kid.ok_or(JwtError::KeyIdRequired)?;
                keys.get(kid).ok_or_else(|| JwtError::UnknownKeyId {
                    kid: kid.to_string(),
                })
            }
        }
    }
}

impl<'a> From<&'a Key> for KeySource<'a> {
    fn from(key: &'a Key) -> Self {
        Self::Single(key)
    }
}

impl<'a> From<&'a KeySet> for KeySource<'a> {
    fn from(keys: &'a KeySet) -> Self {
        Self::ById(keys)
    }
}
