//! Raw signature production
//!
//! HMAC output is deterministic. RSA uses PKCS#1 v1.5 padding, which is
//! deterministic as well, so equal inputs always yield equal signatures.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use rsa::RsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer};
use sha2::{Sha256, Sha384, Sha512};

use crate::algorithm::{Algorithm, AlgorithmFamily, HashFunction};
use crate::key::Key;
use crate::{JwtError, Result};

/// Sign `message` with `key` under `alg`
///
/// # Errors
///
/// Returns [`JwtError::SigningFailure`] if an RSA key cannot be parsed as a
/// private key or the primitive rejects it (for example, a modulus too short
/// for the digest).
pub fn sign(message: &[u8], key: &Key, alg: Algorithm) -> Result<Vec<u8>> {
    let spec = alg.spec();
    match spec.family {
        AlgorithmFamily::Hmac => hmac_sign(message, key.as_bytes(), spec.hash),
        AlgorithmFamily::Rsa => {
            let private_key = key.rsa_private_key().map_err(JwtError::signing)?;
            rsa_sign(message, private_key, spec.hash)
        }
    }
}

/// Keyed hash of `message`, shared with the verifier
pub(crate) fn hmac_sign(message: &[u8], secret: &[u8], hash: HashFunction) -> Result<Vec<u8>> {
    match hash {
        HashFunction::Sha256 => mac::<Hmac<Sha256>>(message, secret),
        HashFunction::Sha384 => mac::<Hmac<Sha384>>(message, secret),
        HashFunction::Sha512 => mac::<Hmac<Sha512>>(message, secret),
    }
}

fn mac<M: Mac + KeyInit>(message: &[u8], secret: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret).map_err(JwtError::signing)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn rsa_sign(message: &[u8], private_key: RsaPrivateKey, hash: HashFunction) -> Result<Vec<u8>> {
    let signature = match hash {
        HashFunction::Sha256 => SigningKey::<Sha256>::new(private_key)
            .try_sign(message)
            .map(|s| s.to_vec()),
        HashFunction::Sha384 => SigningKey::<Sha384>::new(private_key)
            .try_sign(message)
            .map(|s| s.to_vec()),
        HashFunction::Sha512 => SigningKey::<Sha512>::new(private_key)
            .try_sign(message)
            .map(|s| s.to_vec()),
    };
    signature.map_err(JwtError::signing)
}
