//! Signature verification
//!
//! `Ok(false)` means the signature does not match. `Err` is reserved for
//! faults that prevent a verdict, such as an RSA key that does not parse.

use rsa::RsaPublicKey;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::algorithm::{Algorithm, AlgorithmFamily, HashFunction};
use crate::key::Key;
use crate::signer::hmac_sign;
use crate::{JwtError, Result};

/// Check `signature` over `message` with `key` under `alg`
///
/// HMAC signatures are recomputed and compared in constant time. RSA
/// signatures are checked against the public key (a PEM private key is
/// accepted and its public half used).
///
/// # Errors
///
/// Returns [`JwtError::VerificationFailure`] if an RSA key cannot be parsed.
pub fn verify(message: &[u8], signature: &[u8], key: &Key, alg: Algorithm) -> Result<bool> {
    let spec = alg.spec();
    match spec.family {
        AlgorithmFamily::Hmac => {
            let expected =
                hmac_sign(message, key.as_bytes(), spec.hash).map_err(JwtError::verification)?;
            Ok(constant_time_eq(&expected, signature))
        }
        AlgorithmFamily::Rsa => {
            let public_key = key.rsa_public_key().map_err(JwtError::verification)?;
            Ok(rsa_verify(message, signature, public_key, spec.hash))
        }
    }
}

/// Constant-time byte comparison
///
/// Length is not secret (it is fixed by the algorithm), so a length mismatch
/// returns early; equal-length inputs are compared without data-dependent
/// branches via `subtle`.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

fn rsa_verify(
    message: &[u8],
    signature: &[u8],
    public_key: RsaPublicKey,
    hash: HashFunction,
) -> bool {
    // Bytes that do not even parse as a signature cannot match
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };
    match hash {
        HashFunction::Sha256 => VerifyingKey::<Sha256>::new(public_key)
            .verify(message, &signature)
            .is_ok(),
        HashFunction::Sha384 => VerifyingKey::<Sha384>::new(public_key)
            .verify(message, &signature)
            .is_ok(),
        HashFunction::Sha512 => VerifyingKey::<Sha512>::new(public_key)
            .verify(message, &signature)
            .is_ok(),
    }
}
