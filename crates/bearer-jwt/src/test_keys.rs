//! RSA fixtures shared by unit tests
//!
//! Key generation is slow, so one 2048-bit pair is generated per test binary.

use once_cell::sync::Lazy;
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

pub(crate) struct RsaPems {
    pub private_pkcs8: String,
    pub private_pkcs1: String,
    pub public_spki: String,
    pub public_pkcs1: String,
}

static PEMS: Lazy<RsaPems> = Lazy::new(|| {
    let private_key =
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("RSA key generation");
    let public_key = RsaPublicKey::from(&private_key);

    RsaPems {
        private_pkcs8: private_key
            .to_pkcs8_pem(LineEnding::LF)
            .expect("PKCS#8 encoding")
            .to_string(),
        private_pkcs1: private_key
            .to_pkcs1_pem(LineEnding::LF)
            .expect("PKCS#1 encoding")
            .to_string(),
        public_spki: public_key
            .to_public_key_pem(LineEnding::LF)
            .expect("SPKI encoding"),
        public_pkcs1: public_key
            .to_pkcs1_pem(LineEnding::LF)
            .expect("PKCS#1 encoding"),
    }
});

pub(crate) fn rsa_pems() -> &'static RsaPems {
    &PEMS
}

/// A second, unrelated key pair for wrong-key scenarios
static OTHER_PUBLIC: Lazy<String> = Lazy::new(|| {
    let private_key =
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("RSA key generation");
    RsaPublicKey::from(&private_key)
        .to_public_key_pem(LineEnding::LF)
        .expect("SPKI encoding")
});

pub(crate) fn other_public_pem() -> &'static str {
    &OTHER_PUBLIC
}
