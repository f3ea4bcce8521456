//! Shared fixtures for integration tests
//!
//! RSA key generation dominates test time, so each test binary generates one
//! 2048-bit pair on first use and reuses it.

#![allow(dead_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use bearer_jwt::Key;
use once_cell::sync::Lazy;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;

/// PEM-encoded RSA key pair
pub struct RsaKeyPair {
    pub private_pem: String,
    pub public_pem: String,
}

impl RsaKeyPair {
    pub fn signing_key(&self) -> Key {
        Key::from_pem(&self.private_pem)
    }

    pub fn verifying_key(&self) -> Key {
        Key::from_pem(&self.public_pem)
    }
}

fn generate_rsa_keypair() -> RsaKeyPair {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate RSA key");
    let public_key = private_key.to_public_key();

    RsaKeyPair {
        private_pem: private_key
            .to_pkcs8_pem(LineEnding::LF)
            .expect("Failed to encode private key")
            .to_string(),
        public_pem: public_key
            .to_public_key_pem(LineEnding::LF)
            .expect("Failed to encode public key"),
    }
}

static RSA_KEYPAIR: Lazy<RsaKeyPair> = Lazy::new(generate_rsa_keypair);

/// The shared RSA key pair for this test binary
pub fn rsa_keypair() -> &'static RsaKeyPair {
    &RSA_KEYPAIR
}

/// HS256 secret long enough for any HMAC variant
pub fn test_secret() -> Key {
    Key::from_secret(b"test_secret_key_at_least_32_bytes_long_12345678")
}

/// Current Unix timestamp
pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs() as i64
}
