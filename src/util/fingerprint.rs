// Key fingerprints for operator display

use sha2::{Digest, Sha256};

use crate::rsa::keygen::{RsaPrivateKey, RsaPublicKey};

/// Hex SHA-256 of `"{exponent}:{modulus}"`.
pub fn fingerprint(exponent: &impl ToString, modulus: &impl ToString) -> String {
    let mut hasher = Sha256::new();
    hasher.update(exponent.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(modulus.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

pub fn public_fingerprint(key: &RsaPublicKey) -> String {
    fingerprint(key.exponent(), key.modulus())
}

pub fn private_fingerprint(key: &RsaPrivateKey) -> String {
    fingerprint(key.exponent(), key.modulus())
}
