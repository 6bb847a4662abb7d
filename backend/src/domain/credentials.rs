//! Salted credential digests.
//!
//! Stored form is `salt$digest` where both halves are lowercase hex and the
//! digest is SHA-256 over `salt || password`. The salt is 16 random bytes per
//! credential so identical passwords never share a stored value.

use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

fn digest_with_salt(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt_hex = hex::encode(salt);
    let digest = digest_with_salt(&salt_hex, password);
    format!("{salt_hex}${digest}")
}

/// Verify a password against a stored `salt$digest` value.
///
/// Malformed stored values verify as false rather than erroring; a corrupt
/// digest must never authenticate anyone.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest)) = stored.split_once('$') else {
        return false;
    };
    digest_with_salt(salt_hex, password) == digest
}
