//! Salted one-way password hashing
//!
//! One round of SHA-256 over `password || salt`, both hex-encoded at rest.
//! The scheme is preserved for compatibility with existing account records.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Salt size in bytes before hex encoding
pub const SALT_SIZE: usize = 32;

/// Generate a fresh hex-encoded salt
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a password with a hex-encoded salt
pub fn hash_password(password: &str, salt_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt_hex.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_is_hex_of_expected_length() {
        let salt = generate_salt();
        assert_eq!(salt.len(), SALT_SIZE * 2);
        assert!(hex::decode(&salt).is_ok());
    }

    #[test]
    fn salts_are_unique() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn hash_depends_on_password_and_salt() {
        let salt = generate_salt();
        let hash = hash_password("hunter22", &salt);

        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_password("hunter22", &salt));
        assert_ne!(hash, hash_password("hunter23", &salt));
        assert_ne!(hash, hash_password("hunter22", &generate_salt()));
    }
}
