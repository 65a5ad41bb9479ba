//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives encryption keys from user passwords. Derivation is deterministic
//! for a given (password, salt) pair; a fresh salt is generated for every
//! encryption, so the same password never reuses a key across writes.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Iteration count for PBKDF2
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// A derived encryption key
pub struct DerivedKey {
    /// The 32-byte key for AES-256
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        // Zero out the key when dropped
        self.key.iter_mut().for_each(|b| *b = 0);
    }
}

/// Derive an encryption key from a password and salt
///
/// An empty password is accepted here; it simply produces a key that will
/// fail to decrypt anything sealed under a different password.
pub fn derive_key(password: &str, salt: &[u8]) -> DerivedKey {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_deterministic() {
        let salt = [7u8; 16];
        let key1 = derive_key("test_password", &salt);
        let key2 = derive_key("test_password", &salt);
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let salt = [7u8; 16];
        let key1 = derive_key("password1", &salt);
        let key2 = derive_key("password2", &salt);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("same_password", &[1u8; 16]);
        let key2 = derive_key("same_password", &[2u8; 16]);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_password_accepted() {
        let key = derive_key("", &[0u8; 16]);
        assert_eq!(key.as_bytes().len(), KEY_LEN);
    }
}
