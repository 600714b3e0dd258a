//! Passphrase to AES-256 key derivation.

use crate::config::KEY_SIZE;
use sha2::{Digest, Sha256};

/// A 256-bit symmetric key.
pub type SymmetricKey = [u8; KEY_SIZE];

/// Key derivation by a single SHA-256 pass over the passphrase.
///
/// There is no salt and no work factor: the same passphrase always yields
/// the same key, which is what lets a receiver recover the payload from the
/// passphrase alone. It also makes the key cheap to brute force.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDerivation;

impl KeyDerivation {
    /// Create a new KDF.
    pub fn new() -> Self {
        Self
    }

    /// Derive a 256-bit key from the UTF-8 bytes of a passphrase.
    pub fn derive_key(&self, passphrase: &str) -> SymmetricKey {
        Sha256::digest(passphrase.as_bytes()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let kdf = KeyDerivation::new();

        let key1 = kdf.derive_key("password123");
        let key2 = kdf.derive_key("password123");

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_different_passwords_different_keys() {
        let kdf = KeyDerivation::new();

        let key1 = kdf.derive_key("password1");
        let key2 = kdf.derive_key("password2");

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_known_digest() {
        // SHA-256("secret")
        let key = KeyDerivation::new().derive_key("secret");
        assert_eq!(
            hex::encode(key),
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }

    #[test]
    fn test_empty_passphrase() {
        // SHA-256("")
        let key = KeyDerivation::new().derive_key("");
        assert_eq!(
            hex::encode(key),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
