//! AES-256-CBC encryption with PKCS#7 padding.
//!
//! Blob layout: IV (16 bytes) || ciphertext, base64-armoured for transport.
//! There is no authentication tag. A wrong key is detected only when the
//! padding fails to validate, so decryption can occasionally "succeed" with
//! garbage output.

use crate::config::BLOCK_SIZE;
use crate::crypto::kdf::{KeyDerivation, SymmetricKey};
use crate::error::{Error, Result};
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::{CryptoRng, RngCore};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES-256-CBC cipher wrapper.
pub struct Cipher {
    key: SymmetricKey,
}

impl Cipher {
    /// Create a new cipher from a derived key.
    pub fn new(key: SymmetricKey) -> Self {
        Self { key }
    }

    /// Create a cipher keyed by SHA-256 of the passphrase.
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::new(KeyDerivation::new().derive_key(passphrase))
    }

    /// Encrypt with a fresh IV drawn from `rng`.
    ///
    /// Returns: IV (16 bytes) || ciphertext
    pub fn encrypt<R: RngCore + CryptoRng>(&self, plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>> {
        let mut iv = [0u8; BLOCK_SIZE];
        rng.fill_bytes(&mut iv);
        self.encrypt_with_iv(plaintext, &iv)
    }

    /// Encrypt with a caller-supplied IV. The IV must never be reused with
    /// the same key outside of tests.
    pub fn encrypt_with_iv(&self, plaintext: &[u8], iv: &[u8; BLOCK_SIZE]) -> Result<Vec<u8>> {
        let ciphertext = Aes256CbcEnc::new_from_slices(&self.key, iv)
            .map_err(|e| Error::Encryption(e.to_string()))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut result = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
        result.extend_from_slice(iv);
        result.extend_from_slice(&ciphertext);

        Ok(result)
    }

    /// Decrypt a blob produced by `encrypt`.
    ///
    /// Expects: IV (16 bytes) || ciphertext (non-empty, block aligned)
    pub fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>> {
        if blob.len() < 2 * BLOCK_SIZE || blob.len() % BLOCK_SIZE != 0 {
            return Err(Error::BlobLength { len: blob.len() });
        }

        let (iv, ciphertext) = blob.split_at(BLOCK_SIZE);

        Aes256CbcDec::new_from_slices(&self.key, iv)
            .map_err(|_| Error::Decryption)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| Error::Decryption)
    }
}

/// Encrypt data with a passphrase, drawing the IV from the thread-local CSPRNG.
///
/// Returns the base64 text of IV || ciphertext.
pub fn encrypt_data(plaintext: &[u8], passphrase: &str) -> Result<String> {
    encrypt_data_with_rng(plaintext, passphrase, &mut rand::thread_rng())
}

/// Encrypt data with a passphrase and an explicit random source.
pub fn encrypt_data_with_rng<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    passphrase: &str,
    rng: &mut R,
) -> Result<String> {
    let blob = Cipher::from_passphrase(passphrase).encrypt(plaintext, rng)?;
    Ok(STANDARD.encode(blob))
}

/// Decrypt base64 text produced by `encrypt_data`.
pub fn decrypt_data(blob_text: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    let blob = STANDARD.decode(blob_text)?;
    Cipher::from_passphrase(passphrase).decrypt(&blob)
}
