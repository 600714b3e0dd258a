//! Cryptographic operations for the covert channel.
//!
//! This module provides:
//! - SHA-256 passphrase key derivation
//! - AES-256-CBC encryption with PKCS#7 padding
//! - Filename/content payload framing

mod cipher;
mod kdf;
mod payload;

pub use cipher::{decrypt_data, encrypt_data, encrypt_data_with_rng, Cipher};
pub use kdf::{KeyDerivation, SymmetricKey};
pub use payload::Payload;
