//! Covert Audio Channel
//!
//! Hides encrypted files in 16-bit PCM WAV audio using least-significant-bit
//! steganography, and produces QR-code hash watermarks that reveal whether a
//! carrier has been altered.
//!
//! # Features
//!
//! - **AES-256-CBC Encryption**: SHA-256 passphrase keys, fresh random IV per file
//! - **LSB Embedding**: one bit per sample, base64 text closed by a `###` marker
//! - **QR Watermarks**: SHA-256 of the whole container, rendered as a QR code
//! - **CLI Interface**: embed, extract, capacity, watermark and verify commands
//!
//! # Architecture
//!
//! ```text
//! filename||content → Encrypt (AES-256-CBC) → base64 → Embed (LSB) → WAV → Watermark (QR)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use audio_covert::channel::CovertChannel;
//!
//! let channel = CovertChannel::default();
//! let carrier = std::fs::read("carrier.wav").unwrap();
//!
//! // Hide a file
//! let stego = channel
//!     .embed(b"hello world", "notes.txt", "secret", &carrier)
//!     .unwrap();
//!
//! // Recover it
//! let payload = channel.extract("secret", &stego).unwrap();
//! assert_eq!(payload.filename, "notes.txt");
//! assert_eq!(payload.content, b"hello world");
//! ```

pub mod audio;
pub mod channel;
pub mod config;
pub mod crypto;
pub mod error;
pub mod stego;
pub mod watermark;

pub use channel::CovertChannel;
pub use config::ChannelConfig;
pub use crypto::Payload;
pub use error::{Error, Result};
