//! Tamper-evidence watermarks.
//!
//! The watermark is the SHA-256 of the complete audio container (header
//! included), hex encoded and rendered as a QR code. Verification recomputes
//! the digest and compares it with whatever the QR image decodes to. An
//! unreadable QR image and a digest mismatch both verify as `false`.

mod qr;

pub use qr::{PngQrBackend, QrBackend};

use crate::config::QrConfig;
use crate::error::Result;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Lowercase hex SHA-256 of the raw container bytes.
pub fn digest(audio: &[u8]) -> String {
    hex::encode(Sha256::digest(audio))
}

/// Creates and checks QR watermarks through a [`QrBackend`].
#[derive(Debug, Clone, Default)]
pub struct Watermarker<B: QrBackend = PngQrBackend> {
    backend: B,
}

impl Watermarker<PngQrBackend> {
    /// PNG watermarks with the given rendering settings.
    pub fn with_config(config: QrConfig) -> Self {
        Self::new(PngQrBackend::new(config))
    }
}

impl<B: QrBackend> Watermarker<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Render a digest string as a QR image.
    pub fn encode_to_qr(&self, digest: &str) -> Result<Vec<u8>> {
        self.backend.render(digest)
    }

    /// Digest the audio and render the result as a QR image.
    pub fn generate(&self, audio: &[u8]) -> Result<Vec<u8>> {
        let hash = digest(audio);
        debug!(audio_len = audio.len(), digest = %hash, "generating watermark");
        self.encode_to_qr(&hash)
    }

    /// True iff the QR image decodes to exactly the digest of `audio`.
    pub fn verify(&self, audio: &[u8], qr_image: &[u8]) -> bool {
        let expected = digest(audio);
        let found = self.backend.detect(qr_image).unwrap_or_default();
        let valid = expected == found;

        info!(valid, audio_len = audio.len(), "watermark verification");
        valid
    }
}
