//! Channel operations - the main interface.

use crate::audio::AudioCarrier;
use crate::channel::types::{CapacityReport, EmbedOutput};
use crate::config::{ChannelConfig, BLOCK_SIZE, FILENAME_DELIMITER};
use crate::crypto::{decrypt_data, encrypt_data_with_rng, Payload};
use crate::error::{Error, Result};
use crate::stego::{self, base64_len, framed_bit_len};
use crate::watermark::Watermarker;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info};

/// Hides files in audio carriers and watermarks the results.
///
/// Holds only configuration, so one instance can serve any number of
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct CovertChannel {
    config: ChannelConfig,
    watermarker: Watermarker,
}

impl Default for CovertChannel {
    fn default() -> Self {
        let config = ChannelConfig::default();
        let watermarker = Watermarker::with_config(config.qr.clone());
        Self {
            config,
            watermarker,
        }
    }
}

impl CovertChannel {
    /// Create a channel with a validated configuration.
    pub fn new(config: ChannelConfig) -> Result<Self> {
        config.validate()?;
        let watermarker = Watermarker::with_config(config.qr.clone());
        Ok(Self {
            config,
            watermarker,
        })
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Encrypt `payload` under `passphrase` and hide it in the WAV carrier.
    ///
    /// # Arguments
    ///
    /// * `payload` - File content to hide
    /// * `filename` - Name the file is restored under
    /// * `passphrase` - Encryption passphrase
    /// * `carrier_wav` - 16-bit PCM WAV bytes
    ///
    /// # Returns
    ///
    /// WAV bytes of the modified carrier, same format as the input.
    pub fn embed(
        &self,
        payload: &[u8],
        filename: &str,
        passphrase: &str,
        carrier_wav: &[u8],
    ) -> Result<Vec<u8>> {
        self.embed_with_rng(
            payload,
            filename,
            passphrase,
            carrier_wav,
            &mut rand::thread_rng(),
        )
    }

    /// [`embed`](Self::embed) with an explicit IV source.
    pub fn embed_with_rng<R: RngCore + CryptoRng>(
        &self,
        payload: &[u8],
        filename: &str,
        passphrase: &str,
        carrier_wav: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        if let Some(max) = self.config.max_payload_size {
            if payload.len() > max {
                return Err(Error::PayloadTooLarge {
                    size: payload.len(),
                    max,
                });
            }
        }

        let carrier = AudioCarrier::from_wav_bytes(carrier_wav)?;
        let framed = Payload::new(filename, payload).frame()?;
        let armoured = encrypt_data_with_rng(&framed, passphrase, rng)?;
        let stego = stego::embed(&carrier, armoured.as_bytes())?;

        info!(
            filename,
            payload_len = payload.len(),
            samples = carrier.sample_count(),
            "hid file in carrier"
        );

        stego.to_wav_bytes()
    }

    /// Embed, then watermark the modified carrier.
    pub fn embed_with_watermark(
        &self,
        payload: &[u8],
        filename: &str,
        passphrase: &str,
        carrier_wav: &[u8],
    ) -> Result<EmbedOutput> {
        let audio = self.embed(payload, filename, passphrase, carrier_wav)?;
        let watermark = self.watermarker.generate(&audio)?;
        Ok(EmbedOutput { audio, watermark })
    }

    /// Recover the hidden file from a WAV carrier.
    ///
    /// A wrong passphrase usually fails with `Decryption`, but can
    /// occasionally get past the padding check and come back as a
    /// `MissingDelimiter` error or a wrong file.
    pub fn extract(&self, passphrase: &str, carrier_wav: &[u8]) -> Result<Payload> {
        let carrier = AudioCarrier::from_wav_bytes(carrier_wav)?;
        let armoured = stego::extract(&carrier)?;
        let framed = decrypt_data(&armoured, passphrase)?;
        let payload = Payload::split(&framed)?;

        info!(
            filename = %payload.filename,
            payload_len = payload.content.len(),
            "recovered file from carrier"
        );

        Ok(payload)
    }

    /// `samples / 8` for the WAV carrier.
    pub fn compute_capacity(&self, carrier_wav: &[u8]) -> Result<usize> {
        let carrier = AudioCarrier::from_wav_bytes(carrier_wav)?;
        Ok(stego::capacity(&carrier))
    }

    /// Capacity plus format details of the WAV carrier.
    pub fn capacity_report(&self, carrier_wav: &[u8]) -> Result<CapacityReport> {
        let carrier = AudioCarrier::from_wav_bytes(carrier_wav)?;
        Ok(CapacityReport {
            format: carrier.format(),
            samples: carrier.sample_count(),
            frame_count: carrier.frame_count(),
            duration_secs: carrier.duration_secs(),
            capacity_bytes: stego::capacity(&carrier),
        })
    }

    /// Exact number of carrier samples [`embed`](Self::embed) needs for a
    /// file of `payload_len` bytes named `filename`.
    pub fn required_samples(&self, payload_len: usize, filename: &str) -> usize {
        let framed_len = filename.len() + FILENAME_DELIMITER.len() + payload_len;
        let ciphertext_len = (framed_len / BLOCK_SIZE + 1) * BLOCK_SIZE;
        let armoured_len = base64_len(BLOCK_SIZE + ciphertext_len);
        let needed = framed_bit_len(armoured_len);
        debug!(payload_len, framed_len, armoured_len, needed, "computed required samples");
        needed
    }

    /// QR image of the SHA-256 of the WAV bytes.
    pub fn generate_watermark(&self, carrier_wav: &[u8]) -> Result<Vec<u8>> {
        self.watermarker.generate(carrier_wav)
    }

    /// True iff `qr_image` holds the SHA-256 of `carrier_wav`.
    pub fn verify_watermark(&self, carrier_wav: &[u8], qr_image: &[u8]) -> bool {
        self.watermarker.verify(carrier_wav, qr_image)
    }
}

/// Embed with the default configuration.
pub fn embed(payload: &[u8], filename: &str, passphrase: &str, carrier_wav: &[u8]) -> Result<Vec<u8>> {
    CovertChannel::default().embed(payload, filename, passphrase, carrier_wav)
}

/// Extract with the default configuration.
pub fn extract(passphrase: &str, carrier_wav: &[u8]) -> Result<Payload> {
    CovertChannel::default().extract(passphrase, carrier_wav)
}

/// Capacity of a WAV carrier.
pub fn compute_capacity(carrier_wav: &[u8]) -> Result<usize> {
    CovertChannel::default().compute_capacity(carrier_wav)
}

/// Watermark with the default QR settings.
pub fn generate_watermark(carrier_wav: &[u8]) -> Result<Vec<u8>> {
    CovertChannel::default().generate_watermark(carrier_wav)
}

/// Verify with the default QR backend.
pub fn verify_watermark(carrier_wav: &[u8], qr_image: &[u8]) -> bool {
    CovertChannel::default().verify_watermark(carrier_wav, qr_image)
}
