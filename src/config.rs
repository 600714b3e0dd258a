//! Configuration constants and types for the covert audio channel.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// AES block size, also the IV length.
pub const BLOCK_SIZE: usize = 16;

/// AES-256 key length in bytes.
pub const KEY_SIZE: usize = 32;

/// Separator between the original filename and the file content.
pub const FILENAME_DELIMITER: &[u8] = b"||";

/// End marker appended to the base64 text written into the carrier.
pub const TERMINATOR: &[u8] = b"###";

/// Carrier bits consumed per hidden character.
pub const BITS_PER_CHAR: usize = 8;

/// Only 16-bit integer PCM carriers are accepted.
pub const SAMPLE_WIDTH_BYTES: u16 = 2;

/// Default upper bound on the size of a file to hide (1 MB).
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 1_000_000;

/// QR rendering defaults.
pub mod qr_params {
    /// Pixels per QR module.
    pub const MODULE_SIZE: u32 = 10;

    /// Smallest module size that still decodes reliably.
    pub const MIN_MODULE_SIZE: u32 = 2;
}

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QrErrorCorrection {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

impl From<QrErrorCorrection> for qrcode::EcLevel {
    fn from(level: QrErrorCorrection) -> Self {
        match level {
            QrErrorCorrection::Low => qrcode::EcLevel::L,
            QrErrorCorrection::Medium => qrcode::EcLevel::M,
            QrErrorCorrection::Quartile => qrcode::EcLevel::Q,
            QrErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

/// Configuration for rendering watermark QR images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// Pixels per module.
    pub module_size: u32,

    /// Surround the code with the standard four-module quiet zone.
    pub quiet_zone: bool,

    /// Error correction level.
    pub ec_level: QrErrorCorrection,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            module_size: qr_params::MODULE_SIZE,
            quiet_zone: true,
            ec_level: QrErrorCorrection::Medium,
        }
    }
}

/// Configuration for a [`CovertChannel`](crate::channel::CovertChannel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Largest file accepted for embedding. `None` disables the check.
    pub max_payload_size: Option<usize>,

    /// Watermark QR rendering.
    pub qr: QrConfig,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            max_payload_size: Some(DEFAULT_MAX_PAYLOAD_SIZE),
            qr: QrConfig::default(),
        }
    }
}

impl ChannelConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_payload_size == Some(0) {
            return Err(Error::Config(
                "max_payload_size must be greater than 0".to_string(),
            ));
        }
        if self.qr.module_size < qr_params::MIN_MODULE_SIZE {
            return Err(Error::Config(format!(
                "QR module size must be at least {}",
                qr_params::MIN_MODULE_SIZE
            )));
        }
        Ok(())
    }
}
