//! Result types returned by channel operations.

use crate::audio::AudioFormat;
use serde::Serialize;

/// A carrier with a hidden file, plus the watermark of that carrier.
#[derive(Debug, Clone)]
pub struct EmbedOutput {
    /// WAV bytes of the modified carrier.
    pub audio: Vec<u8>,
    /// PNG QR code of the modified carrier's SHA-256.
    pub watermark: Vec<u8>,
}

/// How much a carrier can hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityReport {
    /// Format parameters of the carrier.
    pub format: AudioFormat,
    /// Total samples across all channels.
    pub samples: usize,
    /// Samples per channel.
    pub frame_count: usize,
    /// Length in seconds.
    pub duration_secs: f64,
    /// `samples / 8`, ignoring the end marker.
    pub capacity_bytes: usize,
}
