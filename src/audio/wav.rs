//! 16-bit PCM WAV carriers.

use crate::config::SAMPLE_WIDTH_BYTES;
use crate::error::{Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use serde::Serialize;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

/// Format parameters preserved across embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioFormat {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Bytes per sample (always 2).
    pub sample_width: u16,
    /// Frames per second.
    pub frame_rate: u32,
}

impl AudioFormat {
    /// Mono 16-bit PCM at the given rate.
    pub fn mono(frame_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_width: SAMPLE_WIDTH_BYTES,
            frame_rate,
        }
    }

    fn to_spec(self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.frame_rate,
            bits_per_sample: self.sample_width * 8,
            sample_format: SampleFormat::Int,
        }
    }
}

/// A flat, channel-interleaved sequence of 16-bit samples plus its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCarrier {
    format: AudioFormat,
    samples: Vec<i16>,
}

impl AudioCarrier {
    /// Build a carrier from raw samples.
    pub fn new(format: AudioFormat, samples: Vec<i16>) -> Self {
        Self { format, samples }
    }

    /// Parse a WAV container held in memory.
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self> {
        let reader = WavReader::new(Cursor::new(bytes))?;
        Self::from_reader(reader)
    }

    fn from_reader<R: Read + Seek>(reader: WavReader<R>) -> Result<Self> {
        let spec = reader.spec();

        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(Error::UnsupportedFormat(format!(
                "only 16-bit PCM WAV is supported, got {} bits {:?}",
                spec.bits_per_sample, spec.sample_format
            )));
        }

        let samples = reader
            .into_samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(
            channels = spec.channels,
            frame_rate = spec.sample_rate,
            samples = samples.len(),
            "parsed WAV carrier"
        );

        Ok(Self {
            format: AudioFormat {
                channels: spec.channels,
                sample_width: SAMPLE_WIDTH_BYTES,
                frame_rate: spec.sample_rate,
            },
            samples,
        })
    }

    /// Serialize back to a WAV container with the same format parameters.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut writer = WavWriter::new(Cursor::new(&mut bytes), self.format.to_spec())?;
            for sample in &self.samples {
                writer.write_sample(*sample)?;
            }
            writer.finalize()?;
        }
        Ok(bytes)
    }

    /// Write the carrier to a WAV file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_wav_bytes()?)?;
        Ok(())
    }

    /// A carrier with the same format and different samples.
    pub fn with_samples(&self, samples: Vec<i16>) -> Self {
        Self {
            format: self.format,
            samples,
        }
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Total samples across all channels.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Samples per channel.
    pub fn frame_count(&self) -> usize {
        match self.format.channels {
            0 => 0,
            channels => self.samples.len() / channels as usize,
        }
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.format.frame_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.format.frame_rate as f64
    }
}

/// Creates a sine-wave test carrier.
#[cfg(test)]
pub(crate) fn sine_carrier(format: AudioFormat, sample_count: usize) -> AudioCarrier {
    let samples: Vec<i16> = (0..sample_count)
        .map(|i| {
            let t = i as f64 / format.frame_rate as f64;
            (f64::sin(2.0 * std::f64::consts::PI * 440.0 * t) * 16000.0) as i16
        })
        .collect();
    AudioCarrier::new(format, samples)
}
