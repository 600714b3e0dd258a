//! Audio carrier handling.
//!
//! Exposes WAV audio as a flat run of 16-bit samples plus the format
//! parameters needed to write it back unchanged.

mod wav;

pub use wav::{AudioCarrier, AudioFormat};

#[cfg(test)]
pub(crate) use wav::sine_carrier;
