//! LSB embedding of a base64-armoured message.

use crate::audio::AudioCarrier;
use crate::config::{BITS_PER_CHAR, TERMINATOR};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

/// Build the text written into the carrier: base64(blob) followed by `###`.
pub fn encode_message(blob: &[u8]) -> Vec<u8> {
    let mut message = STANDARD.encode(blob).into_bytes();
    message.extend_from_slice(TERMINATOR);
    message
}

/// Expand a message into bits, most significant bit first.
fn message_bits(message: &[u8]) -> impl Iterator<Item = i16> + '_ {
    message
        .iter()
        .flat_map(|&byte| (0..BITS_PER_CHAR).rev().map(move |shift| ((byte >> shift) & 1) as i16))
}

/// Hide `blob` in the least significant bits of the carrier's samples.
///
/// One bit goes into each sample, in order. Samples past the end of the
/// message and every bit above the LSB are left as they were.
///
/// # Errors
///
/// `InsufficientCapacity` when the framed message needs more bits than the
/// carrier has samples. The input carrier is never modified.
///
/// # Example
///
/// ```
/// use audio_covert::audio::{AudioCarrier, AudioFormat};
/// use audio_covert::stego::{embed, extract};
///
/// let carrier = AudioCarrier::new(AudioFormat::mono(8000), vec![0i16; 1000]);
/// let stego = embed(&carrier, b"hidden").unwrap();
///
/// assert_eq!(extract(&stego).unwrap(), b"hidden");
/// ```
pub fn embed(carrier: &AudioCarrier, blob: &[u8]) -> Result<AudioCarrier> {
    let message = encode_message(blob);
    let needed = message.len() * BITS_PER_CHAR;
    let available = carrier.sample_count();

    if needed > available {
        return Err(Error::InsufficientCapacity { needed, available });
    }

    let mut samples = carrier.samples().to_vec();
    for (sample, bit) in samples.iter_mut().zip(message_bits(&message)) {
        *sample = (*sample & !1) | bit;
    }

    debug!(
        blob_len = blob.len(),
        message_len = message.len(),
        bits = needed,
        available,
        "embedded message into carrier"
    );

    Ok(carrier.with_samples(samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{sine_carrier, AudioFormat};
    use crate::stego::framed_bit_len;

    #[test]
    fn test_encode_message_appends_terminator() {
        assert_eq!(encode_message(b"hi"), b"aGk=###");
        assert_eq!(encode_message(b""), b"###");
    }

    #[test]
    fn test_bits_msb_first() {
        let bits: Vec<i16> = message_bits(b"A").collect();
        // 'A' = 0x41 = 0100_0001
        assert_eq!(bits, vec![0, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_only_lsb_changes() {
        let carrier = sine_carrier(AudioFormat::mono(8000), 4000);
        let blob = b"some hidden bytes";
        let stego = embed(&carrier, blob).unwrap();

        let used = framed_bit_len(blob.len());
        for (i, (before, after)) in carrier.samples().iter().zip(stego.samples()).enumerate() {
            assert_eq!(before & !1, after & !1, "upper bits changed at sample {}", i);
            if i >= used {
                assert_eq!(before, after, "sample {} past the message changed", i);
            }
        }
        assert_eq!(stego.format(), carrier.format());
        assert_eq!(stego.sample_count(), carrier.sample_count());
    }

    #[test]
    fn test_negative_samples_keep_sign() {
        let carrier = AudioCarrier::new(AudioFormat::mono(8000), vec![-1i16; 64]);
        let stego = embed(&carrier, b"").unwrap();
        // "###" = 0x23 = 0010_0011 repeated
        let expected: Vec<i16> = [0, 0, 1, 0, 0, 0, 1, 1]
            .iter()
            .cycle()
            .take(24)
            .map(|&bit| if bit == 1 { -1 } else { -2 })
            .collect();
        assert_eq!(&stego.samples()[..24], expected.as_slice());
        assert!(stego.samples()[24..].iter().all(|&s| s == -1));
    }

    #[test]
    fn test_audio_too_short() {
        let carrier = sine_carrier(AudioFormat::mono(8000), 100);
        let result = embed(&carrier, &[0u8; 1000]);
        assert!(matches!(
            result,
            Err(Error::InsufficientCapacity { available: 100, .. })
        ));
    }
}
