//! Least-significant-bit audio steganography.
//!
//! The hidden message is `base64(blob) || "###"`, one character per eight
//! samples, one bit per sample, most significant bit first. Base64 never
//! emits `#`, so the first `###` after a character boundary is the end of
//! the message.

mod decoder;
mod encoder;

pub use decoder::{extract, ScanState, TerminatorScanner};
pub use encoder::{embed, encode_message};

use crate::audio::AudioCarrier;
use crate::config::{BITS_PER_CHAR, TERMINATOR};

/// Upper-bound payload size in characters: `samples / 8`.
///
/// This ignores the three end-marker characters, so a message reported as
/// fitting can still be rejected by [`embed`] by up to 24 bits.
pub fn capacity(carrier: &AudioCarrier) -> usize {
    carrier.sample_count() / BITS_PER_CHAR
}

/// Length of the base64 text for a blob of `blob_len` bytes.
pub fn base64_len(blob_len: usize) -> usize {
    blob_len.div_ceil(3) * 4
}

/// Exact number of samples [`embed`] needs for a blob of `blob_len` bytes.
pub fn framed_bit_len(blob_len: usize) -> usize {
    (base64_len(blob_len) + TERMINATOR.len()) * BITS_PER_CHAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{sine_carrier, AudioFormat};
    use crate::error::Error;

    #[test]
    fn test_capacity() {
        let carrier = sine_carrier(AudioFormat::mono(44100), 10000);
        assert_eq!(capacity(&carrier), 1250);

        let carrier = sine_carrier(AudioFormat::mono(44100), 15);
        assert_eq!(capacity(&carrier), 1);
    }

    #[test]
    fn test_framed_bit_len_matches_message() {
        for len in 0..20 {
            let blob = vec![7u8; len];
            assert_eq!(framed_bit_len(len), encode_message(&blob).len() * 8);
        }
    }

    #[test]
    fn test_exact_fit_succeeds_one_short_fails() {
        let blob = b"exactly";
        let needed = framed_bit_len(blob.len());

        let exact = sine_carrier(AudioFormat::mono(8000), needed);
        let stego = embed(&exact, blob).unwrap();
        assert_eq!(extract(&stego).unwrap(), blob);

        let short = sine_carrier(AudioFormat::mono(8000), needed - 1);
        assert!(matches!(
            embed(&short, blob),
            Err(Error::InsufficientCapacity { needed: n, available: a }) if n == needed && a == needed - 1
        ));
    }

    #[test]
    fn test_capacity_ignores_terminator() {
        // 12 bytes of blob -> 16 base64 characters, exactly the capacity of
        // a 128-sample carrier, but the end marker needs 24 more samples.
        let blob = [0x5Au8; 12];
        let carrier = sine_carrier(AudioFormat::mono(8000), 128);

        assert_eq!(base64_len(blob.len()), capacity(&carrier));
        assert!(matches!(
            embed(&carrier, &blob),
            Err(Error::InsufficientCapacity { needed: 152, available: 128 })
        ));

        let roomy = sine_carrier(AudioFormat::mono(8000), 152);
        assert!(embed(&roomy, &blob).is_ok());
    }
}
