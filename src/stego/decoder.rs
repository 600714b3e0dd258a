//! LSB extraction with an explicit end-marker scan.

use crate::audio::AudioCarrier;
use crate::config::{BITS_PER_CHAR, TERMINATOR};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

/// State of the end-marker scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Still reading characters.
    Scanning,
    /// The last three characters read were the end marker.
    Found,
    /// Input ran out before the end marker appeared.
    Exhausted,
}

/// Accumulates recovered characters until the end marker is seen.
#[derive(Debug, Clone)]
pub struct TerminatorScanner {
    text: Vec<u8>,
    state: ScanState,
}

impl TerminatorScanner {
    pub fn new() -> Self {
        Self {
            text: Vec::new(),
            state: ScanState::Scanning,
        }
    }

    /// Feed one recovered character. Ignored once the scan has ended.
    pub fn push(&mut self, byte: u8) -> ScanState {
        if self.state == ScanState::Scanning {
            self.text.push(byte);
            if self.text.ends_with(TERMINATOR) {
                self.state = ScanState::Found;
            }
        }
        self.state
    }

    /// Signal that no more input is available.
    pub fn finish(&mut self) -> ScanState {
        if self.state == ScanState::Scanning {
            self.state = ScanState::Exhausted;
        }
        self.state
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// The text before the end marker, if it was found.
    pub fn into_message(mut self) -> Option<Vec<u8>> {
        match self.state {
            ScanState::Found => {
                self.text.truncate(self.text.len() - TERMINATOR.len());
                Some(self.text)
            }
            ScanState::Scanning | ScanState::Exhausted => None,
        }
    }
}

impl Default for TerminatorScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild one character from eight sample LSBs, most significant first.
fn char_from_lsbs(chunk: &[i16]) -> u8 {
    chunk
        .iter()
        .fold(0u8, |acc, &sample| (acc << 1) | (sample & 1) as u8)
}

/// Recover the blob hidden by [`embed`](super::embed).
///
/// # Errors
///
/// - `TerminatorNotFound` if the samples run out before the end marker.
/// - `InvalidBase64` if the text before the marker is not valid base64.
pub fn extract(carrier: &AudioCarrier) -> Result<Vec<u8>> {
    let mut scanner = TerminatorScanner::new();
    let mut scanned = 0;

    for chunk in carrier.samples().chunks_exact(BITS_PER_CHAR) {
        scanned += BITS_PER_CHAR;
        if scanner.push(char_from_lsbs(chunk)) == ScanState::Found {
            break;
        }
    }

    if scanner.finish() == ScanState::Exhausted {
        return Err(Error::TerminatorNotFound {
            scanned: carrier.sample_count(),
        });
    }

    let text = scanner.into_message().unwrap_or_default();
    debug!(scanned, text_len = text.len(), "located end marker");

    Ok(STANDARD.decode(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{sine_carrier, AudioFormat};
    use crate::stego::embed;

    fn carrier_with_message(message: &[u8], sample_count: usize) -> AudioCarrier {
        let mut samples = vec![0i16; sample_count];
        let bits = message
            .iter()
            .flat_map(|&b| (0..8).rev().map(move |s| ((b >> s) & 1) as i16));
        for (sample, bit) in samples.iter_mut().zip(bits) {
            *sample = bit;
        }
        AudioCarrier::new(AudioFormat::mono(8000), samples)
    }

    #[test]
    fn test_scanner_states() {
        let mut scanner = TerminatorScanner::new();
        assert_eq!(scanner.state(), ScanState::Scanning);
        assert_eq!(scanner.push(b'Q'), ScanState::Scanning);
        assert_eq!(scanner.push(b'#'), ScanState::Scanning);
        assert_eq!(scanner.push(b'#'), ScanState::Scanning);
        assert_eq!(scanner.push(b'#'), ScanState::Found);
        // Input after the marker is ignored
        assert_eq!(scanner.push(b'Z'), ScanState::Found);
        assert_eq!(scanner.finish(), ScanState::Found);
        assert_eq!(scanner.state(), ScanState::Found);
        assert_eq!(scanner.into_message(), Some(b"Q".to_vec()));
    }

    #[test]
    fn test_scanner_exhausted() {
        let mut scanner = TerminatorScanner::new();
        scanner.push(b'a');
        scanner.push(b'#');
        assert_eq!(scanner.finish(), ScanState::Exhausted);
        assert_eq!(scanner.state(), ScanState::Exhausted);
        assert_eq!(scanner.into_message(), None);
    }

    #[test]
    fn test_hide_and_extract_small() {
        let carrier = sine_carrier(AudioFormat::mono(44100), 10000);
        let data = b"Hello, audio steganography!";

        let hidden = embed(&carrier, data).unwrap();
        assert_eq!(extract(&hidden).unwrap(), data);
    }

    #[test]
    fn test_empty_blob() {
        let carrier = sine_carrier(AudioFormat::mono(8000), 100);
        let hidden = embed(&carrier, b"").unwrap();
        assert!(extract(&hidden).unwrap().is_empty());
    }

    #[test]
    fn test_stereo_carrier_treated_as_flat() {
        let format = AudioFormat {
            channels: 2,
            sample_width: 2,
            frame_rate: 8000,
        };
        let carrier = sine_carrier(format, 4000);
        let hidden = embed(&carrier, b"stereo").unwrap();
        assert_eq!(extract(&hidden).unwrap(), b"stereo");
    }

    #[test]
    fn test_terminator_missing() {
        let carrier = carrier_with_message(b"aGVsbG8=", 200);
        assert!(matches!(
            extract(&carrier),
            Err(Error::TerminatorNotFound { scanned: 200 })
        ));
    }

    #[test]
    fn test_terminator_cut_short() {
        // Marker starts but the last character does not fit
        let carrier = carrier_with_message(b"aGk=###", 7 * 8 - 1);
        assert!(matches!(
            extract(&carrier),
            Err(Error::TerminatorNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_base64_before_marker() {
        let carrier = carrier_with_message(b"a!b###", 100);
        assert!(matches!(extract(&carrier), Err(Error::InvalidBase64(_))));
    }

    #[test]
    fn test_silent_carrier_has_no_message() {
        let carrier = AudioCarrier::new(AudioFormat::mono(8000), vec![0i16; 800]);
        assert!(matches!(
            extract(&carrier),
            Err(Error::TerminatorNotFound { .. })
        ));
    }
}
