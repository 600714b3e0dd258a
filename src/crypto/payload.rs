//! Filename + content framing.
//!
//! ```text
//! filename (UTF-8) || "||" || content
//! ```
//!
//! Recovery splits at the first delimiter, so a filename that itself
//! contains `||` comes back truncated and the remainder leaks into the
//! content.

use crate::config::FILENAME_DELIMITER;
use crate::error::{Error, Result};
use tracing::warn;

/// A file together with the name it should be restored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub filename: String,
    pub content: Vec<u8>,
}

impl Payload {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Join filename and content into one byte sequence.
    pub fn frame(&self) -> Result<Vec<u8>> {
        if self.filename.contains('\0') {
            return Err(Error::InvalidFilename(
                "filename contains a NUL byte".to_string(),
            ));
        }
        if contains_delimiter(self.filename.as_bytes()) {
            warn!(
                filename = %self.filename,
                "filename contains the payload delimiter and will not survive extraction intact"
            );
        }

        let mut framed =
            Vec::with_capacity(self.filename.len() + FILENAME_DELIMITER.len() + self.content.len());
        framed.extend_from_slice(self.filename.as_bytes());
        framed.extend_from_slice(FILENAME_DELIMITER);
        framed.extend_from_slice(&self.content);
        Ok(framed)
    }

    /// Split a framed byte sequence at the first delimiter.
    pub fn split(framed: &[u8]) -> Result<Self> {
        let pos = find_delimiter(framed).ok_or(Error::MissingDelimiter)?;

        let filename = std::str::from_utf8(&framed[..pos])
            .map_err(|e| Error::InvalidFilename(e.to_string()))?
            .to_string();
        let content = framed[pos + FILENAME_DELIMITER.len()..].to_vec();

        Ok(Self { filename, content })
    }
}

fn find_delimiter(data: &[u8]) -> Option<usize> {
    data.windows(FILENAME_DELIMITER.len())
        .position(|w| w == FILENAME_DELIMITER)
}

fn contains_delimiter(data: &[u8]) -> bool {
    find_delimiter(data).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let framed = Payload::new("notes.txt", b"hello world".to_vec())
            .frame()
            .unwrap();
        assert_eq!(framed, b"notes.txt||hello world");
    }

    #[test]
    fn test_frame_split_roundtrip() {
        let payload = Payload::new("report.pdf", vec![0u8, 255, 124, 124, 1]);
        let framed = payload.frame().unwrap();
        assert_eq!(Payload::split(&framed).unwrap(), payload);
    }

    #[test]
    fn test_content_may_contain_delimiter() {
        let payload = Payload::new("a.bin", b"x||y||z".to_vec());
        let split = Payload::split(&payload.frame().unwrap()).unwrap();
        assert_eq!(split.filename, "a.bin");
        assert_eq!(split.content, b"x||y||z");
    }

    #[test]
    fn test_filename_with_delimiter_missplits() {
        let payload = Payload::new("a||b.txt", b"data".to_vec());
        let split = Payload::split(&payload.frame().unwrap()).unwrap();
        assert_eq!(split.filename, "a");
        assert_eq!(split.content, b"b.txt||data");
    }

    #[test]
    fn test_empty_parts() {
        let split = Payload::split(b"||").unwrap();
        assert_eq!(split.filename, "");
        assert!(split.content.is_empty());
    }

    #[test]
    fn test_missing_delimiter() {
        assert!(matches!(
            Payload::split(b"no delimiter here"),
            Err(Error::MissingDelimiter)
        ));
    }

    #[test]
    fn test_non_utf8_filename() {
        assert!(matches!(
            Payload::split(b"\xff\xfe||data"),
            Err(Error::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_nul_in_filename_rejected() {
        let payload = Payload::new("bad\0name", b"x".to_vec());
        assert!(matches!(payload.frame(), Err(Error::InvalidFilename(_))));
    }
}
