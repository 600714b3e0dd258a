//! Error types for the covert audio channel.

use thiserror::Error;

/// Result type alias for covert channel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while hiding, recovering or watermarking data.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The framed message does not fit in the carrier's sample budget.
    #[error("Audio too short for the message: need {needed} samples, have {available}")]
    InsufficientCapacity { needed: usize, available: usize },

    /// The source file exceeds the configured payload limit.
    #[error("Payload too large: {size} bytes, limit is {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    /// Text that should be base64 could not be decoded.
    #[error("Invalid base64 data: {0}")]
    InvalidBase64(String),

    /// The carrier could not be parsed or written as WAV.
    #[error("Invalid WAV data: {0}")]
    InvalidWav(String),

    /// The carrier is valid WAV but not 16-bit integer PCM.
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Every sample was read without meeting the end marker.
    #[error("No hidden message found: end marker missing after {scanned} samples")]
    TerminatorNotFound { scanned: usize },

    /// Decrypted payload has no filename delimiter.
    #[error("Malformed payload: filename delimiter not found")]
    MissingDelimiter,

    /// Filename cannot be framed or was not valid UTF-8 on recovery.
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// Encrypted blob is too short or not block aligned.
    #[error("Malformed encrypted blob: {len} bytes")]
    BlobLength { len: usize },

    /// Encryption error.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decryption error (wrong passphrase or corrupted data).
    #[error("Decryption failed: wrong passphrase or corrupted data")]
    Decryption,

    /// QR rendering error.
    #[error("QR code error: {0}")]
    Qr(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True for the malformed-input family: bad base64, bad WAV, missing
    /// end marker, missing delimiter and misshapen blobs.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidBase64(_)
                | Error::InvalidWav(_)
                | Error::UnsupportedFormat(_)
                | Error::TerminatorNotFound { .. }
                | Error::MissingDelimiter
                | Error::InvalidFilename(_)
                | Error::BlobLength { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::InvalidBase64(e.to_string())
    }
}

impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        // Carriers are parsed from memory, so an I/O failure here means a
        // truncated container rather than a device problem.
        Error::InvalidWav(e.to_string())
    }
}
