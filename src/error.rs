//! Error types for docqr operations

use crate::qr::EccLevel;
use thiserror::Error;

/// Result type alias using docqr's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for docqr operations
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing to encode
    #[error("Refusing to encode an empty payload")]
    EmptyPayload,

    /// Payload does not fit in a version 40 symbol at the requested level
    #[error("Payload of {len} bytes exceeds QR capacity at error correction level {ecc}")]
    Capacity {
        /// Payload length in bytes
        len: usize,
        /// Requested error correction level
        ecc: EccLevel,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Destination extension is not a format we can write
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Module scale outside the accepted range
    #[error(
        "Invalid module scale {0}, expected 1 to {max}",
        max = crate::output::MAX_SCALE
    )]
    InvalidScale(u32),

    /// Written image did not decode back to the input
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::Unsupported(u) => Error::UnsupportedFormat(u.to_string()),
            image::ImageError::IoError(io) => Error::Io(io),
            other => Error::Image(other.to_string()),
        }
    }
}
