//! QR code encoding and decoding
//!
//! Encoding delegates all symbology work (version selection, masking,
//! capacity limits) to the `qrcode` crate. Decoding uses `rqrr` and exists so
//! written images can be checked against their input.

mod decoder;
mod encoder;
mod symbol;

pub use decoder::QrDecoder;
pub use encoder::QrEncoder;
pub use symbol::QrSymbol;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The data carried by a QR symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// The raw data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Create a new QR payload from a string
    pub fn from_string(s: String) -> Self {
        Self {
            data: s.as_bytes().to_vec(),
            text: Some(s),
        }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Length of the payload in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload carries no data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<&str> for QrPayload {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

/// QR error correction level
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EccLevel {
    /// Recovers ~7% of codewords
    #[default]
    #[serde(alias = "l")]
    Low,
    /// Recovers ~15% of codewords
    #[serde(alias = "m")]
    Medium,
    /// Recovers ~25% of codewords
    #[serde(alias = "q")]
    Quartile,
    /// Recovers ~30% of codewords
    #[serde(alias = "h")]
    High,
}

impl EccLevel {
    /// All levels, weakest first
    pub const ALL: [EccLevel; 4] = [Self::Low, Self::Medium, Self::Quartile, Self::High];

    /// Single-letter designation used by the QR standard
    pub fn letter(self) -> char {
        match self {
            Self::Low => 'L',
            Self::Medium => 'M',
            Self::Quartile => 'Q',
            Self::High => 'H',
        }
    }

    /// Parse a level from its name or letter (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::Low),
            "m" | "medium" => Some(Self::Medium),
            "q" | "quartile" => Some(Self::Quartile),
            "h" | "high" => Some(Self::High),
            _ => None,
        }
    }

    pub(crate) fn from_qrcode(level: qrcode::EcLevel) -> Self {
        match level {
            qrcode::EcLevel::L => Self::Low,
            qrcode::EcLevel::M => Self::Medium,
            qrcode::EcLevel::Q => Self::Quartile,
            qrcode::EcLevel::H => Self::High,
        }
    }
}

impl From<EccLevel> for qrcode::EcLevel {
    fn from(level: EccLevel) -> Self {
        match level {
            EccLevel::Low => qrcode::EcLevel::L,
            EccLevel::Medium => qrcode::EcLevel::M,
            EccLevel::Quartile => qrcode::EcLevel::Q,
            EccLevel::High => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for EccLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for EccLevel {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unknown error correction level '{value}', expected one of l, m, q, h")
        })
    }
}
