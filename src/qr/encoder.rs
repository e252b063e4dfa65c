//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::{EccLevel, QrPayload, QrSymbol};
use qrcode::QrCode;
use qrcode::types::QrError;

/// QR code encoder
#[derive(Debug, Clone)]
pub struct QrEncoder {
    /// Minimum error correction level
    ecc_level: EccLevel,
    /// Raise the level while the symbol version stays the same
    boost_error: bool,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Low ECC, boosted)
    pub fn new() -> Self {
        Self {
            ecc_level: EccLevel::Low,
            boost_error: true,
        }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(ecc_level: EccLevel) -> Self {
        Self {
            ecc_level,
            ..Self::new()
        }
    }

    /// Enable or disable error correction boosting
    pub fn boost_error(mut self, boost: bool) -> Self {
        self.boost_error = boost;
        self
    }

    /// The configured minimum error correction level
    pub fn ecc_level(&self) -> EccLevel {
        self.ecc_level
    }

    /// Encode a payload into a QR symbol
    pub fn encode(&self, payload: &QrPayload) -> Result<QrSymbol> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }

        let code = build(payload, self.ecc_level)?;
        let code = if self.boost_error {
            self.boost(payload, code)?
        } else {
            code
        };

        let symbol = QrSymbol::new(code);
        tracing::debug!(
            version = symbol.version(),
            ecc = %symbol.ecc_level(),
            modules = symbol.width(),
            bytes = payload.len(),
            "Encoded QR symbol"
        );
        Ok(symbol)
    }

    /// Encode a string into a QR symbol
    pub fn encode_str(&self, data: &str) -> Result<QrSymbol> {
        self.encode(&QrPayload::from(data))
    }

    // Strongest level first; stop at the first one that keeps the version.
    fn boost(&self, payload: &QrPayload, base: QrCode) -> Result<QrCode> {
        let version = base.version();
        for level in EccLevel::ALL.into_iter().rev() {
            if level <= self.ecc_level {
                break;
            }
            match build(payload, level) {
                Ok(code) if code.version() == version => return Ok(code),
                Ok(_) | Err(Error::Capacity { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(base)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn build(payload: &QrPayload, ecc: EccLevel) -> Result<QrCode> {
    QrCode::with_error_correction_level(payload.as_bytes(), ecc.into()).map_err(|e| match e {
        QrError::DataTooLong => Error::Capacity {
            len: payload.len(),
            ecc,
        },
        other => Error::QrEncode(other.to_string()),
    })
}
