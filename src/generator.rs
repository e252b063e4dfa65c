//! Encode a string and write it as a QR image file

use crate::error::{Error, Result};
use crate::output::{self, GenerationReport, OutputDescriptor};
use crate::qr::{QrDecoder, QrEncoder, QrPayload};
use std::path::Path;

/// Encode `target` and write it to `path` at `scale` pixels per module.
///
/// Uses the default encoder (lowest error correction level, boosted while the
/// version allows) and the standard quiet zone. The image format follows the
/// extension of `path`.
pub fn generate(target: &str, path: impl AsRef<Path>, scale: u32) -> Result<GenerationReport> {
    let descriptor = OutputDescriptor::new(path.as_ref()).with_scale(scale);
    Generator::new().generate(&QrPayload::from(target), &descriptor)
}

/// Encoder plus output policy
#[derive(Debug, Clone, Default)]
pub struct Generator {
    encoder: QrEncoder,
    verify: bool,
}

impl Generator {
    /// Generator with default encoder settings and no verification
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific encoder
    pub fn with_encoder(mut self, encoder: QrEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Decode raster output after writing and compare it with the input
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Encode `payload` and write it as described by `descriptor`
    pub fn generate(
        &self,
        payload: &QrPayload,
        descriptor: &OutputDescriptor,
    ) -> Result<GenerationReport> {
        let format = descriptor.validate()?;
        let symbol = self.encoder.encode(payload)?;
        let size = symbol
            .rendered_size(descriptor.scale, descriptor.quiet_zone)
            .filter(|size| *size <= output::MAX_SIDE)
            .ok_or(Error::InvalidScale(descriptor.scale))?;

        let bytes = output::encode_image(&symbol, format, descriptor)?;
        output::write_atomic(&descriptor.path, &bytes)?;

        tracing::info!(
            path = %descriptor.path.display(),
            %format,
            version = symbol.version(),
            ecc = %symbol.ecc_level(),
            size,
            "Wrote QR image"
        );

        // rqrr only yields text, so binary payloads cannot be compared.
        let verified = if !self.verify {
            false
        } else if !format.is_raster() {
            tracing::warn!(%format, "Skipping verification for non-raster output");
            false
        } else if payload.as_str().is_none() {
            tracing::warn!("Skipping verification for non-UTF-8 payload");
            false
        } else {
            self.check(payload, &descriptor.path)?;
            true
        };

        Ok(GenerationReport {
            path: descriptor.path.clone(),
            format: format.to_string(),
            version: symbol.version(),
            ecc_level: symbol.ecc_level(),
            modules: symbol.width(),
            quiet_zone: if descriptor.quiet_zone {
                symbol.quiet_zone_modules()
            } else {
                0
            },
            scale: descriptor.scale,
            width: size,
            height: size,
            bytes_written: bytes.len(),
            verified,
        })
    }

    fn check(&self, payload: &QrPayload, path: &Path) -> Result<()> {
        let decoded = QrDecoder::new().decode_file(path)?;
        if decoded.as_bytes() != payload.as_bytes() {
            return Err(Error::VerificationFailed(format!(
                "{} decodes to {:?}, expected {:?}",
                path.display(),
                decoded.as_str().unwrap_or("<binary>"),
                payload.as_str().unwrap_or("<binary>"),
            )));
        }
        tracing::debug!(path = %path.display(), "Verified QR image");
        Ok(())
    }
}
