//! Encoded QR symbols and their renditions

use crate::qr::EccLevel;
use image::{GrayImage, Luma};
use qrcode::render::svg;
use qrcode::{Color, QrCode, Version};

/// An encoded QR symbol, ready to be rendered at any scale
pub struct QrSymbol {
    code: QrCode,
}

impl QrSymbol {
    pub(crate) fn new(code: QrCode) -> Self {
        Self { code }
    }

    /// Symbol version (1..=40, or 1..=4 for micro symbols)
    pub fn version(&self) -> i16 {
        match self.code.version() {
            Version::Normal(v) | Version::Micro(v) => v,
        }
    }

    /// Whether this is a micro QR symbol
    pub fn is_micro(&self) -> bool {
        self.code.version().is_micro()
    }

    /// Error correction level the symbol was built with
    pub fn ecc_level(&self) -> EccLevel {
        EccLevel::from_qrcode(self.code.error_correction_level())
    }

    /// Number of modules along one side, excluding the quiet zone
    pub fn width(&self) -> usize {
        self.code.width()
    }

    /// Whether the module at `(x, y)` is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.code[(x, y)] == Color::Dark
    }

    /// Quiet zone width in modules on each side
    pub fn quiet_zone_modules(&self) -> u32 {
        if self.is_micro() { 2 } else { 4 }
    }

    /// Side length in pixels of a rendition at `scale`, `None` on overflow
    pub fn rendered_size(&self, scale: u32, quiet_zone: bool) -> Option<u32> {
        let border = if quiet_zone {
            2 * self.quiet_zone_modules()
        } else {
            0
        };
        (self.width() as u32 + border).checked_mul(scale)
    }

    /// Rasterize to a two-tone grayscale image with `scale` pixels per module
    pub fn render_luma(&self, scale: u32, quiet_zone: bool) -> GrayImage {
        self.code
            .render::<Luma<u8>>()
            .quiet_zone(quiet_zone)
            .module_dimensions(scale, scale)
            .build()
    }

    /// Render as an SVG document with `scale` user units per module
    pub fn render_svg(&self, scale: u32, quiet_zone: bool) -> String {
        self.code
            .render::<svg::Color>()
            .quiet_zone(quiet_zone)
            .module_dimensions(scale, scale)
            .build()
    }
}

impl std::fmt::Debug for QrSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrSymbol")
            .field("version", &self.version())
            .field("ecc_level", &self.ecc_level())
            .field("width", &self.width())
            .finish()
    }
}
