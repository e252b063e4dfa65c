//! Output descriptors, format inference and file writing

mod report;

pub use report::GenerationReport;

use crate::error::{Error, Result};
use crate::qr::QrSymbol;
use image::{DynamicImage, ImageFormat};
use std::fmt;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Pixels per module when the caller does not choose a scale
pub const DEFAULT_SCALE: u32 = 16;

/// Largest raster side length, in pixels, that will be rendered
pub const MAX_SIDE: u32 = u16::MAX as u32;

// Version 40 is 177 modules wide, plus a 4-module quiet zone per side.
const LARGEST_SYMBOL_MODULES: u32 = 177 + 2 * 4;

/// Largest accepted scale: a version 40 symbol still fits in `MAX_SIDE`
pub const MAX_SCALE: u32 = MAX_SIDE / LARGEST_SYMBOL_MODULES;

/// Serialization format for a generated symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raster image written through the `image` crate
    Raster(ImageFormat),
    /// SVG document
    Svg,
}

impl OutputFormat {
    /// Infer the format from a destination path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!(
                    "'{}' has no file extension to infer a format from",
                    path.display()
                ))
            })?;

        if ext == "svg" {
            return Ok(Self::Svg);
        }

        let format = ImageFormat::from_extension(&ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("unknown extension '.{ext}'")))?;

        if !format.writing_enabled() {
            return Err(Error::UnsupportedFormat(format!(
                "writing {format:?} images is not supported"
            )));
        }

        Ok(Self::Raster(format))
    }

    /// Whether the written file can be decoded back for verification
    pub fn is_raster(&self) -> bool {
        matches!(self, Self::Raster(_))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg => f.write_str("svg"),
            Self::Raster(format) => match format.extensions_str().first() {
                Some(ext) => f.write_str(ext),
                None => write!(f, "{format:?}"),
            },
        }
    }
}

/// Where and how a symbol is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    /// Destination file; its directory must already exist
    pub path: PathBuf,
    /// Pixels per module
    pub scale: u32,
    /// Surround the symbol with its quiet zone
    pub quiet_zone: bool,
}

impl OutputDescriptor {
    /// Descriptor for `path` with the default scale and quiet zone
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scale: DEFAULT_SCALE,
            quiet_zone: true,
        }
    }

    /// Set the module scale
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Enable or disable the quiet zone
    pub fn with_quiet_zone(mut self, quiet_zone: bool) -> Self {
        self.quiet_zone = quiet_zone;
        self
    }

    /// Check the scale and infer the output format
    pub fn validate(&self) -> Result<OutputFormat> {
        let side = LARGEST_SYMBOL_MODULES.checked_mul(self.scale);
        if self.scale == 0 || side.is_none_or(|side| side > MAX_SIDE) {
            return Err(Error::InvalidScale(self.scale));
        }
        OutputFormat::from_path(&self.path)
    }
}

/// Serialize a symbol into the bytes of an image file
pub fn encode_image(
    symbol: &QrSymbol,
    format: OutputFormat,
    descriptor: &OutputDescriptor,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Svg => Ok(symbol
            .render_svg(descriptor.scale, descriptor.quiet_zone)
            .into_bytes()),
        OutputFormat::Raster(format) => {
            let image =
                DynamicImage::ImageLuma8(symbol.render_luma(descriptor.scale, descriptor.quiet_zone));
            let mut buf = Vec::new();
            image.write_to(&mut Cursor::new(&mut buf), format)?;
            Ok(buf)
        }
    }
}

/// Replace `path` with `bytes` without ever exposing a partial file.
///
/// The bytes go to a temporary file in the destination directory which is
/// renamed over `path` once flushed. The directory is never created; if it
/// is missing or unwritable nothing is left behind.
///
/// A new file gets the same mode as `fs::write` would give it (0o666 less the
/// umask); an existing file keeps its permissions.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = tempfile::Builder::new();
    builder.prefix(".docqr-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;

    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inference() {
        assert_eq!(
            OutputFormat::from_path(Path::new("a/b/qr.png")).unwrap(),
            OutputFormat::Raster(ImageFormat::Png)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("QR.PNG")).unwrap(),
            OutputFormat::Raster(ImageFormat::Png)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("qr.svg")).unwrap(),
            OutputFormat::Svg
        );
    }

    #[test]
    fn test_unknown_extension() {
        for path in ["qr.docx", "qr"] {
            assert!(
                matches!(
                    OutputFormat::from_path(Path::new(path)),
                    Err(Error::UnsupportedFormat(_))
                ),
                "{path}"
            );
        }
    }

    #[test]
    fn test_zero_scale_rejected() {
        let descriptor = OutputDescriptor::new("qr.png").with_scale(0);
        assert!(matches!(descriptor.validate(), Err(Error::InvalidScale(0))));
    }

    #[test]
    fn test_scale_cap() {
        let largest = OutputDescriptor::new("qr.png").with_scale(MAX_SCALE);
        assert!(largest.validate().is_ok());

        for scale in [MAX_SCALE + 1, 200_000_000, u32::MAX] {
            let descriptor = OutputDescriptor::new("qr.png").with_scale(scale);
            assert!(
                matches!(descriptor.validate(), Err(Error::InvalidScale(s)) if s == scale),
                "scale {scale}"
            );
        }
    }

    #[test]
    fn test_format_label() {
        assert_eq!(OutputFormat::Raster(ImageFormat::Png).to_string(), "png");
        assert_eq!(OutputFormat::Svg.to_string(), "svg");
    }

    #[test]
    fn test_write_atomic_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.bin");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1, "temporary file left behind");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_mode_matches_fs_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.png");
        let atomic = dir.path().join("atomic.png");

        std::fs::write(&plain, b"data").unwrap();
        write_atomic(&atomic, b"data").unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&atomic), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");
        std::fs::write(&path, b"old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&path, b"new").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_write_atomic_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("qr.png");

        let result = write_atomic(&path, b"data");
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(!path.exists());
        assert!(!dir.path().join("missing").exists());
    }
}
