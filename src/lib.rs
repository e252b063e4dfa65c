//! docqr - QR code images for documentation links
//!
//! Encodes a string into a QR symbol and writes it to disk as a raster (PNG,
//! JPEG, BMP, ...) or SVG image. Symbology is handled by the `qrcode` crate;
//! written images can be decoded back with `rqrr` to confirm they scan.
//!
//! # Example
//!
//! ```no_run
//! fn main() -> docqr::Result<()> {
//!     let report = docqr::generate("https://example.org/x", "out.png", 16)?;
//!     println!("{}x{} px", report.width, report.height);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod output;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{DocqrConfig, GeneratorOptions, LogRotation, LoggingOptions};
pub use generator::{Generator, generate};
pub use output::{DEFAULT_SCALE, GenerationReport, OutputDescriptor, OutputFormat};
pub use qr::{EccLevel, QrDecoder, QrEncoder, QrPayload, QrSymbol};
