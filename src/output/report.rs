//! Summary of a completed generation

use crate::qr::EccLevel;
use serde::Serialize;
use std::path::PathBuf;

/// What was written, and how
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Destination file
    pub path: PathBuf,
    /// Output format label (e.g. `png`, `svg`)
    pub format: String,
    /// Symbol version
    pub version: i16,
    /// Error correction level actually used
    pub ecc_level: EccLevel,
    /// Modules per side, excluding the quiet zone
    pub modules: usize,
    /// Quiet zone modules on each side (0 when disabled)
    pub quiet_zone: u32,
    /// Pixels per module
    pub scale: u32,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bytes written to `path`
    pub bytes_written: usize,
    /// Whether the written file was decoded back and matched
    pub verified: bool,
}

impl GenerationReport {
    /// Human-readable lines for terminal presentation
    pub fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Wrote {} ({}, {}x{} px)",
            self.path.display(),
            self.format,
            self.width,
            self.height
        )];
        lines.push(format!(
            "  Symbol: version {}, ECC {}, {} modules",
            self.version, self.ecc_level, self.modules
        ));
        lines.push(format!(
            "  Scale: {} px/module, quiet zone {} modules",
            self.scale, self.quiet_zone
        ));
        if self.verified {
            lines.push("  Verified: decoded output matches input".to_string());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GenerationReport {
        GenerationReport {
            path: PathBuf::from("out.png"),
            format: "png".to_string(),
            version: 2,
            ecc_level: EccLevel::Medium,
            modules: 25,
            quiet_zone: 4,
            scale: 16,
            width: 528,
            height: 528,
            bytes_written: 1024,
            verified: true,
        }
    }

    #[test]
    fn test_json_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["path"], "out.png");
        assert_eq!(json["ecc_level"], "medium");
        assert_eq!(json["width"], 528);
        assert_eq!(json["verified"], true);
    }

    #[test]
    fn test_human_lines() {
        let lines = sample().human_lines();
        assert_eq!(lines[0], "Wrote out.png (png, 528x528 px)");
        assert!(lines.iter().any(|l| l.contains("ECC M")));
        assert!(lines.iter().any(|l| l.starts_with("  Verified")));
    }
}
