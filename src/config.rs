//! docqr runtime configuration handling

use crate::error::{Error, Result};
use crate::output::OutputDescriptor;
use crate::qr::{EccLevel, QrEncoder};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Target encoded when nothing else is configured
pub const DEFAULT_TARGET: &str =
    "https://southernmethodistuniversity.github.io/parallel_cpp/intro.html";

/// Destination written when nothing else is configured
pub const DEFAULT_OUTPUT: &str = "../docs/parallel_cpp_qr.png";

/// Top-level configuration structure loaded from disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocqrConfig {
    /// What to encode and where to write it
    pub generator: GeneratorOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl DocqrConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_overrides(&|name: &str| env::var(name).ok())?;
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["docqr.toml", "docqr.yaml", "docqr.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("docqr");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply `DOCQR_*` overrides after file/default loading.
    ///
    /// `lookup` maps a variable name to its value; unparsable values are
    /// rejected rather than ignored.
    pub fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<()> {
        self.generator.apply_overrides(lookup)?;
        self.logging.apply_overrides(lookup)
    }
}

/// Generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// String to encode
    pub target: String,
    /// Destination image; the extension selects the format
    pub output: PathBuf,
    /// Pixels per module
    pub scale: u32,
    /// Minimum error correction level
    pub ecc: EccLevel,
    /// Raise the error correction level while the symbol version allows it
    pub boost_error: bool,
    /// Surround the symbol with its quiet zone
    pub quiet_zone: bool,
    /// Decode the written image and compare it with the target
    pub verify: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            scale: crate::output::DEFAULT_SCALE,
            ecc: EccLevel::Low,
            boost_error: true,
            quiet_zone: true,
            verify: false,
        }
    }
}

impl GeneratorOptions {
    pub(crate) fn apply_overrides(
        &mut self,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(target) = lookup("DOCQR_TARGET") {
            self.target = target;
        }
        if let Some(output) = lookup("DOCQR_OUTPUT") {
            self.output = PathBuf::from(output);
        }
        if let Some(scale) =
            parsed(lookup, "DOCQR_SCALE", |v| v.parse::<u32>().ok(), "an integer")?
        {
            self.scale = scale;
        }
        if let Some(ecc) = parsed(lookup, "DOCQR_ECC", EccLevel::parse, "one of l, m, q, h")? {
            self.ecc = ecc;
        }
        if let Some(boost) = parsed(lookup, "DOCQR_BOOST_ERROR", parse_flag, FLAG_VALUES)? {
            self.boost_error = boost;
        }
        if let Some(quiet_zone) = parsed(lookup, "DOCQR_QUIET_ZONE", parse_flag, FLAG_VALUES)? {
            self.quiet_zone = quiet_zone;
        }
        if let Some(verify) = parsed(lookup, "DOCQR_VERIFY", parse_flag, FLAG_VALUES)? {
            self.verify = verify;
        }
        Ok(())
    }

    /// Encoder configured from these options
    pub fn encoder(&self) -> QrEncoder {
        QrEncoder::with_ecc_level(self.ecc).boost_error(self.boost_error)
    }

    /// Output descriptor configured from these options
    pub fn descriptor(&self) -> OutputDescriptor {
        OutputDescriptor::new(&self.output)
            .with_scale(self.scale)
            .with_quiet_zone(self.quiet_zone)
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `DOCQR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_overrides(
        &mut self,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(level) = lookup("DOCQR_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("DOCQR_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = parsed(lookup, "DOCQR_LOG_COLOR", parse_flag, FLAG_VALUES)? {
            self.color = color;
        }
        if let Some(rotation) =
            parsed(lookup, "DOCQR_LOG_ROTATION", LogRotation::parse, "hourly or daily")?
        {
            self.rotation = Some(rotation);
        }
        Ok(())
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

const FLAG_VALUES: &str = "true/false, on/off, yes/no or 1/0";

// `Ok(None)` when unset, `Error::Config` when set but unparsable.
fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
    expected: &str,
) -> Result<Option<T>> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => parse(&raw).map(Some).ok_or_else(|| {
            Error::Config(format!("Invalid value '{raw}' for {name}, expected {expected}"))
        }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = DocqrConfig::default();
        assert_eq!(config.generator.target, DEFAULT_TARGET);
        assert_eq!(config.generator.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.generator.scale, 16);
        assert!(config.generator.boost_error);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docqr.toml");
        fs::write(
            &path,
            r#"
[generator]
target = "https://example.org/x"
output = "out.png"
scale = 4
ecc = "q"

[logging]
level = "debug"
rotation = "daily"
"#,
        )
        .unwrap();

        let config = DocqrConfig::from_file(&path).unwrap();
        assert_eq!(config.generator.target, "https://example.org/x");
        assert_eq!(config.generator.scale, 4);
        assert_eq!(config.generator.ecc, EccLevel::Quartile);
        // Unset fields keep their defaults.
        assert!(config.generator.quiet_zone);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
    }

    #[test]
    fn test_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docqr.yaml");
        fs::write(
            &path,
            "generator:\n  output: qr.svg\n  quiet_zone: false\n  ecc: high\n",
        )
        .unwrap();

        let config = DocqrConfig::from_file(&path).unwrap();
        let descriptor = config.generator.descriptor();
        assert_eq!(descriptor.path, PathBuf::from("qr.svg"));
        assert!(!descriptor.quiet_zone);
        assert_eq!(config.generator.encoder().ecc_level(), EccLevel::High);
    }

    #[test]
    fn test_unsupported_config_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docqr.ini");
        fs::write(&path, "scale=4").unwrap();

        assert!(matches!(
            DocqrConfig::from_file(&path),
            Err(Error::Config(_))
        ));
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = DocqrConfig::default();
        config
            .apply_overrides(&vars(&[
                ("DOCQR_TARGET", "https://example.org/x"),
                ("DOCQR_OUTPUT", "out.svg"),
                ("DOCQR_SCALE", "4"),
                ("DOCQR_ECC", "H"),
                ("DOCQR_BOOST_ERROR", "off"),
                ("DOCQR_QUIET_ZONE", "0"),
                ("DOCQR_VERIFY", "yes"),
                ("DOCQR_LOG_LEVEL", "debug"),
                ("DOCQR_LOG_COLOR", "false"),
                ("DOCQR_LOG_ROTATION", "hourly"),
            ]))
            .unwrap();

        let generator = &config.generator;
        assert_eq!(generator.target, "https://example.org/x");
        assert_eq!(generator.output, PathBuf::from("out.svg"));
        assert_eq!(generator.scale, 4);
        assert_eq!(generator.ecc, EccLevel::High);
        assert!(!generator.boost_error);
        assert!(!generator.quiet_zone);
        assert!(generator.verify);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.color);
        assert_eq!(config.logging.rotation, Some(LogRotation::Hourly));
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let mut config = DocqrConfig::default();
        config.apply_overrides(&vars(&[])).unwrap();
        assert_eq!(config.generator.scale, 16);
        assert_eq!(config.generator.ecc, EccLevel::Low);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        for (name, value) in [
            ("DOCQR_SCALE", "abc"),
            ("DOCQR_ECC", "x"),
            ("DOCQR_BOOST_ERROR", "maybe"),
            ("DOCQR_QUIET_ZONE", "2"),
            ("DOCQR_VERIFY", ""),
            ("DOCQR_LOG_COLOR", "blue"),
            ("DOCQR_LOG_ROTATION", "weekly"),
        ] {
            let mut config = DocqrConfig::default();
            match config.apply_overrides(&vars(&[(name, value)])) {
                Err(Error::Config(message)) => assert!(message.contains(name), "{message}"),
                other => panic!("{name}={value}: expected config error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("ON"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
