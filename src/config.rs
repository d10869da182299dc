//! Board configuration.
//!
//! Handles loading, validating, and merging `trombi.toml`. Stock defaults are
//! the base layer; a `trombi.toml` in the photo folder overrides them, and CLI
//! flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Trombinoscope"   # Heading printed above the grid
//! grid_size = 3             # Portraits per row (1-10)
//! paper_size = "A4"         # A4, A5 or A6
//!
//! [processing]
//! max_processes = 4         # Max parallel file readers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// File name looked up in the photo folder.
pub const CONFIG_FILE: &str = "trombi.toml";

/// Largest accepted `grid_size`. Beyond this a portrait is smaller than a
/// thumbnail even on A4.
pub const MAX_GRID_SIZE: u32 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Printable paper formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    A6,
}

impl PaperSize {
    /// Value for the CSS `@page { size: ... }` rule.
    pub fn css_size(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::A6 => "A6",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_size())
    }
}

impl FromStr for PaperSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A4" => Ok(PaperSize::A4),
            "A5" => Ok(PaperSize::A5),
            "A6" => Ok(PaperSize::A6),
            other => Err(ConfigError::Validation(format!(
                "unknown paper size '{other}' (expected A4, A5 or A6)"
            ))),
        }
    }
}

/// Board configuration loaded from `trombi.toml`.
///
/// All fields have defaults; a config file only lists what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Heading shown above the grid and used as the document title.
    pub title: String,
    /// Portraits per row.
    pub grid_size: u32,
    pub paper_size: PaperSize,
    /// Parallel file reading settings.
    pub processing: ProcessingConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: "Trombinoscope".to_string(),
            grid_size: 3,
            paper_size: PaperSize::A4,
            processing: ProcessingConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::Validation(format!(
                "grid_size must be 1-{MAX_GRID_SIZE}"
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides, then re-validate.
    pub fn with_overrides(
        mut self,
        grid_size: Option<u32>,
        paper_size: Option<PaperSize>,
    ) -> Result<Self, ConfigError> {
        if let Some(n) = grid_size {
            self.grid_size = n;
        }
        if let Some(p) = paper_size {
            self.paper_size = p;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel file readers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BoardConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `trombi.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config for a photo folder.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<BoardConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let config: BoardConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `trombi.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Trombi Configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as trombi.toml next to the photos. Command-line flags
# (--grid-size, --paper-size) take precedence over it.
# Unknown keys will cause an error.

# Heading printed above the grid.
title = "Trombinoscope"

# Portraits per row (1-10).
grid_size = 3

# Paper format used for printing: "A4", "A5" or "A6".
paper_size = "A4"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel file readers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = BoardConfig::default();
        assert_eq!(config.title, "Trombinoscope");
        assert_eq!(config.grid_size, 3);
        assert_eq!(config.paper_size, PaperSize::A4);
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn parse_partial_config() {
        let config: BoardConfig = toml::from_str("grid_size = 5").unwrap();
        assert_eq!(config.grid_size, 5);
        assert_eq!(config.paper_size, PaperSize::A4);
        assert_eq!(config.title, "Trombinoscope");
    }

    #[test]
    fn parse_paper_size() {
        let config: BoardConfig = toml::from_str(r#"paper_size = "A6""#).unwrap();
        assert_eq!(config.paper_size, PaperSize::A6);
    }

    #[test]
    fn unknown_paper_size_rejected() {
        let result: Result<BoardConfig, _> = toml::from_str(r#"paper_size = "Letter""#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<BoardConfig, _> = toml::from_str("columns = 4");
        assert!(result.is_err());
    }

    #[test]
    fn paper_size_from_str_is_case_insensitive() {
        assert_eq!("a5".parse::<PaperSize>().unwrap(), PaperSize::A5);
        assert_eq!("A4".parse::<PaperSize>().unwrap(), PaperSize::A4);
        assert!("B5".parse::<PaperSize>().is_err());
    }

    #[test]
    fn validate_grid_size_bounds() {
        let mut config = BoardConfig::default();
        config.grid_size = 0;
        assert!(config.validate().is_err());
        config.grid_size = MAX_GRID_SIZE + 1;
        assert!(config.validate().is_err());
        config.grid_size = MAX_GRID_SIZE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_processes() {
        let mut config = BoardConfig::default();
        config.processing.max_processes = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = BoardConfig::default()
            .with_overrides(Some(4), Some(PaperSize::A5))
            .unwrap();
        assert_eq!(config.grid_size, 4);
        assert_eq!(config.paper_size, PaperSize::A5);
    }

    #[test]
    fn overrides_are_validated() {
        assert!(BoardConfig::default().with_overrides(Some(0), None).is_err());
    }

    #[test]
    fn no_overrides_keeps_values() {
        let config = BoardConfig::default().with_overrides(None, None).unwrap();
        assert_eq!(config.grid_size, 3);
    }

    #[test]
    fn effective_threads_clamps_to_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let config = ProcessingConfig {
            max_processes: Some(cores + 64),
        };
        assert_eq!(effective_threads(&config), cores);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
        let one = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&one), 1);
    }

    #[test]
    fn merge_toml_overlays_nested_tables() {
        let base: toml::Value = toml::from_str(
            r#"
grid_size = 3
[processing]
max_processes = 2
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("grid_size = 6").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["grid_size"].as_integer(), Some(6));
        assert_eq!(merged["processing"]["max_processes"].as_integer(), Some(2));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.grid_size, 3);
        assert_eq!(config.paper_size, PaperSize::A4);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
title = "Promo 2021"
paper_size = "A5"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Promo 2021");
        assert_eq!(config.paper_size, PaperSize::A5);
        // Unspecified values should be defaults
        assert_eq!(config.grid_size, 3);
    }

    #[test]
    fn load_config_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "grid_size = [").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "grid_size = 42").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: BoardConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = BoardConfig::default();
        assert_eq!(config.title, defaults.title);
        assert_eq!(config.grid_size, defaults.grid_size);
        assert_eq!(config.paper_size, defaults.paper_size);
        assert_eq!(config.processing.max_processes, None);
    }
}
