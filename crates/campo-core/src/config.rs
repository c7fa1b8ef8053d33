//! Configuration types for campo.
//!
//! [`Config::load`] reads `~/.config/campo/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

use crate::ingest::IngestOptions;
use crate::store::LoadPolicy;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ingest]
header_scan_rows = 10
load_policy      = "if-empty"

[ui]
theme            = "default"
hectare_decimals = 2
top_products     = 12

[export]
file_name = "Reporte_Completo.csv"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/campo/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[ingest]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_header_scan_rows")]
    pub header_scan_rows: usize,
    #[serde(default)]
    pub load_policy: LoadPolicy,
}

fn default_header_scan_rows() -> usize { crate::header::DEFAULT_SCAN_ROWS }

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: default_header_scan_rows(),
            load_policy: LoadPolicy::default(),
        }
    }
}

impl IngestConfig {
    pub fn options(&self) -> IngestOptions {
        IngestOptions { header_scan_rows: self.header_scan_rows }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_hectare_decimals")]
    pub hectare_decimals: usize,
    #[serde(default = "default_top_products")]
    pub top_products: usize,
}

fn default_theme() -> String { "default".to_string() }
fn default_hectare_decimals() -> usize { 2 }
fn default_top_products() -> usize { crate::summary::DEFAULT_TOP_PRODUCTS }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            hectare_decimals: default_hectare_decimals(),
            top_products: default_top_products(),
        }
    }
}

/// `[export]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_file_name() -> String { "Reporte_Completo.csv".to_string() }

impl Default for ExportConfig {
    fn default() -> Self {
        Self { file_name: default_file_name() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/campo/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Layer the file at `path` (if present) over the built-in defaults.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("campo")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.ingest.header_scan_rows, 10);
        assert_eq!(cfg.ingest.load_policy, LoadPolicy::IfEmpty);
        assert_eq!(cfg.ui.hectare_decimals, 2);
        assert_eq!(cfg.ui.top_products, 12);
        assert_eq!(cfg.export.file_name, "Reporte_Completo.csv");
    }

    #[test]
    fn user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ingest]\nload_policy = \"append\"\n[ui]\ntop_products = 5\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.ingest.load_policy, LoadPolicy::Append);
        assert_eq!(cfg.ingest.header_scan_rows, 10);
        assert_eq!(cfg.ui.top_products, 5);
    }

    #[test]
    fn missing_user_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.ui.theme, "default");
    }
}
