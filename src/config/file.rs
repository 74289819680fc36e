//! TOML configuration file loading
//!
//! Supports `~/.config/barista/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;
use crate::order::{IdStrategy, ValidationPolicy};

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct BaristaConfigFile {
    /// Order persistence configuration
    #[serde(default)]
    pub orders: OrdersFileConfig,
}

/// Order persistence configuration
#[derive(Debug, Default, Deserialize)]
pub struct OrdersFileConfig {
    /// Directory receiving order records and receipts
    pub dir: Option<PathBuf>,

    /// Identifier strategy ("timestamp", "sequenced", "uuid")
    pub id_strategy: Option<IdStrategy>,

    /// Empty-field policy ("permissive", "strict")
    pub validation: Option<ValidationPolicy>,
}

/// Parse config file contents
///
/// # Errors
///
/// Returns error if the contents are not valid TOML for this schema
pub fn parse_config_file(content: &str) -> Result<BaristaConfigFile> {
    Ok(toml::from_str(content)?)
}

/// Load the TOML config file from the standard path
///
/// Returns `BaristaConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> BaristaConfigFile {
    config_file_path().map_or_else(BaristaConfigFile::default, |path| load_config_file_from(&path))
}

/// Load a TOML config file from an explicit path, falling back to defaults
pub fn load_config_file_from(path: &Path) -> BaristaConfigFile {
    if !path.exists() {
        return BaristaConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match parse_config_file(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                BaristaConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            BaristaConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/barista/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("barista").join("config.toml"))
}
