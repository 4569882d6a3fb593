//! TOML config loading: read from a path or the platform default.

use std::path::{Path, PathBuf};

use tracing::info;
use ywr_common::ConfigError;

use crate::schema::AppConfig;

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("ywr").join("config.toml"))
}

/// Load config from a specific TOML file path.
///
/// Missing fields fall back to serde defaults.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform default path.
///
/// If no file exists there, returns the built-in defaults.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    let path = default_config_path()?;
    if !path.exists() {
        info!("no config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    load_from_path(&path)
}
