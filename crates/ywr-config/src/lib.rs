//! YWR chat client configuration.
//!
//! TOML-based configuration with serde defaults so a partial config
//! (or no config file at all) works out of the box.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{default_config_path, load_default, load_from_path};
pub use schema::{AppConfig, AuthConfig, ChatConfig, LoggingConfig};

use ywr_common::ConfigError;

/// Load config from an explicit path when given, otherwise from the
/// platform default path (falling back to defaults if no file exists).
pub fn load_config(path: Option<&std::path::Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(p) => loader::load_from_path(p)?,
        None => loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}
