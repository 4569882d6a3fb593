//! Config validation, run after loading.

use ywr_common::ConfigError;

use crate::schema::AppConfig;

/// Validate a loaded config.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.auth.region.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.region must not be empty".into(),
        ));
    }
    if config.auth.user_pool_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.user_pool_id must not be empty".into(),
        ));
    }
    if config.auth.client_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.client_id must not be empty".into(),
        ));
    }
    if !config.chat.ws_url.starts_with("ws://") && !config.chat.ws_url.starts_with("wss://") {
        return Err(ConfigError::ValidationError(format!(
            "chat.ws_url must be a ws:// or wss:// URL, got '{}'",
            config.chat.ws_url
        )));
    }
    if config.chat.connect_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "chat.connect_timeout_secs must be nonzero".into(),
        ));
    }
    Ok(())
}
