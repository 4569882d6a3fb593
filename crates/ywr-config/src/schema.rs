//! Configuration schema. All sections use serde defaults so partial
//! configs deserialize cleanly.

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

/// Identity provider (Cognito user pool) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            user_pool_id: "us-east-1_bhnUjqcnZ".to_string(),
            client_id: "hk80qfivncg6ome7995htvhi9".to_string(),
        }
    }
}

/// Chat endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// WebSocket endpoint the session connects to.
    pub ws_url: String,
    /// Handshake timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            ws_url: "wss://d0j1b57ppi.execute-api.us-east-1.amazonaws.com/prod".to_string(),
            connect_timeout_secs: 15,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing env-filter directive, e.g. "ywr=debug".
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "ywr=info".to_string(),
        }
    }
}
