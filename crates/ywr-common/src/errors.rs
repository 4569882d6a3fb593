use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum YwrError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("auth error: {0}")]
    Auth(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("ws_url must be ws:// or wss://".into());
        assert_eq!(
            err.to_string(),
            "config validation error: ws_url must be ws:// or wss://"
        );
    }

    #[test]
    fn ywr_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: YwrError = config_err.into();
        assert!(matches!(err, YwrError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn ywr_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: YwrError = io_err.into();
        assert!(matches!(err, YwrError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn ywr_error_other_variants() {
        let err = YwrError::Auth("invalid credentials".into());
        assert_eq!(err.to_string(), "auth error: invalid credentials");

        let err = YwrError::Session("already connected".into());
        assert_eq!(err.to_string(), "session error: already connected");

        let err = YwrError::Network("timeout".into());
        assert_eq!(err.to_string(), "network error: timeout");

        let err = YwrError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
