pub mod errors;

pub use errors::{ConfigError, YwrError};

pub type Result<T> = std::result::Result<T, YwrError>;
