//! Identity provider client for the YWR chat front-end.
//!
//! The chat endpoint sits behind a Cognito user pool; this crate wraps the
//! three user-pool operations the front-end needs (authenticate, register,
//! confirm) behind the `IdentityProvider` trait. The provider's
//! challenge/response protocol (SRP) is not implemented here; the unsigned
//! user-pool client operations are called over plain HTTPS.

pub mod cognito;
pub mod error;

use async_trait::async_trait;
use serde::Deserialize;

pub use cognito::{CognitoClient, CognitoConfig};
pub use error::AuthError;

/// Tokens returned by a successful authentication.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthTokens {
    /// Identity (JWT) token presented to downstream services.
    pub id_token: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: u64,
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("id_token", &"[REDACTED]")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// The three operations the front-end delegates to the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return session tokens.
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<AuthTokens, AuthError>;

    /// Create a new account. The username doubles as the email attribute.
    async fn register(&self, username: &str, password: &str) -> Result<(), AuthError>;

    /// Confirm a freshly registered account with the emailed code.
    async fn confirm(&self, username: &str, code: &str) -> Result<(), AuthError>;
}
