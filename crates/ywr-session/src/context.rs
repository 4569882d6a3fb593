//! Per-session identity context.
//!
//! Replaces ambient session globals: the front-end builds one after login
//! and hands it to the session at construction time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub username: String,
    /// Identity token from the provider, absent for unauthenticated sessions.
    #[serde(skip)]
    pub id_token: Option<String>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("session_id", &self.session_id)
            .field("username", &self.username)
            .field("id_token", &self.id_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl SessionContext {
    /// Context for an authenticated user session.
    pub fn authenticated(username: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            username: username.into(),
            id_token: Some(id_token.into()),
        }
    }

    /// Context with no provider token, for local or test sessions.
    pub fn anonymous(username: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            username: username.into(),
            id_token: None,
        }
    }
}
