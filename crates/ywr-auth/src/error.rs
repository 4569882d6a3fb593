//! Identity provider error taxonomy.

/// Errors surfaced by identity provider operations.
///
/// The common Cognito fault types get their own variants so the front-end
/// can show a friendly message; everything else falls through to
/// `Provider` with the raw type and message.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("incorrect username or password")]
    NotAuthorized,

    #[error("no account with this username")]
    UserNotFound,

    #[error("account not confirmed yet, enter the emailed confirmation code")]
    UserNotConfirmed,

    #[error("an account with this username already exists")]
    UsernameExists,

    #[error("confirmation code does not match")]
    CodeMismatch,

    #[error("confirmation code expired")]
    CodeExpired,

    #[error("password rejected by the pool policy: {0}")]
    InvalidPassword(String),

    #[error("unsupported auth challenge: {0}")]
    UnsupportedChallenge(String),

    #[error("provider error {kind}: {message}")]
    Provider { kind: String, message: String },

    #[error("http error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Http(err.to_string())
    }
}

/// Map a provider fault (`__type` plus message) onto an `AuthError`.
pub(crate) fn map_provider_fault(kind: &str, message: &str) -> AuthError {
    // The __type field is sometimes namespaced, keep only the final segment.
    let kind = kind.rsplit('#').next().unwrap_or(kind);
    match kind {
        "NotAuthorizedException" => AuthError::NotAuthorized,
        "UserNotFoundException" => AuthError::UserNotFound,
        "UserNotConfirmedException" => AuthError::UserNotConfirmed,
        "UsernameExistsException" => AuthError::UsernameExists,
        "CodeMismatchException" => AuthError::CodeMismatch,
        "ExpiredCodeException" => AuthError::CodeExpired,
        "InvalidPasswordException" => AuthError::InvalidPassword(message.to_string()),
        _ => AuthError::Provider {
            kind: kind.to_string(),
            message: message.to_string(),
        },
    }
}
