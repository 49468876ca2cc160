use thiserror::Error;

/// Standard error type for the session layer.
///
/// Network and validation failures from the login exchange propagate to the
/// caller for display. Storage failures are raised by the backends but the
/// [`SessionStore`](crate::SessionStore) swallows them — a corrupted or
/// unwritable persisted session must never take the application down.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Account is deactivated")]
    InactiveAccount,

    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl SessionError {
    /// Whether this error should be shown to the user as a rejected login.
    pub fn is_login_rejection(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidCredentials(_) | SessionError::InactiveAccount
        )
    }
}
