//! Auth-specific error types.

/// Errors that can occur while logging in or restoring a session.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// Username or password was blank.
    #[error("Please enter both username and password")]
    MissingCredentials,

    /// No directory entry matched the username and password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The user directory could not be read.
    #[error("user directory unavailable: {0}")]
    Directory(String),

    /// A persisted session slot could not be decoded.
    #[error("corrupted session: {0}")]
    CorruptSession(String),

    /// Session slots could not be read or written.
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl AuthError {
    /// Whether the user can fix this by entering different input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredentials | AuthError::InvalidCredentials
        )
    }
}

impl From<floorflow_core::Error> for AuthError {
    fn from(err: floorflow_core::Error) -> Self {
        AuthError::Directory(err.to_string())
    }
}
