//! Error types for floorflow-cli

use thiserror::Error;

/// Result type alias for floorflow-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in floorflow-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from floorflow-core
    #[error(transparent)]
    Core(#[from] floorflow_core::Error),

    /// Error from floorflow-auth
    #[error(transparent)]
    Auth(#[from] floorflow_auth::AuthError),

    /// A command needs a logged-in user and no session was found.
    #[error("Not logged in; run `floorflow login` first")]
    NotLoggedIn,

    /// The store refused a mark-complete and the change was reverted.
    #[error("Failed to update task {task_no}: {reason}")]
    RolledBack {
        /// Task that was being completed.
        task_no: String,
        /// Why the store refused.
        reason: String,
    },

    /// Output could not be rendered.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Core(floorflow_core::Error::config(message))
    }

    /// Exit code for this error: 2 for problems the user can fix by
    /// changing input or logging in, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Core(err) if err.is_business() => 2,
            Error::Auth(err) if err.is_client_error() => 2,
            Error::NotLoggedIn | Error::RolledBack { .. } => 2,
            _ => 1,
        }
    }
}
