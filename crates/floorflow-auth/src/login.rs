//! Login, session restore and logout.

use floorflow_core::UserInfo;

use crate::directory::UserDirectory;
use crate::session::SessionStore;
use crate::AuthError;

/// Authenticates against a [`UserDirectory`] and keeps the session slots in
/// step.
pub struct LoginService<D> {
    directory: D,
    sessions: SessionStore,
}

impl<D: UserDirectory> LoginService<D> {
    /// Creates a login service.
    pub fn new(directory: D, sessions: SessionStore) -> Self {
        Self {
            directory,
            sessions,
        }
    }

    /// Session slots in use.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Checks the credentials and persists the session on success.
    ///
    /// Blank input is refused before the directory is consulted.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserInfo, AuthError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self
            .directory
            .authenticate(username, password)
            .await
            .inspect_err(|err| log::error!("Authentication error: {err}"))?
            .ok_or(AuthError::InvalidCredentials)?;

        if let Err(err) = self.sessions.save(username, password, &user) {
            log::error!("Error saving session: {err}");
        }
        log::info!("Authenticated {}", user.display_name());
        Ok(user)
    }

    /// Restores a saved session without asking the directory again.
    ///
    /// A corrupt session is cleared and treated as absent.
    pub fn restore(&self) -> Option<UserInfo> {
        match self.sessions.load() {
            Ok(session) => session.map(|s| s.user),
            Err(err) => {
                log::warn!("Error checking existing session: {err}");
                None
            }
        }
    }

    /// Clears the session slots.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear()
    }
}
