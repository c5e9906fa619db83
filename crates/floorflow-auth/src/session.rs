//! Persisted session slots.
//!
//! A session is three files in one directory: the login name, the password
//! and the user-info JSON blob. They are a convenience cache for automatic
//! re-login, stored unencrypted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use floorflow_core::UserInfo;

use crate::AuthError;

/// Slot holding the login name.
pub const USERNAME_SLOT: &str = "floorflow_username";
/// Slot holding the password.
pub const PASSWORD_SLOT: &str = "floorflow_password";
/// Slot holding the user-info blob.
pub const USERINFO_SLOT: &str = "floorflow_userinfo";

const SLOTS: [&str; 3] = [USERNAME_SLOT, PASSWORD_SLOT, USERINFO_SLOT];

/// A session read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    /// Login name as typed.
    pub username: String,
    /// Password as typed.
    pub password: String,
    /// Identity returned by the directory at login.
    pub user: UserInfo,
}

/// File-backed session slots.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Stores slots under `dir`, created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slots.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_slot(&self, name: &str) -> Result<Option<String>, AuthError> {
        match fs::read_to_string(self.slot(name)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes all three slots.
    pub fn save(&self, username: &str, password: &str, user: &UserInfo) -> Result<(), AuthError> {
        let blob = serde_json::to_string(user)
            .map_err(|e| AuthError::CorruptSession(e.to_string()))?;
        fs::create_dir_all(&self.dir)?;
        fs::write(self.slot(USERNAME_SLOT), username)?;
        fs::write(self.slot(PASSWORD_SLOT), password)?;
        fs::write(self.slot(USERINFO_SLOT), blob)?;
        log::debug!("Saved session to {}", self.dir.display());
        Ok(())
    }

    /// Reads the session back.
    ///
    /// Returns `Ok(None)` unless all three slots are present and non-empty.
    /// An undecodable user-info blob clears every slot and returns
    /// [`AuthError::CorruptSession`].
    pub fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        let username = self.read_slot(USERNAME_SLOT)?;
        let password = self.read_slot(PASSWORD_SLOT)?;
        let blob = self.read_slot(USERINFO_SLOT)?;

        let (Some(username), Some(password), Some(blob)) = (username, password, blob) else {
            return Ok(None);
        };
        if username.is_empty() || password.is_empty() || blob.is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<UserInfo>(&blob) {
            Ok(user) => Ok(Some(StoredSession {
                username,
                password,
                user,
            })),
            Err(err) => {
                self.clear()?;
                Err(AuthError::CorruptSession(err.to_string()))
            }
        }
    }

    /// Removes all three slots. Missing slots are fine.
    pub fn clear(&self) -> Result<(), AuthError> {
        for name in SLOTS {
            match fs::remove_file(self.slot(name)) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}
