//! The user directory: who may log in, and with which permissions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use floorflow_core::UserInfo;
use floorflow_core::types::DEFAULT_ROLE;

use crate::AuthError;

/// One row of the user directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Display name; also accepted as login name.
    pub user_name: String,
    /// Login id.
    pub user_id: String,
    /// Password, stored in the clear by the directory.
    pub password: String,
    /// Role; blank means `user`.
    pub role: String,
    /// Raw permission string.
    pub page_show: String,
}

impl DirectoryEntry {
    /// Builds an entry from the directory's columns, in sheet order.
    ///
    /// Rows with fewer than three columns carry no password and yield
    /// `None`.
    pub fn from_columns<S: AsRef<str>>(columns: &[S]) -> Option<Self> {
        if columns.len() < 3 {
            return None;
        }
        let column = |i: usize| {
            columns
                .get(i)
                .map(|c| c.as_ref().trim().to_string())
                .unwrap_or_default()
        };
        Some(Self {
            user_name: column(0),
            user_id: column(1),
            password: column(2),
            role: column(3),
            page_show: column(4),
        })
    }

    /// The login name may be either the user name or the user id; the
    /// password must match exactly.
    pub fn matches(&self, login: &str, password: &str) -> bool {
        (self.user_name == login || self.user_id == login) && self.password == password
    }

    /// Identity handed to the application once logged in.
    pub fn to_user_info(&self) -> UserInfo {
        UserInfo {
            user_name: self.user_name.clone(),
            user_id: self.user_id.clone(),
            role: if self.role.is_empty() {
                DEFAULT_ROLE.to_string()
            } else {
                self.role.clone()
            },
            page_show: self.page_show.clone(),
        }
    }
}

/// Source of directory entries.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// All entries, in directory order.
    async fn entries(&self) -> Result<Vec<DirectoryEntry>, AuthError>;

    /// First entry matching the login name and password.
    async fn authenticate(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<UserInfo>, AuthError> {
        let entries = self.entries().await?;
        Ok(entries
            .iter()
            .find(|entry| entry.matches(login, password))
            .map(DirectoryEntry::to_user_info))
    }
}

/// A fixed, in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    entries: Vec<DirectoryEntry>,
}

impl StaticDirectory {
    /// Creates a directory holding `entries`.
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl UserDirectory for StaticDirectory {
    async fn entries(&self) -> Result<Vec<DirectoryEntry>, AuthError> {
        Ok(self.entries.clone())
    }
}
