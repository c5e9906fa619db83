//! The logged-in user's identity and permission payload.

use serde::{Deserialize, Serialize};

/// Role assigned when the user directory leaves the column blank.
pub const DEFAULT_ROLE: &str = "user";

/// Identity and permissions of an authenticated user.
///
/// Serialised with the field names the session blob has always used,
/// including the store's `pageShoe` spelling for the permission string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Display name.
    pub user_name: String,
    /// Login id.
    pub user_id: String,
    /// Role, `user` unless the directory says otherwise.
    #[serde(default = "default_role")]
    pub role: String,
    /// Raw permission string (`"Dashboard or Vendors"`).
    #[serde(rename = "pageShoe", default)]
    pub page_show: String,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl UserInfo {
    /// Name shown in greetings: the user name, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.user_name.trim().is_empty() {
            &self.user_id
        } else {
            &self.user_name
        }
    }
}
