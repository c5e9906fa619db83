//! Authentication for Floorflow.
//!
//! Provides:
//! - [`UserDirectory`] - Trait for reading login entries (implement per source)
//! - [`DirectoryEntry`] - One row of the user directory
//! - [`SessionStore`] - The three persisted session slots
//! - [`LoginService`] - Login, restore and logout over the two
//! - [`AuthError`] - Auth-specific error types

mod directory;
mod error;
mod login;
mod session;

pub use directory::{DirectoryEntry, StaticDirectory, UserDirectory};
pub use error::AuthError;
pub use login::LoginService;
pub use session::{PASSWORD_SLOT, SessionStore, StoredSession, USERINFO_SLOT, USERNAME_SLOT};
