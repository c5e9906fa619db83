#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Floorflow HTTP client.
//!
//! Provides:
//! - [`HttpSheetStore`] - [`floorflow_core::SheetStore`] over the script endpoint
//! - [`CsvUserDirectory`] - [`floorflow_auth::UserDirectory`] over the login sheet export
//! - [`ClientConfig`] - Endpoint and sheet-name configuration
//! - [`ClientError`] - Transport and decoding failures

mod cell;
pub mod columns;
mod config;
mod directory;
mod envelope;
mod error;
pub mod gviz;
mod rows;
mod store;

pub use config::{ClientConfig, DEFAULT_DOCS_BASE_URL, SheetNames};
pub use directory::{CsvUserDirectory, parse_directory};
pub use envelope::Envelope;
pub use error::ClientError;
pub use store::HttpSheetStore;
