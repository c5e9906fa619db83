#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Floorflow CLI
//!
//! Provides:
//! - [`cli`] - the clap command tree
//! - [`commands`] - one handler per command, generic over the store
//! - [`config`] - the binary's TOML configuration and its resolution order
//! - [`context`] - session restore and permission-checked navigation
//! - [`output`] - text and JSON rendering

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod context;
pub mod error;
pub mod output;

pub use error::{Error, Result};
