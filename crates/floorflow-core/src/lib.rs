#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Floorflow Core Library
//!
//! Domain types, access rules, progress aggregation and the workflows of
//! the Floorflow construction dashboard.

pub mod access;
pub mod board;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod layout;
pub mod mutation;
pub mod progress;
pub mod registry;
pub mod state;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use access::{AccessResolver, Permissions, Resolution};
pub use error::{Error, Result};
pub use progress::{BuildingStatus, CompletionStatus, ProgressGroup};
pub use state::{AppState, Page, View};
pub use store::{CategoryMeta, MockSheetStore, SheetStore};
pub use types::{
    Building, BuildingKey, Flat, FlatKey, Floor, FloorKey, Marker, Section, TaskRecord, UserInfo,
    Vendor, WorkCategory,
};
