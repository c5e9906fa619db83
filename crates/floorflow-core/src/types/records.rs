//! Typed project records: buildings, floors, flats and their tasks.
//!
//! These are the shapes business logic works with. Mapping from the store's
//! column names happens in the client crate; nothing here knows about
//! spreadsheet headers.

use serde::{Deserialize, Serialize};

use super::keys::{BuildingKey, FlatKey, FloorKey};
use crate::Result;

/// Group label used when a task carries no category (or floor).
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A yes/no marker column (payment status, bill generated).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(Option<String>);

impl Marker {
    /// Creates a marker from a raw cell value.
    pub fn new(value: Option<String>) -> Self {
        Self(value)
    }

    /// Raw cell value.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// True when the marker reads "yes" (case-insensitive, trimmed).
    pub fn is_yes(&self) -> bool {
        self.normalized().is_some_and(|v| v == "yes")
    }

    /// True when the marker is missing, blank or reads "no".
    ///
    /// Any other value ("partial", "yes") is not pending.
    // Departs from the web front end, which read a whitespace-only cell as
    // filled in. Here it is trimmed to blank and counts as pending.
    pub fn is_pending(&self) -> bool {
        match self.normalized() {
            None => true,
            Some(v) => v == "no",
        }
    }

    fn normalized(&self) -> Option<String> {
        self.0
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_lowercase)
    }
}

impl From<&str> for Marker {
    fn from(s: &str) -> Self {
        Self(Some(s.to_string()))
    }
}

/// A building as listed by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// Serial number.
    pub serial_no: String,
    /// Building name.
    pub name: String,
    /// Street address.
    pub address: Option<String>,
    /// Number of floors as entered.
    pub total_floors: Option<String>,
    /// Flat ranges per floor, e.g. `"101 to 104, 201 to 203"`.
    pub flat_ranges: Option<String>,
    /// Overall work status ("Complete", "In Progress", ...).
    pub work_status: Option<String>,
}

impl Building {
    /// Composite key used to scope floor and progress queries.
    pub fn key(&self) -> Result<BuildingKey> {
        BuildingKey::new(self.serial_no.clone(), self.name.clone())
    }

    /// Number of floors, or 0 when the column is blank or not a number.
    pub fn floor_count(&self) -> u32 {
        self.total_floors
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Total number of flats across all ranges.
    pub fn total_rooms(&self) -> u32 {
        self.flat_ranges
            .as_deref()
            .map(crate::layout::total_rooms)
            .unwrap_or(0)
    }

    /// True when the work status column reads exactly `Complete`.
    pub fn is_complete(&self) -> bool {
        self.work_status.as_deref() == Some("Complete")
    }
}

/// A floor row of a building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    /// Serial number of the owning building.
    pub serial_no: String,
    /// CB number.
    pub cb_no: String,
    /// Name of the owning building.
    pub building_name: String,
    /// Street address.
    pub address: Option<String>,
    /// Floor name.
    pub name: String,
    /// Comma-separated flat numbers on this floor.
    pub flats: Option<String>,
}

impl Floor {
    /// Composite key used to scope flat queries.
    pub fn key(&self) -> Result<FloorKey> {
        FloorKey::new(self.cb_no.clone(), self.name.clone())
    }

    /// Count of non-blank comma-separated flat entries.
    pub fn flat_count(&self) -> usize {
        self.flats.as_deref().map(crate::layout::flat_count).unwrap_or(0)
    }
}

/// A flat row of a floor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flat {
    /// Serial number of the owning building.
    pub serial_no: String,
    /// CB number.
    pub cb_no: String,
    /// BF number.
    pub bf_no: String,
    /// Name of the owning building.
    pub building_name: String,
    /// Street address.
    pub address: Option<String>,
    /// Name of the owning floor.
    pub floor_name: String,
    /// Flat number.
    pub flat_no: Option<String>,
}

impl Flat {
    /// Composite key used to scope task queries.
    pub fn key(&self) -> Result<FlatKey> {
        FlatKey::new(self.cb_no.clone(), self.bf_no.clone())
    }
}

/// One schedulable unit of construction work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task id.
    pub task_id: Option<String>,
    /// Task number, used as the update target for mark-complete.
    pub task_no: Option<String>,
    /// Description of the work.
    pub action: Option<String>,
    /// Task category ("Electrical", "Plumbing", ...).
    pub category: Option<String>,
    /// Floor the task belongs to.
    pub floor: Option<String>,
    /// Completion date; present and non-blank once the task is done.
    pub actual_date: Option<String>,
    /// Payment marker.
    pub payment: Marker,
    /// Bill-generated marker.
    pub bill: Marker,
    /// Assigned vendor.
    pub vendor_name: Option<String>,
}

impl TaskRecord {
    /// True when the completion date is present and not whitespace-only.
    pub fn is_completed(&self) -> bool {
        self.actual_date
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }

    /// Category, or [`UNCATEGORIZED`] when missing or blank.
    pub fn category_or_default(&self) -> &str {
        non_blank(self.category.as_deref()).unwrap_or(UNCATEGORIZED)
    }

    /// Floor, or [`UNCATEGORIZED`] when missing or blank.
    pub fn floor_or_default(&self) -> &str {
        non_blank(self.floor.as_deref()).unwrap_or(UNCATEGORIZED)
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
