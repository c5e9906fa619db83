//! Top-level application sections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A top-level navigable area of the dashboard.
///
/// Each section carries the human-readable aliases that permission strings
/// may use to grant access to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// Overview of all buildings with progress and billing status.
    Dashboard,
    /// Building list and drill-down into floors and flats.
    Buildings,
    /// Work-category reference data.
    WorkCategory,
    /// Vendor reference data.
    Vendors,
}

impl Section {
    /// All sections in menu order.
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::Buildings,
        Section::WorkCategory,
        Section::Vendors,
    ];

    /// Stable identifier used for navigation.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Buildings => "buildings",
            Section::WorkCategory => "work-category",
            Section::Vendors => "vendors",
        }
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Buildings => "Buildings",
            Section::WorkCategory => "Work Category",
            Section::Vendors => "Vendors",
        }
    }

    /// Lower-case aliases recognized in permission strings.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Section::Dashboard => &["dashboard"],
            Section::Buildings => &["buildings", "building"],
            Section::WorkCategory => &["work category", "workcategory"],
            Section::Vendors => &["vendors", "vendor"],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.id() == needle)
            .ok_or_else(|| Error::validation_field("section", format!("unknown section '{s}'")))
    }
}
