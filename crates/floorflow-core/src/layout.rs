//! Building layout: flat ranges per floor and the new-building form.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Sums the flats described by a list of `"a to b"` ranges.
///
/// Each well-formed range contributes `b - a + 1`; ranges whose ends do not
/// both parse as integers are ignored, and a negative total clamps to zero.
///
/// # Examples
///
/// ```
/// use floorflow_core::layout::total_rooms;
///
/// assert_eq!(total_rooms("101 to 104, 201 to 203"), 7);
/// assert_eq!(total_rooms("101 to x, 301 to 301"), 1);
/// assert_eq!(total_rooms(""), 0);
/// ```
pub fn total_rooms(ranges: &str) -> u32 {
    let sum: i64 = ranges
        .split(',')
        .filter_map(|range| {
            let (start, end) = range.split_once("to")?;
            let start: i64 = start.trim().parse().ok()?;
            let end: i64 = end.trim().parse().ok()?;
            Some(end - start + 1)
        })
        .sum();
    u32::try_from(sum.max(0)).unwrap_or(u32::MAX)
}

/// Counts the non-blank entries of a comma-separated flat list.
pub fn flat_count(flats: &str) -> usize {
    flats.split(',').filter(|f| !f.trim().is_empty()).count()
}

/// One floor of a building being created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFloor {
    /// Floor name ("Ground", "First", ...).
    pub name: String,
    /// Number of flats on the floor.
    pub flats: u32,
}

impl NewFloor {
    /// Flat range for the floor at `index`: flats are numbered from
    /// `(index + 1) * 100 + 1`.
    pub fn flat_range(&self, index: usize) -> String {
        let start = (index as u64 + 1) * 100 + 1;
        let end = start + u64::from(self.flats) - 1;
        format!("{start} to {end}")
    }
}

/// A building to be inserted into the project store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBuilding {
    /// Building name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Declared number of floors.
    pub total_floors: u32,
    /// Floors entered so far; never more than `total_floors`.
    pub floors: Vec<NewFloor>,
}

impl NewBuilding {
    /// Checks the form before it is sent.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation_field("name", "Building name is required"));
        }
        if self.total_floors == 0 {
            return Err(Error::validation_field(
                "total_floors",
                "Total floors must be at least 1",
            ));
        }
        if self.floors.is_empty() {
            return Err(Error::validation_field("floors", "Add at least one floor"));
        }
        if self.floors.len() > self.total_floors as usize {
            return Err(Error::validation_field(
                "floors",
                format!(
                    "{} floors entered but the building has only {}",
                    self.floors.len(),
                    self.total_floors
                ),
            ));
        }
        for (index, floor) in self.floors.iter().enumerate() {
            if floor.name.trim().is_empty() {
                return Err(Error::validation_field(
                    "floors",
                    format!("Floor {} needs a name", index + 1),
                ));
            }
            if floor.flats == 0 {
                return Err(Error::validation_field(
                    "floors",
                    format!("Floor '{}' needs at least one flat", floor.name.trim()),
                ));
            }
        }
        Ok(())
    }

    /// Floor names joined with `", "`.
    pub fn floor_names(&self) -> String {
        self.floors
            .iter()
            .map(|f| f.name.trim())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Flat ranges of every floor joined with `", "`.
    pub fn floor_flats(&self) -> String {
        self.floors
            .iter()
            .enumerate()
            .map(|(index, floor)| floor.flat_range(index))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
