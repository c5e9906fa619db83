//! Composite keys that scope queries to the project store.
//!
//! The store identifies buildings, floors and flats by pairs of strings
//! rather than surrogate ids. Keys carry no invariant beyond "every
//! component is non-blank".

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

fn require(field: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(Error::validation_field(field, "must not be empty"));
    }
    Ok(value)
}

/// Identifies a building: serial number plus building name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildingKey {
    serial_no: String,
    name: String,
}

impl BuildingKey {
    /// Creates a building key.
    ///
    /// # Examples
    ///
    /// ```
    /// use floorflow_core::BuildingKey;
    ///
    /// let key = BuildingKey::new("7", "Sunrise Towers").unwrap();
    /// assert_eq!(key.name(), "Sunrise Towers");
    /// assert!(BuildingKey::new("", "Sunrise Towers").is_err());
    /// ```
    pub fn new(serial_no: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            serial_no: require("serial_no", serial_no)?,
            name: require("building_name", name)?,
        })
    }

    /// Serial number column value.
    pub fn serial_no(&self) -> &str {
        &self.serial_no
    }

    /// Building name column value.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for BuildingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.serial_no)
    }
}

/// Identifies a floor inside a building: CB number plus floor name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloorKey {
    cb_no: String,
    name: String,
}

impl FloorKey {
    /// Creates a floor key.
    pub fn new(cb_no: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            cb_no: require("cb_no", cb_no)?,
            name: require("floor_name", name)?,
        })
    }

    /// CB number column value.
    pub fn cb_no(&self) -> &str {
        &self.cb_no
    }

    /// Floor name column value.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FloorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.cb_no)
    }
}

/// Identifies a flat on a floor: CB number plus BF number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlatKey {
    cb_no: String,
    bf_no: String,
}

impl FlatKey {
    /// Creates a flat key.
    pub fn new(cb_no: impl Into<String>, bf_no: impl Into<String>) -> Result<Self> {
        Ok(Self {
            cb_no: require("cb_no", cb_no)?,
            bf_no: require("bf_no", bf_no)?,
        })
    }

    /// CB number column value.
    pub fn cb_no(&self) -> &str {
        &self.cb_no
    }

    /// BF number column value.
    pub fn bf_no(&self) -> &str {
        &self.bf_no
    }
}

impl fmt::Display for FlatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cb_no, self.bf_no)
    }
}
