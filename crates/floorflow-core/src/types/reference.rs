//! Vendor and work-category reference data.
//!
//! Both sheets share the same leading columns (timestamp, serial number,
//! category number, category name) and a trailing status column, so most
//! of the listing and lookup rules are written once against
//! [`ReferenceRow`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Status written to newly added reference rows.
pub const STATUS_ACTIVE: &str = "Active";

/// Status written when a reference row is retired.
pub const STATUS_INACTIVE: &str = "Inactive";

const SERIAL_PREFIX: &str = "SN-";

/// Shared view over vendor and work-category rows.
pub trait ReferenceRow {
    /// Zero-based position of the row among the sheet's data rows.
    fn position(&self) -> usize;
    /// Serial number (column B).
    fn serial_no(&self) -> &str;
    /// Category number within the serial batch (column C).
    fn category_no(&self) -> &str;
    /// Category name (column D).
    fn category_name(&self) -> &str;
    /// Status column.
    fn status(&self) -> &str;
    /// Every field value, used by free-text search.
    fn fields(&self) -> Vec<&str>;

    /// True when the status column reads exactly `Active`.
    fn is_active(&self) -> bool {
        self.status() == STATUS_ACTIVE
    }

    /// Composite key identifying this row for updates.
    fn composite_key(&self) -> CompositeKey {
        CompositeKey::new(self.serial_no(), self.category_no(), self.category_name())
    }
}

/// A vendor row (sheet columns A..I).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Zero-based data row position.
    pub position: usize,
    /// Column A.
    pub timestamp: String,
    /// Column B.
    pub serial_no: String,
    /// Column C.
    pub category_no: String,
    /// Column D.
    pub category: String,
    /// Column E.
    pub vendor_name: String,
    /// Column F.
    pub contact_number: String,
    /// Column G.
    pub email_id: String,
    /// Column H.
    pub address: String,
    /// Column I.
    pub status: String,
}

impl ReferenceRow for Vendor {
    fn position(&self) -> usize {
        self.position
    }

    fn serial_no(&self) -> &str {
        &self.serial_no
    }

    fn category_no(&self) -> &str {
        &self.category_no
    }

    fn category_name(&self) -> &str {
        &self.category
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn fields(&self) -> Vec<&str> {
        vec![
            &self.timestamp,
            &self.serial_no,
            &self.category_no,
            &self.category,
            &self.vendor_name,
            &self.contact_number,
            &self.email_id,
            &self.address,
            &self.status,
        ]
    }
}

/// A work-category stage row (sheet columns A..F).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCategory {
    /// Zero-based data row position.
    pub position: usize,
    /// Column A.
    pub timestamp: String,
    /// Column B.
    pub serial_no: String,
    /// Column C.
    pub category_no: String,
    /// Column D.
    pub category_name: String,
    /// Column E.
    pub stage: String,
    /// Column F.
    pub status: String,
}

impl ReferenceRow for WorkCategory {
    fn position(&self) -> usize {
        self.position
    }

    fn serial_no(&self) -> &str {
        &self.serial_no
    }

    fn category_no(&self) -> &str {
        &self.category_no
    }

    fn category_name(&self) -> &str {
        &self.category_name
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn fields(&self) -> Vec<&str> {
        vec![
            &self.timestamp,
            &self.serial_no,
            &self.category_no,
            &self.category_name,
            &self.stage,
            &self.status,
        ]
    }
}

/// Serial number, category number and category name of a reference row.
///
/// Rows carry no surrogate id, so updates relocate their target by this
/// triple on a fresh read. Matching is exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeKey {
    /// Serial number.
    pub serial_no: String,
    /// Category number.
    pub category_no: String,
    /// Category name.
    pub category_name: String,
}

impl CompositeKey {
    /// Creates a composite key.
    pub fn new(
        serial_no: impl Into<String>,
        category_no: impl Into<String>,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            serial_no: serial_no.into(),
            category_no: category_no.into(),
            category_name: category_name.into(),
        }
    }

    /// True when the row carries exactly this key.
    pub fn matches<R: ReferenceRow + ?Sized>(&self, row: &R) -> bool {
        row.serial_no() == self.serial_no
            && row.category_no() == self.category_no
            && row.category_name() == self.category_name
    }

    /// First row matching this key.
    pub fn locate<'a, R: ReferenceRow>(&self, entity: &str, rows: &'a [R]) -> Result<&'a R> {
        rows.iter()
            .find(|row| self.matches(*row))
            .ok_or_else(|| Error::row_not_found(entity, self.to_string()))
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.serial_no, self.category_no, self.category_name
        )
    }
}

/// Filters rows by exact (case-insensitive) category, then by a
/// case-insensitive substring search across every field.
///
/// Blank filters are ignored.
pub fn filter_rows<'a, R: ReferenceRow>(
    rows: &'a [R],
    category: Option<&str>,
    search: Option<&str>,
) -> Vec<&'a R> {
    let category = category.filter(|c| !c.is_empty()).map(str::to_lowercase);
    let search = search.filter(|s| !s.is_empty()).map(str::to_lowercase);

    rows.iter()
        .filter(|row| match &category {
            Some(wanted) => {
                !row.category_name().is_empty() && row.category_name().to_lowercase() == *wanted
            }
            None => true,
        })
        .filter(|row| match &search {
            Some(needle) => row
                .fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .collect()
}

/// Distinct non-blank category names, sorted ascending.
pub fn unique_categories<R: ReferenceRow>(rows: &[R]) -> Vec<String> {
    let mut names: Vec<String> = rows
        .iter()
        .map(|row| row.category_name())
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Next `SN-NNN` serial number after the highest existing one.
///
/// # Examples
///
/// ```
/// use floorflow_core::types::next_serial;
///
/// assert_eq!(next_serial(["SN-001", "SN-007", "legacy"]), "SN-008");
/// assert_eq!(next_serial(Vec::<&str>::new()), "SN-001");
/// assert_eq!(next_serial(["SN-999"]), "SN-1000");
/// ```
pub fn next_serial<'a>(serials: impl IntoIterator<Item = &'a str>) -> String {
    let highest = serials
        .into_iter()
        .filter_map(|serial| serial.strip_prefix(SERIAL_PREFIX))
        .filter_map(|rest| {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok()
        })
        .max()
        .unwrap_or(0);
    format!("{SERIAL_PREFIX}{:03}", highest + 1)
}

/// Timestamp written into column A of new reference rows (`dd/mm/yyyy`).
pub fn sheet_timestamp(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// One vendor entry of an add-vendors form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorDraft {
    /// Vendor name.
    pub vendor_name: String,
    /// Contact number.
    pub contact_number: String,
    /// Email address.
    pub email_id: String,
    /// Postal address (optional).
    pub address: String,
}

impl VendorDraft {
    /// An entry is submitted only when name, contact and email are filled in.
    pub fn is_complete(&self) -> bool {
        !self.vendor_name.trim().is_empty()
            && !self.contact_number.trim().is_empty()
            && !self.email_id.trim().is_empty()
    }
}

/// Vendors to add under one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorBatch {
    /// Category the vendors serve.
    pub category: String,
    /// Vendor entries; incomplete ones are skipped.
    pub vendors: Vec<VendorDraft>,
}

impl VendorBatch {
    /// Builds the rows to insert, numbering complete entries from 1.
    pub fn into_rows(self, serial_no: &str, timestamp: &str) -> Result<Vec<Vendor>> {
        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(Error::validation_field("category", "Please enter a category"));
        }

        let rows: Vec<Vendor> = self
            .vendors
            .into_iter()
            .filter(VendorDraft::is_complete)
            .enumerate()
            .map(|(index, draft)| Vendor {
                position: 0,
                timestamp: timestamp.to_string(),
                serial_no: serial_no.to_string(),
                category_no: (index + 1).to_string(),
                category: category.clone(),
                vendor_name: draft.vendor_name.trim().to_string(),
                contact_number: draft.contact_number.trim().to_string(),
                email_id: draft.email_id.trim().to_string(),
                address: draft.address.trim().to_string(),
                status: STATUS_ACTIVE.to_string(),
            })
            .collect();

        if rows.is_empty() {
            return Err(Error::validation_field(
                "vendors",
                "Please fill in at least one vendor with name, contact number, and email",
            ));
        }
        Ok(rows)
    }
}

/// Stages to add under one work category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCategoryBatch {
    /// Category name.
    pub category_name: String,
    /// Stage names; blank ones are skipped.
    pub stages: Vec<String>,
}

impl WorkCategoryBatch {
    /// Builds the rows to insert, numbering non-blank stages from 1.
    pub fn into_rows(self, serial_no: &str, timestamp: &str) -> Result<Vec<WorkCategory>> {
        let category_name = self.category_name.trim().to_string();
        if category_name.is_empty() {
            return Err(Error::validation_field(
                "category_name",
                "Please enter a category name",
            ));
        }

        let rows: Vec<WorkCategory> = self
            .stages
            .iter()
            .map(|stage| stage.trim())
            .filter(|stage| !stage.is_empty())
            .enumerate()
            .map(|(index, stage)| WorkCategory {
                position: 0,
                timestamp: timestamp.to_string(),
                serial_no: serial_no.to_string(),
                category_no: (index + 1).to_string(),
                category_name: category_name.clone(),
                stage: stage.to_string(),
                status: STATUS_ACTIVE.to_string(),
            })
            .collect();

        if rows.is_empty() {
            return Err(Error::validation_field(
                "stages",
                "Please fill in at least one stage",
            ));
        }
        Ok(rows)
    }
}

/// Column changes for a vendor row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorPatch {
    /// Column E.
    pub vendor_name: Option<String>,
    /// Column F.
    pub contact_number: Option<String>,
    /// Column G.
    pub email_id: Option<String>,
    /// Column H.
    pub address: Option<String>,
    /// Column I.
    pub status: Option<String>,
}

impl VendorPatch {
    /// Patch that only flips the status column to `Inactive`.
    pub fn deactivate() -> Self {
        Self {
            status: Some(STATUS_INACTIVE.to_string()),
            ..Self::default()
        }
    }
}

/// Column changes for a work-category row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCategoryPatch {
    /// Column D.
    pub category_name: Option<String>,
    /// Column E.
    pub stage: Option<String>,
    /// Column F.
    pub status: Option<String>,
}

impl WorkCategoryPatch {
    /// Patch that only flips the status column to `Inactive`.
    pub fn deactivate() -> Self {
        Self {
            status: Some(STATUS_INACTIVE.to_string()),
            ..Self::default()
        }
    }
}
