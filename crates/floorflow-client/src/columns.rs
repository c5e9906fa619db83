//! Positional column layout of the reference sheets.
//!
//! Vendors: A timestamp, B serial, C category no, D category, E vendor
//! name, F contact, G email, H address, I status.
//! Work categories: A timestamp, B serial, C category no, D category name,
//! E stage, F status.
//!
//! Update arrays send `""` for columns the store must leave alone and
//! `" "` for columns the user cleared.

use floorflow_core::types::{Vendor, VendorPatch, WorkCategory, WorkCategoryPatch};

use crate::gviz::SheetRow;

/// Header rows above the first data row, plus one for 1-based numbering.
const ROW_OFFSET: usize = 2;

/// Sheet row number of the data row at `position`.
pub fn sheet_row(position: usize) -> usize {
    position + ROW_OFFSET
}

fn skip() -> String {
    String::new()
}

fn update_cell(value: Option<&String>) -> String {
    match value {
        None => skip(),
        Some(v) if v.is_empty() => " ".to_string(),
        Some(v) => v.clone(),
    }
}

pub(crate) fn vendor_from_row(row: &SheetRow) -> Vendor {
    Vendor {
        position: row.position,
        timestamp: row.text(0),
        serial_no: row.text(1),
        category_no: row.text(2),
        category: row.text(3),
        vendor_name: row.text(4),
        contact_number: row.text(5),
        email_id: row.text(6),
        address: row.text(7),
        status: row.text(8),
    }
}

pub(crate) fn work_category_from_row(row: &SheetRow) -> WorkCategory {
    WorkCategory {
        position: row.position,
        timestamp: row.text(0),
        serial_no: row.text(1),
        category_no: row.text(2),
        category_name: row.text(3),
        stage: row.text(4),
        status: row.text(5),
    }
}

pub(crate) fn vendor_insert(row: &Vendor) -> Vec<String> {
    vec![
        row.timestamp.clone(),
        row.serial_no.clone(),
        row.category_no.clone(),
        row.category.clone(),
        row.vendor_name.clone(),
        row.contact_number.clone(),
        row.email_id.clone(),
        row.address.clone(),
        row.status.clone(),
    ]
}

pub(crate) fn vendor_update(patch: &VendorPatch) -> Vec<String> {
    vec![
        skip(),
        skip(),
        skip(),
        skip(),
        update_cell(patch.vendor_name.as_ref()),
        update_cell(patch.contact_number.as_ref()),
        update_cell(patch.email_id.as_ref()),
        update_cell(patch.address.as_ref()),
        update_cell(patch.status.as_ref()),
    ]
}

pub(crate) fn work_category_insert(row: &WorkCategory) -> Vec<String> {
    vec![
        row.timestamp.clone(),
        row.serial_no.clone(),
        row.category_no.clone(),
        row.category_name.clone(),
        row.stage.clone(),
        row.status.clone(),
    ]
}

pub(crate) fn work_category_update(patch: &WorkCategoryPatch) -> Vec<String> {
    vec![
        skip(),
        skip(),
        skip(),
        update_cell(patch.category_name.as_ref()),
        update_cell(patch.stage.as_ref()),
        update_cell(patch.status.as_ref()),
    ]
}
