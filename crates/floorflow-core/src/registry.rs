//! Vendor and work-category maintenance.
//!
//! Reference rows have no stable id. Edits re-read the sheet, relocate the
//! target by its [`CompositeKey`] and update that position; a key that no
//! longer matches any row fails with [`Error::RowNotFound`] rather than
//! touching the wrong row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::SheetStore;
use crate::types::{
    CompositeKey, ReferenceRow, Vendor, VendorBatch, VendorPatch, WorkCategory,
    WorkCategoryBatch, WorkCategoryPatch, next_serial, sheet_timestamp,
};
use crate::{Error, Result};

/// Outcome of adding a batch of reference rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedBatch {
    /// Serial number shared by the new rows.
    pub serial_no: String,
    /// Rows written.
    pub count: usize,
}

fn assign_serial<'a, R: ReferenceRow + 'a>(existing: &'a [R]) -> String {
    next_serial(existing.iter().map(|row| row.serial_no()))
}

/// Adds the complete entries of a vendor batch under a new serial number.
///
/// Rows are written one request at a time; the first failure stops the
/// batch.
pub async fn add_vendors<S>(store: &S, batch: VendorBatch, today: NaiveDate) -> Result<AddedBatch>
where
    S: SheetStore + ?Sized,
{
    let mut rows = batch.into_rows("", &sheet_timestamp(today))?;
    let existing = store.vendor_sheet().await?;
    let serial_no = assign_serial(&existing);
    for row in &mut rows {
        row.serial_no = serial_no.clone();
    }
    for row in &rows {
        store.insert_vendor(row).await.inspect_err(|err| {
            log::error!("Failed to add vendor {}: {err}", row.vendor_name);
        })?;
    }
    log::info!("Added {} vendor(s) with serial number {serial_no}", rows.len());
    Ok(AddedBatch {
        serial_no,
        count: rows.len(),
    })
}

/// Adds the non-blank stages of a work-category batch under a new serial
/// number.
pub async fn add_work_categories<S>(
    store: &S,
    batch: WorkCategoryBatch,
    today: NaiveDate,
) -> Result<AddedBatch>
where
    S: SheetStore + ?Sized,
{
    let mut rows = batch.into_rows("", &sheet_timestamp(today))?;
    let existing = store.work_category_sheet().await?;
    let serial_no = assign_serial(&existing);
    for row in &mut rows {
        row.serial_no = serial_no.clone();
    }
    for row in &rows {
        store.insert_work_category(row).await.inspect_err(|err| {
            log::error!("Failed to add stage {}: {err}", row.stage);
        })?;
    }
    log::info!(
        "Added {} stage(s) with serial number {serial_no}",
        rows.len()
    );
    Ok(AddedBatch {
        serial_no,
        count: rows.len(),
    })
}

/// Updates the vendor row carrying `key`. Returns the row as it was found.
pub async fn edit_vendor<S>(store: &S, key: &CompositeKey, patch: &VendorPatch) -> Result<Vendor>
where
    S: SheetStore + ?Sized,
{
    if patch == &VendorPatch::default() {
        return Err(Error::validation("nothing to update"));
    }
    let rows = store.vendor_sheet().await?;
    let row = key.locate("vendor", &rows)?.clone();
    store.update_vendor(row.position, patch).await?;
    log::info!("Updated vendor {key} at data row {}", row.position);
    Ok(row)
}

/// Sets the vendor row carrying `key` to `Inactive`.
pub async fn deactivate_vendor<S>(store: &S, key: &CompositeKey) -> Result<Vendor>
where
    S: SheetStore + ?Sized,
{
    edit_vendor(store, key, &VendorPatch::deactivate()).await
}

/// Updates the work-category row carrying `key`. Returns the row as it was
/// found.
pub async fn edit_work_category<S>(
    store: &S,
    key: &CompositeKey,
    patch: &WorkCategoryPatch,
) -> Result<WorkCategory>
where
    S: SheetStore + ?Sized,
{
    if patch == &WorkCategoryPatch::default() {
        return Err(Error::validation("nothing to update"));
    }
    let rows = store.work_category_sheet().await?;
    let row = key.locate("category", &rows)?.clone();
    store.update_work_category(row.position, patch).await?;
    log::info!("Updated work category {key} at data row {}", row.position);
    Ok(row)
}

/// Sets the work-category row carrying `key` to `Inactive`.
pub async fn deactivate_work_category<S>(store: &S, key: &CompositeKey) -> Result<WorkCategory>
where
    S: SheetStore + ?Sized,
{
    edit_work_category(store, key, &WorkCategoryPatch::deactivate()).await
}
