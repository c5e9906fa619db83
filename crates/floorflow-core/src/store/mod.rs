//! The project store seam.
//!
//! All persistent state lives in a remote spreadsheet service. This module
//! defines the [`SheetStore`] trait every backend implements: the HTTP
//! client in `floorflow-client`, and [`MockSheetStore`] for tests.
//!
//! Query methods return typed records; the translation from store-native
//! column names or positions happens inside each backend.

mod mock;

pub use mock::{MockSheetStore, StoreOp};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::layout::NewBuilding;
use crate::types::{
    Building, BuildingKey, Flat, FlatKey, Floor, FloorKey, TaskRecord, Vendor, VendorPatch,
    WorkCategory, WorkCategoryPatch,
};
use crate::{Error, Result};

/// Vendor, payment and billing values assigned to one task category of a
/// building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeta {
    /// Building the category belongs to.
    pub building_name: String,
    /// Task category.
    pub category: String,
    /// Assigned vendor.
    pub vendor_name: String,
    /// Payment marker ("Yes"/"No").
    pub payment: String,
    /// Billing marker ("Yes"/"No").
    pub billing: String,
}

impl CategoryMeta {
    /// Refuses the update unless vendor, payment and billing are all set.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("vendor_name", &self.vendor_name),
            ("payment", &self.payment),
            ("billing", &self.billing),
        ] {
            if value.trim().is_empty() {
                return Err(Error::validation_field(
                    field,
                    "vendor, payment and billing must all be set",
                ));
            }
        }
        Ok(())
    }
}

/// Remote spreadsheet-backed project store.
///
/// Every method maps to one request (or, for the reference sheets, one row
/// per request). Failures carry the [`Error`] taxonomy: transport,
/// malformed response, or rejection by the store.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// All buildings.
    async fn buildings(&self) -> Result<Vec<Building>>;

    /// Floors of a building.
    async fn floors(&self, building: &BuildingKey) -> Result<Vec<Floor>>;

    /// Flats of a floor.
    async fn flats(&self, building: &BuildingKey, floor: &FloorKey) -> Result<Vec<Flat>>;

    /// Tasks of one flat.
    async fn flat_tasks(
        &self,
        building: &BuildingKey,
        floor: &FloorKey,
        flat: &FlatKey,
    ) -> Result<Vec<TaskRecord>>;

    /// Progress records of a building (completion, payment and bill markers).
    async fn building_progress(&self, building: &BuildingKey) -> Result<Vec<TaskRecord>>;

    /// Every task of a building, used for category and floor breakdowns.
    async fn building_tasks(&self, building: &BuildingKey) -> Result<Vec<TaskRecord>>;

    /// Vendors through the named-column query path.
    async fn vendors(&self) -> Result<Vec<Vendor>>;

    /// Work categories through the named-column query path.
    async fn work_categories(&self) -> Result<Vec<WorkCategory>>;

    /// Vendors read positionally from the sheet export, with row positions.
    async fn vendor_sheet(&self) -> Result<Vec<Vendor>>;

    /// Work categories read positionally from the sheet export, with row
    /// positions.
    async fn work_category_sheet(&self) -> Result<Vec<WorkCategory>>;

    /// Inserts a building with its floors.
    async fn insert_building(&self, building: &NewBuilding) -> Result<()>;

    /// Stamps the completion date of a task.
    async fn mark_task_complete(&self, task_no: &str, building_name: &str) -> Result<()>;

    /// Assigns vendor, payment and billing values to a task category.
    async fn update_category_meta(&self, meta: &CategoryMeta) -> Result<()>;

    /// Appends one vendor row.
    async fn insert_vendor(&self, row: &Vendor) -> Result<()>;

    /// Rewrites columns of the vendor row at `position`.
    async fn update_vendor(&self, position: usize, patch: &VendorPatch) -> Result<()>;

    /// Appends one work-category row.
    async fn insert_work_category(&self, row: &WorkCategory) -> Result<()>;

    /// Rewrites columns of the work-category row at `position`.
    async fn update_work_category(&self, position: usize, patch: &WorkCategoryPatch)
    -> Result<()>;
}
