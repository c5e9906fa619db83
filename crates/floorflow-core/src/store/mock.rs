//! In-memory [`SheetStore`] for tests and offline runs.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{CategoryMeta, SheetStore};
use crate::layout::NewBuilding;
use crate::types::{
    Building, BuildingKey, Flat, FlatKey, Floor, FloorKey, Marker, TaskRecord, Vendor,
    VendorPatch, WorkCategory, WorkCategoryPatch,
};
use crate::{Error, Result};

/// Operations of the store, used to script failures and inspect calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// [`SheetStore::buildings`]
    Buildings,
    /// [`SheetStore::floors`]
    Floors,
    /// [`SheetStore::flats`]
    Flats,
    /// [`SheetStore::flat_tasks`]
    FlatTasks,
    /// [`SheetStore::building_progress`]
    BuildingProgress,
    /// [`SheetStore::building_tasks`]
    BuildingTasks,
    /// [`SheetStore::vendors`]
    Vendors,
    /// [`SheetStore::work_categories`]
    WorkCategories,
    /// [`SheetStore::vendor_sheet`]
    VendorSheet,
    /// [`SheetStore::work_category_sheet`]
    WorkCategorySheet,
    /// [`SheetStore::insert_building`]
    InsertBuilding,
    /// [`SheetStore::mark_task_complete`]
    MarkTaskComplete,
    /// [`SheetStore::update_category_meta`]
    UpdateCategoryMeta,
    /// [`SheetStore::insert_vendor`]
    InsertVendor,
    /// [`SheetStore::update_vendor`]
    UpdateVendor,
    /// [`SheetStore::insert_work_category`]
    InsertWorkCategory,
    /// [`SheetStore::update_work_category`]
    UpdateWorkCategory,
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    Transport,
    Rejected,
}

#[derive(Default)]
struct MockData {
    buildings: Vec<Building>,
    floors: Vec<Floor>,
    flats: Vec<Flat>,
    flat_tasks: HashMap<String, Vec<TaskRecord>>,
    progress: HashMap<String, Vec<TaskRecord>>,
    building_tasks: HashMap<String, Vec<TaskRecord>>,
    vendors: Vec<Vendor>,
    categories: Vec<WorkCategory>,
    failures: HashMap<StoreOp, Failure>,
    rejected_progress: HashSet<String>,
    calls: Vec<StoreOp>,
    category_meta: Vec<CategoryMeta>,
}

/// A [`SheetStore`] backed by in-memory vectors.
///
/// Mutations are applied to the held data so a later read sees them.
/// Individual operations can be scripted to fail with a transport error or
/// a store rejection.
#[derive(Default)]
pub struct MockSheetStore {
    data: Mutex<MockData>,
}

fn building_id(key: &BuildingKey) -> String {
    format!("{}|{}", key.serial_no(), key.name().to_lowercase())
}

impl MockSheetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn data(&self) -> MutexGuard<'_, MockData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds buildings.
    pub fn with_buildings(self, buildings: Vec<Building>) -> Self {
        self.data().buildings.extend(buildings);
        self
    }

    /// Adds floors.
    pub fn with_floors(self, floors: Vec<Floor>) -> Self {
        self.data().floors.extend(floors);
        self
    }

    /// Adds flats.
    pub fn with_flats(self, flats: Vec<Flat>) -> Self {
        self.data().flats.extend(flats);
        self
    }

    /// Sets the tasks of one flat.
    pub fn with_flat_tasks(self, flat: &FlatKey, tasks: Vec<TaskRecord>) -> Self {
        self.data().flat_tasks.insert(flat.to_string(), tasks);
        self
    }

    /// Sets the progress records of one building.
    pub fn with_progress(self, building: &BuildingKey, records: Vec<TaskRecord>) -> Self {
        self.data().progress.insert(building_id(building), records);
        self
    }

    /// Sets the full task list of one building.
    pub fn with_building_tasks(self, building: &BuildingKey, records: Vec<TaskRecord>) -> Self {
        self.data()
            .building_tasks
            .insert(building_id(building), records);
        self
    }

    /// Adds vendor rows; positions are assigned in insertion order.
    pub fn with_vendors(self, vendors: Vec<Vendor>) -> Self {
        {
            let mut data = self.data();
            for mut vendor in vendors {
                vendor.position = data.vendors.len();
                data.vendors.push(vendor);
            }
        }
        self
    }

    /// Adds work-category rows; positions are assigned in insertion order.
    pub fn with_work_categories(self, categories: Vec<WorkCategory>) -> Self {
        {
            let mut data = self.data();
            for mut category in categories {
                category.position = data.categories.len();
                data.categories.push(category);
            }
        }
        self
    }

    /// Makes `op` fail with a transport error.
    pub fn fail_transport(&self, op: StoreOp) {
        self.data().failures.insert(op, Failure::Transport);
    }

    /// Makes `op` fail as rejected by the store.
    pub fn fail_rejected(&self, op: StoreOp) {
        self.data().failures.insert(op, Failure::Rejected);
    }

    /// Makes the progress query of one building report `success: false`.
    pub fn reject_progress_for(&self, building: &BuildingKey) {
        self.data().rejected_progress.insert(building_id(building));
    }

    /// Clears every scripted failure.
    pub fn heal(&self) {
        let mut data = self.data();
        data.failures.clear();
        data.rejected_progress.clear();
    }

    /// Operations called so far, in order.
    pub fn calls(&self) -> Vec<StoreOp> {
        self.data().calls.clone()
    }

    /// Number of times `op` was called.
    pub fn call_count(&self, op: StoreOp) -> usize {
        self.data().calls.iter().filter(|c| **c == op).count()
    }

    /// Category metadata received so far.
    pub fn category_meta(&self) -> Vec<CategoryMeta> {
        self.data().category_meta.clone()
    }

    /// Current vendor rows.
    pub fn vendor_rows(&self) -> Vec<Vendor> {
        self.data().vendors.clone()
    }

    /// Current work-category rows.
    pub fn work_category_rows(&self) -> Vec<WorkCategory> {
        self.data().categories.clone()
    }

    /// Current buildings.
    pub fn building_rows(&self) -> Vec<Building> {
        self.data().buildings.clone()
    }

    /// Records the call and returns the locked data, or the scripted failure.
    fn enter(&self, op: StoreOp) -> Result<MutexGuard<'_, MockData>> {
        let mut data = self.data();
        data.calls.push(op);
        let failure = data.failures.get(&op).copied();
        match failure {
            Some(Failure::Transport) => Err(Error::transport(format!("{op:?} unreachable"))),
            Some(Failure::Rejected) => Err(Error::rejected(format!("{op:?} rejected"))),
            None => Ok(data),
        }
    }
}

fn apply_patch(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

#[async_trait]
impl SheetStore for MockSheetStore {
    async fn buildings(&self) -> Result<Vec<Building>> {
        Ok(self.enter(StoreOp::Buildings)?.buildings.clone())
    }

    async fn floors(&self, building: &BuildingKey) -> Result<Vec<Floor>> {
        let data = self.enter(StoreOp::Floors)?;
        Ok(data
            .floors
            .iter()
            .filter(|f| f.serial_no == building.serial_no() && f.building_name == building.name())
            .cloned()
            .collect())
    }

    async fn flats(&self, building: &BuildingKey, floor: &FloorKey) -> Result<Vec<Flat>> {
        let data = self.enter(StoreOp::Flats)?;
        Ok(data
            .flats
            .iter()
            .filter(|f| {
                f.serial_no == building.serial_no()
                    && f.cb_no == floor.cb_no()
                    && f.floor_name == floor.name()
            })
            .cloned()
            .collect())
    }

    async fn flat_tasks(
        &self,
        _building: &BuildingKey,
        _floor: &FloorKey,
        flat: &FlatKey,
    ) -> Result<Vec<TaskRecord>> {
        let data = self.enter(StoreOp::FlatTasks)?;
        Ok(data
            .flat_tasks
            .get(&flat.to_string())
            .cloned()
            .unwrap_or_default())
    }

    async fn building_progress(&self, building: &BuildingKey) -> Result<Vec<TaskRecord>> {
        let data = self.enter(StoreOp::BuildingProgress)?;
        let id = building_id(building);
        if data.rejected_progress.contains(&id) {
            return Err(Error::rejected(format!("no progress data for {building}")));
        }
        Ok(data.progress.get(&id).cloned().unwrap_or_default())
    }

    async fn building_tasks(&self, building: &BuildingKey) -> Result<Vec<TaskRecord>> {
        let data = self.enter(StoreOp::BuildingTasks)?;
        Ok(data
            .building_tasks
            .get(&building_id(building))
            .cloned()
            .unwrap_or_default())
    }

    async fn vendors(&self) -> Result<Vec<Vendor>> {
        Ok(self.enter(StoreOp::Vendors)?.vendors.clone())
    }

    async fn work_categories(&self) -> Result<Vec<WorkCategory>> {
        Ok(self.enter(StoreOp::WorkCategories)?.categories.clone())
    }

    async fn vendor_sheet(&self) -> Result<Vec<Vendor>> {
        Ok(self.enter(StoreOp::VendorSheet)?.vendors.clone())
    }

    async fn work_category_sheet(&self) -> Result<Vec<WorkCategory>> {
        Ok(self.enter(StoreOp::WorkCategorySheet)?.categories.clone())
    }

    async fn insert_building(&self, building: &NewBuilding) -> Result<()> {
        let mut data = self.enter(StoreOp::InsertBuilding)?;
        let serial_no = (data.buildings.len() + 1).to_string();
        data.buildings.push(Building {
            serial_no,
            name: building.name.clone(),
            address: Some(building.address.clone()),
            total_floors: Some(building.total_floors.to_string()),
            flat_ranges: Some(building.floor_flats()),
            work_status: None,
        });
        Ok(())
    }

    async fn mark_task_complete(&self, task_no: &str, _building_name: &str) -> Result<()> {
        let mut data = self.enter(StoreOp::MarkTaskComplete)?;
        let today = crate::types::sheet_timestamp(chrono::Local::now().date_naive());
        for task in data.flat_tasks.values_mut().flatten() {
            if task.task_no.as_deref() == Some(task_no) {
                task.actual_date = Some(today.clone());
            }
        }
        Ok(())
    }

    async fn update_category_meta(&self, meta: &CategoryMeta) -> Result<()> {
        let mut data = self.enter(StoreOp::UpdateCategoryMeta)?;
        for task in data.flat_tasks.values_mut().flatten() {
            if task.category.as_deref() == Some(meta.category.as_str()) {
                task.vendor_name = Some(meta.vendor_name.clone());
                task.payment = Marker::from(meta.payment.as_str());
                task.bill = Marker::from(meta.billing.as_str());
            }
        }
        data.category_meta.push(meta.clone());
        Ok(())
    }

    async fn insert_vendor(&self, row: &Vendor) -> Result<()> {
        let mut data = self.enter(StoreOp::InsertVendor)?;
        let mut row = row.clone();
        row.position = data.vendors.len();
        data.vendors.push(row);
        Ok(())
    }

    async fn update_vendor(&self, position: usize, patch: &VendorPatch) -> Result<()> {
        let mut data = self.enter(StoreOp::UpdateVendor)?;
        let row = data
            .vendors
            .get_mut(position)
            .ok_or_else(|| Error::rejected(format!("row {position} out of range")))?;
        apply_patch(&mut row.vendor_name, &patch.vendor_name);
        apply_patch(&mut row.contact_number, &patch.contact_number);
        apply_patch(&mut row.email_id, &patch.email_id);
        apply_patch(&mut row.address, &patch.address);
        apply_patch(&mut row.status, &patch.status);
        Ok(())
    }

    async fn insert_work_category(&self, row: &WorkCategory) -> Result<()> {
        let mut data = self.enter(StoreOp::InsertWorkCategory)?;
        let mut row = row.clone();
        row.position = data.categories.len();
        data.categories.push(row);
        Ok(())
    }

    async fn update_work_category(
        &self,
        position: usize,
        patch: &WorkCategoryPatch,
    ) -> Result<()> {
        let mut data = self.enter(StoreOp::UpdateWorkCategory)?;
        let row = data
            .categories
            .get_mut(position)
            .ok_or_else(|| Error::rejected(format!("row {position} out of range")))?;
        apply_patch(&mut row.category_name, &patch.category_name);
        apply_patch(&mut row.stage, &patch.stage);
        apply_patch(&mut row.status, &patch.status);
        Ok(())
    }
}
