//! [`SheetStore`] over HTTP.
//!
//! Queries are `GET {script_url}?action=...`; mutations are `POST`s either
//! as form bodies (inserts and reference-sheet updates) or as query
//! parameters with no body (`updateActualDate`, `updateCategoryMeta`).
//! Reference sheets are read positionally from the export endpoint.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use floorflow_core::layout::NewBuilding;
use floorflow_core::types::{VendorPatch, WorkCategoryPatch};
use floorflow_core::{
    Building, BuildingKey, CategoryMeta, Flat, FlatKey, Floor, FloorKey, Result, SheetStore,
    TaskRecord, Vendor, WorkCategory,
};

use crate::columns;
use crate::envelope::Envelope;
use crate::gviz::{self, SheetRow};
use crate::rows::{BuildingRow, FlatRow, FloorRow, TaskRow, VendorRow, WorkCategoryRow};
use crate::{ClientConfig, ClientError};

/// Spreadsheet store reached through the script and export endpoints.
#[derive(Debug, Clone)]
pub struct HttpSheetStore {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpSheetStore {
    /// Creates a store with a fresh HTTP client.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a store sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// Endpoint configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ========================================================================
    // Transport
    // ========================================================================

    async fn query<R>(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<Vec<R>, ClientError>
    where
        R: DeserializeOwned,
    {
        tracing::debug!(action, "querying store");
        let response = self
            .client
            .get(&self.config.script_url)
            .query(&[("action", action)])
            .query(params)
            .send()
            .await?;
        let body = read_body(response).await?;
        let rows = Envelope::parse(&body)?.into_rows()?;
        tracing::debug!(action, rows = rows.len(), "store answered");
        Ok(rows)
    }

    async fn post_form(
        &self,
        action: &str,
        form: &[(&str, String)],
    ) -> std::result::Result<(), ClientError> {
        tracing::debug!(action, "posting form");
        let response = self
            .client
            .post(&self.config.script_url)
            .form(form)
            .send()
            .await?;
        let body = read_body(response).await?;
        Envelope::parse(&body)?.into_unit()
    }

    async fn post_params(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<(), ClientError> {
        tracing::debug!(action, "posting update");
        let response = self
            .client
            .post(&self.config.script_url)
            .query(&[("action", action)])
            .query(params)
            .send()
            .await?;
        let body = read_body(response).await?;
        Envelope::parse(&body)?.into_unit()
    }

    async fn export(&self, sheet: &str) -> std::result::Result<Vec<SheetRow>, ClientError> {
        tracing::debug!(sheet, "reading sheet export");
        let response = self
            .client
            .get(self.config.export_url())
            .query(&[("tqx", "out:json"), ("sheet", sheet), ("headers", "1")])
            .send()
            .await?;
        let body = read_body(response).await?;
        gviz::parse_export(&body)
    }

    async fn insert_row(
        &self,
        sheet: &str,
        cells: Vec<String>,
    ) -> std::result::Result<(), ClientError> {
        let form = [
            ("sheetName", sheet.to_string()),
            ("action", "insert".to_string()),
            ("rowData", serde_json::to_string(&cells)?),
        ];
        self.post_form("insert", &form).await
    }

    async fn update_row(
        &self,
        sheet: &str,
        position: usize,
        cells: Vec<String>,
    ) -> std::result::Result<(), ClientError> {
        let form = [
            ("sheetName", sheet.to_string()),
            ("action", "update".to_string()),
            ("rowIndex", columns::sheet_row(position).to_string()),
            ("rowData", serde_json::to_string(&cells)?),
        ];
        self.post_form("update", &form).await
    }
}

async fn read_body(response: reqwest::Response) -> std::result::Result<String, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response.text().await?)
}

fn logged<T>(action: &str, result: std::result::Result<T, ClientError>) -> Result<T> {
    result.map_err(|err| {
        tracing::warn!(action, error = %err, "store request failed");
        err.into()
    })
}

// ============================================================================
// SheetStore
// ============================================================================

#[async_trait]
impl SheetStore for HttpSheetStore {
    async fn buildings(&self) -> Result<Vec<Building>> {
        let rows: Vec<BuildingRow> = logged(
            "fetchAllBuildings",
            self.query("fetchAllBuildings", &[]).await,
        )?;
        Ok(rows.into_iter().map(Building::from).collect())
    }

    async fn floors(&self, building: &BuildingKey) -> Result<Vec<Floor>> {
        let params = [
            ("serialNo", building.serial_no()),
            ("buildingName", building.name()),
        ];
        let rows: Vec<FloorRow> = logged(
            "fetchBuildingFloors",
            self.query("fetchBuildingFloors", &params).await,
        )?;
        Ok(rows.into_iter().map(Floor::from).collect())
    }

    async fn flats(&self, building: &BuildingKey, floor: &FloorKey) -> Result<Vec<Flat>> {
        let params = [
            ("serialNo", building.serial_no()),
            ("cbNo", floor.cb_no()),
            ("buildingName", building.name()),
            ("floorName", floor.name()),
        ];
        let rows: Vec<FlatRow> = logged(
            "fetchFlatsByFloor",
            self.query("fetchFlatsByFloor", &params).await,
        )?;
        Ok(rows.into_iter().map(Flat::from).collect())
    }

    async fn flat_tasks(
        &self,
        building: &BuildingKey,
        floor: &FloorKey,
        flat: &FlatKey,
    ) -> Result<Vec<TaskRecord>> {
        let params = [
            ("serialNo", building.serial_no()),
            ("cbNo", flat.cb_no()),
            ("bfNo", flat.bf_no()),
            ("buildingName", building.name()),
            ("floorName", floor.name()),
        ];
        let rows: Vec<TaskRow> = logged(
            "fetchFlatTasks",
            self.query("fetchFlatTasks", &params).await,
        )?;
        Ok(rows.into_iter().map(TaskRecord::from).collect())
    }

    async fn building_progress(&self, building: &BuildingKey) -> Result<Vec<TaskRecord>> {
        let params = [
            ("serialNo", building.serial_no()),
            ("buildingName", building.name()),
        ];
        let rows: Vec<TaskRow> =
            logged("fetchProges", self.query("fetchProges", &params).await)?;
        Ok(rows.into_iter().map(TaskRecord::from).collect())
    }

    async fn building_tasks(&self, building: &BuildingKey) -> Result<Vec<TaskRecord>> {
        let params = [
            ("serialNo", building.serial_no()),
            ("buildingName", building.name()),
        ];
        let rows: Vec<TaskRow> = logged(
            "fetchSpecificBuidlingData",
            self.query("fetchSpecificBuidlingData", &params).await,
        )?;
        Ok(rows.into_iter().map(TaskRecord::from).collect())
    }

    async fn vendors(&self) -> Result<Vec<Vendor>> {
        let rows: Vec<VendorRow> =
            logged("fetchAllVendors", self.query("fetchAllVendors", &[]).await)?;
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(position, row)| row.into_vendor(position))
            .collect())
    }

    async fn work_categories(&self) -> Result<Vec<WorkCategory>> {
        let rows: Vec<WorkCategoryRow> = logged(
            "fetchAllWorkCategory",
            self.query("fetchAllWorkCategory", &[]).await,
        )?;
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(position, row)| row.into_work_category(position))
            .collect())
    }

    async fn vendor_sheet(&self) -> Result<Vec<Vendor>> {
        let rows = logged("export", self.export(&self.config.sheets.vendors).await)?;
        Ok(rows.iter().map(columns::vendor_from_row).collect())
    }

    async fn work_category_sheet(&self) -> Result<Vec<WorkCategory>> {
        let rows = logged(
            "export",
            self.export(&self.config.sheets.work_categories).await,
        )?;
        Ok(rows.iter().map(columns::work_category_from_row).collect())
    }

    async fn insert_building(&self, building: &NewBuilding) -> Result<()> {
        building.validate()?;
        let form = [
            ("action", "insert".to_string()),
            ("buildingName", building.name.clone()),
            ("address", building.address.clone()),
            ("totalFloors", building.total_floors.to_string()),
            ("floorNames", building.floor_names()),
            ("floorFlats", building.floor_flats()),
        ];
        logged("insert", self.post_form("insert", &form).await)?;
        tracing::info!(building = %building.name, "building added");
        Ok(())
    }

    async fn mark_task_complete(&self, task_no: &str, building_name: &str) -> Result<()> {
        let params = [("taskNo", task_no), ("buildingName", building_name)];
        logged(
            "updateActualDate",
            self.post_params("updateActualDate", &params).await,
        )
    }

    async fn update_category_meta(&self, meta: &CategoryMeta) -> Result<()> {
        meta.validate()?;
        let params = [
            ("buildingName", meta.building_name.as_str()),
            ("category", meta.category.as_str()),
            ("vendorName", meta.vendor_name.as_str()),
            ("payment", meta.payment.as_str()),
            ("billing", meta.billing.as_str()),
        ];
        logged(
            "updateCategoryMeta",
            self.post_params("updateCategoryMeta", &params).await,
        )
    }

    async fn insert_vendor(&self, row: &Vendor) -> Result<()> {
        logged(
            "insert",
            self.insert_row(&self.config.sheets.vendors, columns::vendor_insert(row))
                .await,
        )
    }

    async fn update_vendor(&self, position: usize, patch: &VendorPatch) -> Result<()> {
        logged(
            "update",
            self.update_row(
                &self.config.sheets.vendors,
                position,
                columns::vendor_update(patch),
            )
            .await,
        )
    }

    async fn insert_work_category(&self, row: &WorkCategory) -> Result<()> {
        logged(
            "insert",
            self.insert_row(
                &self.config.sheets.work_categories,
                columns::work_category_insert(row),
            )
            .await,
        )
    }

    async fn update_work_category(
        &self,
        position: usize,
        patch: &WorkCategoryPatch,
    ) -> Result<()> {
        logged(
            "update",
            self.update_row(
                &self.config.sheets.work_categories,
                position,
                columns::work_category_update(patch),
            )
            .await,
        )
    }
}
