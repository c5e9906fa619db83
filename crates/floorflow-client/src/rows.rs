//! Store-native row shapes for the named-column queries.
//!
//! Each struct mirrors the column headers the script endpoint returns,
//! misspellings included, and converts into the matching core record.

use serde::Deserialize;

use floorflow_core::types::{Marker, Vendor, WorkCategory};
use floorflow_core::{Building, Flat, Floor, TaskRecord};

use crate::cell;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BuildingRow {
    #[serde(rename = "Serial No.", default, deserialize_with = "cell::required")]
    serial_no: String,
    #[serde(rename = "Budling Name", default, deserialize_with = "cell::required")]
    name: String,
    #[serde(rename = "Address", default, deserialize_with = "cell::optional")]
    address: Option<String>,
    #[serde(rename = "Total floor", default, deserialize_with = "cell::optional")]
    total_floors: Option<String>,
    #[serde(rename = "Each Floor Flat No", default, deserialize_with = "cell::optional")]
    flat_ranges: Option<String>,
    #[serde(rename = "Work Status", default, deserialize_with = "cell::optional")]
    work_status: Option<String>,
}

impl From<BuildingRow> for Building {
    fn from(row: BuildingRow) -> Self {
        Building {
            serial_no: row.serial_no,
            name: row.name,
            address: row.address,
            total_floors: row.total_floors,
            flat_ranges: row.flat_ranges,
            work_status: row.work_status,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FloorRow {
    #[serde(rename = "Serial No.", default, deserialize_with = "cell::required")]
    serial_no: String,
    #[serde(rename = "CB No", default, deserialize_with = "cell::required")]
    cb_no: String,
    #[serde(rename = "Building Name", default, deserialize_with = "cell::required")]
    building_name: String,
    #[serde(rename = "Address", default, deserialize_with = "cell::optional")]
    address: Option<String>,
    #[serde(rename = "Floor Name", default, deserialize_with = "cell::required")]
    name: String,
    #[serde(rename = "Each Floor Flat No", default, deserialize_with = "cell::optional")]
    flats: Option<String>,
}

impl From<FloorRow> for Floor {
    fn from(row: FloorRow) -> Self {
        Floor {
            serial_no: row.serial_no,
            cb_no: row.cb_no,
            building_name: row.building_name,
            address: row.address,
            name: row.name,
            flats: row.flats,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FlatRow {
    #[serde(rename = "Serial No", default, deserialize_with = "cell::required")]
    serial_no: String,
    #[serde(rename = "CB-No", default, deserialize_with = "cell::required")]
    cb_no: String,
    #[serde(rename = "BF No", default, deserialize_with = "cell::required")]
    bf_no: String,
    #[serde(rename = "Building Name", default, deserialize_with = "cell::required")]
    building_name: String,
    #[serde(rename = "Address", default, deserialize_with = "cell::optional")]
    address: Option<String>,
    #[serde(rename = "Floor Name", default, deserialize_with = "cell::required")]
    floor_name: String,
    #[serde(rename = "Each Floor Flat No", default, deserialize_with = "cell::optional")]
    flat_no: Option<String>,
}

impl From<FlatRow> for Flat {
    fn from(row: FlatRow) -> Self {
        Flat {
            serial_no: row.serial_no,
            cb_no: row.cb_no,
            bf_no: row.bf_no,
            building_name: row.building_name,
            address: row.address,
            floor_name: row.floor_name,
            flat_no: row.flat_no,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TaskRow {
    #[serde(rename = "Task ID", default, deserialize_with = "cell::optional")]
    task_id: Option<String>,
    #[serde(rename = "Task No", default, deserialize_with = "cell::optional")]
    task_no: Option<String>,
    #[serde(rename = "Action", default, deserialize_with = "cell::optional")]
    action: Option<String>,
    #[serde(rename = "Task category", default, deserialize_with = "cell::optional")]
    category: Option<String>,
    #[serde(rename = "Floor Name", default, deserialize_with = "cell::optional")]
    floor: Option<String>,
    #[serde(rename = "Actual date", default, deserialize_with = "cell::optional")]
    actual_date: Option<String>,
    #[serde(rename = "Payment Status", default, deserialize_with = "cell::optional")]
    payment: Option<String>,
    #[serde(rename = "Bill", default, deserialize_with = "cell::optional")]
    bill: Option<String>,
    #[serde(rename = "Vendor Name", default, deserialize_with = "cell::optional")]
    vendor_name: Option<String>,
}

impl From<TaskRow> for TaskRecord {
    fn from(row: TaskRow) -> Self {
        TaskRecord {
            task_id: row.task_id,
            task_no: row.task_no,
            action: row.action,
            category: row.category,
            floor: row.floor,
            actual_date: row.actual_date,
            payment: Marker::new(row.payment),
            bill: Marker::new(row.bill),
            vendor_name: row.vendor_name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VendorRow {
    #[serde(rename = "Timestamp", default, deserialize_with = "cell::required")]
    timestamp: String,
    #[serde(rename = "Serial No", default, deserialize_with = "cell::required")]
    serial_no: String,
    #[serde(rename = "Category No", default, deserialize_with = "cell::required")]
    category_no: String,
    #[serde(rename = "Category", default, deserialize_with = "cell::required")]
    category: String,
    #[serde(rename = "Vendor Name", default, deserialize_with = "cell::required")]
    vendor_name: String,
    #[serde(rename = "Contact Number", default, deserialize_with = "cell::required")]
    contact_number: String,
    #[serde(rename = "Email ID", default, deserialize_with = "cell::required")]
    email_id: String,
    #[serde(rename = "Address", default, deserialize_with = "cell::required")]
    address: String,
    #[serde(rename = "Status", default, deserialize_with = "cell::required")]
    status: String,
}

impl VendorRow {
    pub(crate) fn into_vendor(self, position: usize) -> Vendor {
        Vendor {
            position,
            timestamp: self.timestamp,
            serial_no: self.serial_no,
            category_no: self.category_no,
            category: self.category,
            vendor_name: self.vendor_name,
            contact_number: self.contact_number,
            email_id: self.email_id,
            address: self.address,
            status: self.status,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WorkCategoryRow {
    #[serde(rename = "Timestamp", default, deserialize_with = "cell::required")]
    timestamp: String,
    #[serde(rename = "Serial No", default, deserialize_with = "cell::required")]
    serial_no: String,
    #[serde(rename = "Category No", default, deserialize_with = "cell::required")]
    category_no: String,
    #[serde(rename = "Category Name", default, deserialize_with = "cell::required")]
    category_name: String,
    #[serde(rename = "Stage", default, deserialize_with = "cell::required")]
    stage: String,
    #[serde(rename = "Status", default, deserialize_with = "cell::required")]
    status: String,
}

impl WorkCategoryRow {
    pub(crate) fn into_work_category(self, position: usize) -> WorkCategory {
        WorkCategory {
            position,
            timestamp: self.timestamp,
            serial_no: self.serial_no,
            category_no: self.category_no,
            category_name: self.category_name,
            stage: self.stage,
            status: self.status,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_building_row_uses_store_headers() {
        let row: BuildingRow = serde_json::from_value(json!({
            "Serial No.": 3,
            "Budling Name": "Lake View",
            "Total floor": 4,
            "Each Floor Flat No": "101 to 104, 201 to 204",
            "Work Status": "Complete",
            "Unrelated": "ignored"
        }))
        .unwrap();
        let building = Building::from(row);
        assert_eq!(building.serial_no, "3");
        assert_eq!(building.name, "Lake View");
        assert_eq!(building.floor_count(), 4);
        assert_eq!(building.total_rooms(), 8);
        assert!(building.is_complete());
        assert_eq!(building.address, None);
    }

    #[test]
    fn test_task_row_markers() {
        let row: TaskRow = serde_json::from_value(json!({
            "Task No": 17,
            "Action": "Wiring",
            "Task category": "Electrical",
            "Actual date": "",
            "Payment Status": "Yes",
            "Bill": null
        }))
        .unwrap();
        let task = TaskRecord::from(row);
        assert_eq!(task.task_no.as_deref(), Some("17"));
        assert!(!task.is_completed());
        assert!(task.payment.is_yes());
        assert!(task.bill.is_pending());
    }

    #[test]
    fn test_flat_row_uses_hyphenated_cb_column() {
        let row: FlatRow = serde_json::from_value(json!({
            "Serial No": "1",
            "CB-No": "CB1",
            "BF No": "BF7",
            "Floor Name": "First"
        }))
        .unwrap();
        let flat = Flat::from(row);
        assert_eq!(flat.key().unwrap().bf_no(), "BF7");
    }

    #[test]
    fn test_vendor_row_position() {
        let row: VendorRow = serde_json::from_value(json!({
            "Serial No": "SN-001",
            "Category No": 1,
            "Category": "Plumbing",
            "Vendor Name": "Flowline",
            "Status": "Active"
        }))
        .unwrap();
        let vendor = row.into_vendor(4);
        assert_eq!(vendor.position, 4);
        assert_eq!(vendor.category_no, "1");
        assert_eq!(vendor.email_id, "");
    }
}
