//! Vendor and work-category sheets: positional reads and the add, edit
//! and deactivate workflows.

use chrono::NaiveDate;
use floorflow_core::registry;
use floorflow_core::types::{
    CompositeKey, VendorBatch, VendorDraft, VendorPatch, WorkCategoryBatch, filter_rows,
};
use floorflow_core::{Error, SheetStore};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{EXPORT_PATH, TestHarness, done, form_field, rejected, sheet_row};

const VENDORS: &str = "Vendor Master";
const CATEGORIES: &str = "Category work master";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
}

async fn mount_vendor_sheet(harness: &TestHarness) {
    harness
        .mount_export(
            VENDORS,
            json!([
                sheet_row(&["01/01/2024", "SN-001", "1", "Plumbing", "Flowline", "98450", "f@x.in", "", "Active"]),
                {},
                sheet_row(&["01/01/2024", "SN-002", "1", "Electrical", "Volt Co", "98451", "v@x.in", "Main Rd", "Active"]),
                sheet_row(&["02/01/2024", "SN-002", "2", "Electrical", "Spark", "98452", "s@x.in", "", "Inactive"]),
            ]),
        )
        .await;
}

#[tokio::test]
async fn test_vendor_sheet_positions_count_skipped_rows() {
    let harness = TestHarness::start().await;
    mount_vendor_sheet(&harness).await;

    let vendors = harness.store().vendor_sheet().await.unwrap();
    assert_eq!(vendors.len(), 3);
    assert_eq!(vendors[0].position, 0);
    assert_eq!(vendors[1].position, 2);
    assert_eq!(vendors[1].vendor_name, "Volt Co");
    assert_eq!(vendors[2].status, "Inactive");

    let electrical = filter_rows(&vendors, Some("electrical"), Some("spark"));
    assert_eq!(electrical.len(), 1);
}

#[tokio::test]
async fn test_export_without_wrapper_is_malformed() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path(EXPORT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&harness.server)
        .await;

    let err = harness.store().work_category_sheet().await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_add_vendors_assigns_next_serial() {
    let harness = TestHarness::start().await;
    mount_vendor_sheet(&harness).await;
    harness.mount_post(done()).await;

    let batch = VendorBatch {
        category: " Painting ".to_string(),
        vendors: vec![
            VendorDraft {
                vendor_name: "Hue".to_string(),
                contact_number: "90000".to_string(),
                email_id: "h@x.in".to_string(),
                address: String::new(),
            },
            VendorDraft {
                vendor_name: "No Email".to_string(),
                contact_number: "90001".to_string(),
                ..VendorDraft::default()
            },
        ],
    };
    let added = registry::add_vendors(&harness.store(), batch, today())
        .await
        .unwrap();
    assert_eq!(added.serial_no, "SN-003");
    assert_eq!(added.count, 1);

    let bodies = harness.posted_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(form_field(&bodies[0], "sheetName").as_deref(), Some(VENDORS));
    assert_eq!(form_field(&bodies[0], "action").as_deref(), Some("insert"));
    let row: Vec<String> =
        serde_json::from_str(&form_field(&bodies[0], "rowData").unwrap()).unwrap();
    assert_eq!(
        row,
        vec!["09/06/2024", "SN-003", "1", "Painting", "Hue", "90000", "h@x.in", "", "Active"]
    );
}

#[tokio::test]
async fn test_edit_vendor_targets_sheet_row() {
    let harness = TestHarness::start().await;
    mount_vendor_sheet(&harness).await;
    harness.mount_post(done()).await;

    let key = CompositeKey::new("SN-002", "1", "Electrical");
    let patch = VendorPatch {
        contact_number: Some("11111".to_string()),
        address: Some(String::new()),
        ..VendorPatch::default()
    };
    let found = registry::edit_vendor(&harness.store(), &key, &patch)
        .await
        .unwrap();
    assert_eq!(found.position, 2);

    let bodies = harness.posted_bodies().await;
    assert_eq!(form_field(&bodies[0], "action").as_deref(), Some("update"));
    assert_eq!(form_field(&bodies[0], "rowIndex").as_deref(), Some("4"));
    let row: Vec<String> =
        serde_json::from_str(&form_field(&bodies[0], "rowData").unwrap()).unwrap();
    assert_eq!(row, vec!["", "", "", "", "", "11111", "", " ", ""]);
}

#[tokio::test]
async fn test_edit_missing_vendor_sends_nothing() {
    let harness = TestHarness::start().await;
    mount_vendor_sheet(&harness).await;
    harness.mount_post(done()).await;

    let key = CompositeKey::new("SN-009", "1", "Electrical");
    let err = registry::deactivate_vendor(&harness.store(), &key)
        .await
        .unwrap_err();
    let Error::RowNotFound { entity, .. } = err else {
        unreachable!("Expected RowNotFound error");
    };
    assert_eq!(entity, "vendor");
    assert!(harness.posted_bodies().await.is_empty());
}

#[tokio::test]
async fn test_deactivate_work_category() {
    let harness = TestHarness::start().await;
    harness
        .mount_export(
            CATEGORIES,
            json!([
                sheet_row(&["01/01/2024", "SN-001", "1", "Paint", "Primer", "Active"]),
                sheet_row(&["01/01/2024", "SN-001", "2", "Paint", "Coat", "Active"]),
            ]),
        )
        .await;
    harness.mount_post(done()).await;

    let key = CompositeKey::new("SN-001", "2", "Paint");
    registry::deactivate_work_category(&harness.store(), &key)
        .await
        .unwrap();

    let bodies = harness.posted_bodies().await;
    assert_eq!(form_field(&bodies[0], "sheetName").as_deref(), Some(CATEGORIES));
    assert_eq!(form_field(&bodies[0], "rowIndex").as_deref(), Some("3"));
    let row: Vec<String> =
        serde_json::from_str(&form_field(&bodies[0], "rowData").unwrap()).unwrap();
    assert_eq!(row, vec!["", "", "", "", "", "Inactive"]);
}

#[tokio::test]
async fn test_add_stages_to_empty_sheet() {
    let harness = TestHarness::start().await;
    harness.mount_export(CATEGORIES, json!([])).await;
    harness.mount_post(done()).await;

    let batch = WorkCategoryBatch {
        category_name: "Flooring".to_string(),
        stages: vec!["Levelling".to_string(), " ".to_string(), "Tiling".to_string()],
    };
    let added = registry::add_work_categories(&harness.store(), batch, today())
        .await
        .unwrap();
    assert_eq!(added.serial_no, "SN-001");
    assert_eq!(added.count, 2);

    let bodies = harness.posted_bodies().await;
    let second: Vec<String> =
        serde_json::from_str(&form_field(&bodies[1], "rowData").unwrap()).unwrap();
    assert_eq!(second[2], "2");
    assert_eq!(second[4], "Tiling");
}

#[tokio::test]
async fn test_rejected_insert_stops_batch() {
    let harness = TestHarness::start().await;
    harness.mount_export(CATEGORIES, json!([])).await;
    harness.mount_post(rejected("Sheet is protected")).await;

    let batch = WorkCategoryBatch {
        category_name: "Flooring".to_string(),
        stages: vec!["Levelling".to_string(), "Tiling".to_string()],
    };
    let err = registry::add_work_categories(&harness.store(), batch, today())
        .await
        .unwrap_err();
    assert!(err.is_business());
    assert_eq!(harness.posted_bodies().await.len(), 1);
}

#[tokio::test]
async fn test_store_reads_configured_sheet() {
    let harness = TestHarness::start().await;
    mount_vendor_sheet(&harness).await;
    let store = harness.store();
    assert_eq!(store.config().sheets.vendors, VENDORS);
    assert_eq!(store.vendor_sheet().await.unwrap().len(), 3);
}
