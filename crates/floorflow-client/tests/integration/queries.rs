//! Named-column queries through the script endpoint.

use floorflow_core::{Error, FloorKey, SheetStore};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{SCRIPT_PATH, TestHarness, building_rows, lake_view, ok, rejected, task_rows};

#[tokio::test]
async fn test_buildings_are_translated() {
    let harness = TestHarness::start().await;
    harness
        .mount_query("fetchAllBuildings", ok(building_rows()))
        .await;

    let buildings = harness.store().buildings().await.unwrap();
    assert_eq!(buildings.len(), 2);
    assert_eq!(buildings[0].serial_no, "1");
    assert_eq!(buildings[0].name, "Lake View");
    assert_eq!(buildings[0].total_rooms(), 7);
    assert!(buildings[1].is_complete());
    assert_eq!(buildings[1].floor_count(), 1);
}

#[tokio::test]
async fn test_floors_send_building_key() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path(SCRIPT_PATH))
        .and(query_param("action", "fetchBuildingFloors"))
        .and(query_param("serialNo", "1"))
        .and(query_param("buildingName", "Lake View"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([
            {
                "Serial No.": 1, "CB No": "CB1", "Building Name": "Lake View",
                "Floor Name": "First", "Each Floor Flat No": "101, 102, ,103"
            }
        ]))))
        .expect(1)
        .mount(&harness.server)
        .await;

    let floors = harness.store().floors(&lake_view()).await.unwrap();
    assert_eq!(floors.len(), 1);
    assert_eq!(floors[0].cb_no, "CB1");
    assert_eq!(floors[0].flat_count(), 3);
}

#[tokio::test]
async fn test_flat_tasks_send_full_scope() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path(SCRIPT_PATH))
        .and(query_param("action", "fetchFlatTasks"))
        .and(query_param("serialNo", "1"))
        .and(query_param("cbNo", "CB1"))
        .and(query_param("bfNo", "BF2"))
        .and(query_param("floorName", "First"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(task_rows())))
        .expect(1)
        .mount(&harness.server)
        .await;

    let floor = FloorKey::new("CB1", "First").unwrap();
    let flat = floorflow_core::FlatKey::new("CB1", "BF2").unwrap();
    let tasks = harness
        .store()
        .flat_tasks(&lake_view(), &floor, &flat)
        .await
        .unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].task_no.as_deref(), Some("11"));
    assert!(tasks[0].is_completed());
    assert!(!tasks[1].is_completed());
    assert!(!tasks[2].is_completed());
    assert!(tasks[1].bill.is_pending());
}

#[tokio::test]
async fn test_rejected_query() {
    let harness = TestHarness::start().await;
    harness
        .mount_query("fetchProges", rejected("Building not found"))
        .await;

    let err = harness
        .store()
        .building_progress(&lake_view())
        .await
        .unwrap_err();
    let Error::Rejected { message } = err else {
        unreachable!("Expected Rejected error");
    };
    assert_eq!(message, "Building not found");
}

#[tokio::test]
async fn test_server_error_is_transport() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path(SCRIPT_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.server)
        .await;

    let err = harness.store().buildings().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_html_body_is_malformed() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path(SCRIPT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Sign in</html>"))
        .mount(&harness.server)
        .await;

    let err = harness.store().vendors().await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_store() {
    let harness = TestHarness::start().await;
    let config = harness.config();
    drop(harness);

    let store = floorflow_client::HttpSheetStore::new(config);
    let err = store.buildings().await.unwrap_err();
    assert!(err.is_transport());
    assert!(!err.is_business());
}

#[tokio::test]
async fn test_named_reference_queries() {
    let harness = TestHarness::start().await;
    harness
        .mount_query(
            "fetchAllVendors",
            ok(json!([
                { "Serial No": "SN-001", "Category No": 1, "Category": "Plumbing",
                  "Vendor Name": "Flowline", "Status": "Active" },
                { "Serial No": "SN-001", "Category No": 2, "Category": "Plumbing",
                  "Vendor Name": "Aqua", "Status": "Inactive" }
            ])),
        )
        .await;
    harness
        .mount_query(
            "fetchAllWorkCategory",
            ok(json!([
                { "Serial No": "SN-001", "Category No": 1, "Category Name": "Paint",
                  "Stage": "Primer", "Status": "Active" }
            ])),
        )
        .await;

    let store = harness.store();
    let vendors = store.vendors().await.unwrap();
    assert_eq!(vendors[1].position, 1);
    assert_eq!(vendors[1].vendor_name, "Aqua");
    let categories = store.work_categories().await.unwrap();
    assert_eq!(categories[0].category_name, "Paint");
}
