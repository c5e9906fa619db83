//! Core workflows driven through the HTTP store.

use floorflow_core::board::{TaskBoard, TaskRef};
use floorflow_core::chart::BuildingChart;
use floorflow_core::dashboard::Dashboard;
use floorflow_core::mutation::MutationState;
use floorflow_core::{CompletionStatus, SheetStore};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{
    SCRIPT_PATH, TestHarness, building_rows, done, lake_view, ok, rejected, task_rows,
};

async fn mount_progress(harness: &TestHarness, serial: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(SCRIPT_PATH))
        .and(query_param("action", "fetchProges"))
        .and(query_param("serialNo", serial))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&harness.server)
        .await;
}

#[tokio::test]
async fn test_dashboard_load() {
    let harness = TestHarness::start().await;
    harness
        .mount_query("fetchAllBuildings", ok(building_rows()))
        .await;
    harness
        .mount_query(
            "fetchAllVendors",
            ok(json!([
                { "Vendor Name": "Volt Co", "Status": "Active" },
                { "Vendor Name": "Spark", "Status": "Inactive" }
            ])),
        )
        .await;
    harness
        .mount_query(
            "fetchAllWorkCategory",
            ok(json!([
                { "Category Name": "Paint", "Stage": "Primer" },
                { "Category Name": "Paint", "Stage": "Coat" },
                { "Category Name": "Tiles", "Stage": "Lay" }
            ])),
        )
        .await;
    mount_progress(&harness, "1", ok(task_rows())).await;
    mount_progress(&harness, "2", rejected("No progress sheet")).await;

    let dashboard = Dashboard::load(&harness.store()).await.unwrap();
    let summary = dashboard.summary();
    assert_eq!(summary.total_buildings, 2);
    assert_eq!(summary.completed_buildings, 1);
    assert_eq!(summary.work_categories, 2);
    assert_eq!(summary.active_vendors, 1);

    let rows = dashboard.rows();
    assert_eq!(rows[0].status.percentage, 33);
    assert_eq!(rows[0].status.payment, CompletionStatus::Pending);
    assert_eq!(rows[0].status.bill, CompletionStatus::Pending);
    assert_eq!(rows[1].status.percentage, 0);
}

#[tokio::test]
async fn test_dashboard_leaves_rejected_list_empty() {
    let harness = TestHarness::start().await;
    harness
        .mount_query("fetchAllBuildings", ok(building_rows()))
        .await;
    harness
        .mount_query("fetchAllVendors", rejected("quota"))
        .await;
    harness
        .mount_query("fetchAllWorkCategory", ok(json!([])))
        .await;
    mount_progress(&harness, "1", ok(task_rows())).await;
    mount_progress(&harness, "2", ok(json!([]))).await;

    let dashboard = Dashboard::load(&harness.store()).await.unwrap();
    assert!(dashboard.vendors.is_empty());
    assert_eq!(dashboard.summary().total_buildings, 2);
}

#[tokio::test]
async fn test_dashboard_fails_when_a_list_is_unreachable() {
    let harness = TestHarness::start().await;
    harness
        .mount_query("fetchAllBuildings", ok(building_rows()))
        .await;
    Mock::given(method("GET"))
        .and(path(SCRIPT_PATH))
        .and(query_param("action", "fetchAllVendors"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.server)
        .await;
    harness
        .mount_query("fetchAllWorkCategory", ok(json!([])))
        .await;

    let err = Dashboard::load(&harness.store()).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_dashboard_keeps_buildings_when_progress_is_unreachable() {
    let harness = TestHarness::start().await;
    harness
        .mount_query("fetchAllBuildings", ok(building_rows()))
        .await;
    harness.mount_query("fetchAllVendors", ok(json!([]))).await;
    harness
        .mount_query("fetchAllWorkCategory", ok(json!([])))
        .await;
    Mock::given(method("GET"))
        .and(path(SCRIPT_PATH))
        .and(query_param("action", "fetchProges"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&harness.server)
        .await;

    let dashboard = Dashboard::load(&harness.store()).await.unwrap();
    let rows = dashboard.rows();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.status.percentage == 0));
}

#[tokio::test]
async fn test_mark_complete_confirmed() {
    let harness = TestHarness::start().await;
    harness.mount_post(done()).await;
    harness.mount_query("fetchFlatTasks", ok(task_rows())).await;
    let store = harness.store();
    let floor = floorflow_core::FloorKey::new("CB1", "First").unwrap();
    let flat = floorflow_core::FlatKey::new("CB1", "BF2").unwrap();
    let tasks = store.flat_tasks(&lake_view(), &floor, &flat).await.unwrap();
    let mut board = TaskBoard::from_records("Lake View", &tasks);

    let pipes = TaskRef {
        group_id: 2,
        index: 0,
    };
    let state = board.mark_complete(&store, pipes).await.unwrap();
    assert_eq!(state, MutationState::Confirmed);
    assert!(board.task(pipes).unwrap().completed);

    let queries = harness.posted_queries().await;
    assert!(queries[0].contains("taskNo=12"));
    assert!(queries[0].contains("buildingName=Lake+View"));
}

#[tokio::test]
async fn test_mark_complete_rolls_back_on_rejection() {
    let harness = TestHarness::start().await;
    harness.mount_query("fetchFlatTasks", ok(task_rows())).await;
    harness.mount_post(rejected("Task not found")).await;

    let store = harness.store();
    let floor = floorflow_core::FloorKey::new("CB1", "First").unwrap();
    let flat = floorflow_core::FlatKey::new("CB1", "BF2").unwrap();
    let tasks = store.flat_tasks(&lake_view(), &floor, &flat).await.unwrap();
    let mut board = TaskBoard::from_records("Lake View", &tasks);

    let wiring = TaskRef {
        group_id: 1,
        index: 1,
    };
    let state = board.mark_complete(&store, wiring).await.unwrap();
    assert!(matches!(state, MutationState::RolledBack(_)));
    assert!(!board.task(wiring).unwrap().completed);
}

#[tokio::test]
async fn test_chart_survives_one_failed_fetch() {
    let harness = TestHarness::start().await;
    mount_progress(&harness, "1", ok(task_rows())).await;
    harness
        .mount_query("fetchSpecificBuidlingData", rejected("timeout"))
        .await;

    let store = harness.store();
    let building = floorflow_core::Building {
        serial_no: "1".to_string(),
        name: "Lake View".to_string(),
        total_floors: Some("2".to_string()),
        flat_ranges: Some("101 to 104, 201 to 203".to_string()),
        ..floorflow_core::Building::default()
    };
    let chart = BuildingChart::load(&store, building).await.unwrap();
    assert_eq!(chart.stats.total, 3);
    assert_eq!(chart.stats.completed, 1);
    assert_eq!(chart.payments.settled, 2);
    assert_eq!(chart.payments.pending, 1);
    assert!(chart.categories.is_empty());
    assert_eq!(chart.total_rooms, 7);
}
