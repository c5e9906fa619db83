//! Mutations: building inserts, mark-complete and category metadata.

use floorflow_core::layout::{NewBuilding, NewFloor};
use floorflow_core::{CategoryMeta, Error, SheetStore};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{SCRIPT_PATH, TestHarness, done, rejected};

fn new_building() -> NewBuilding {
    NewBuilding {
        name: "Lake View".to_string(),
        address: "12 Shore Rd".to_string(),
        total_floors: 3,
        floors: vec![
            NewFloor {
                name: "Ground".to_string(),
                flats: 4,
            },
            NewFloor {
                name: "First".to_string(),
                flats: 2,
            },
        ],
    }
}

#[tokio::test]
async fn test_insert_building_posts_form() {
    let harness = TestHarness::start().await;
    harness.mount_post(done()).await;

    harness
        .store()
        .insert_building(&new_building())
        .await
        .unwrap();

    let bodies = harness.posted_bodies().await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert!(body.contains("action=insert"));
    assert!(body.contains("buildingName=Lake+View"));
    assert!(body.contains("totalFloors=3"));
    assert!(body.contains("floorNames=Ground%2C+First"));
    assert!(body.contains("floorFlats=101+to+104%2C+201+to+202"));
}

#[tokio::test]
async fn test_invalid_building_is_not_sent() {
    let harness = TestHarness::start().await;
    harness.mount_post(done()).await;

    let mut building = new_building();
    building.total_floors = 1;
    let err = harness
        .store()
        .insert_building(&building)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(harness.posted_bodies().await.is_empty());
}

#[tokio::test]
async fn test_mark_complete_uses_query_params() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path(SCRIPT_PATH))
        .and(query_param("action", "updateActualDate"))
        .and(query_param("taskNo", "12"))
        .and(query_param("buildingName", "Lake View"))
        .respond_with(ResponseTemplate::new(200).set_body_json(done()))
        .expect(1)
        .mount(&harness.server)
        .await;

    harness
        .store()
        .mark_task_complete("12", "Lake View")
        .await
        .unwrap();
    assert_eq!(harness.posted_bodies().await, vec![String::new()]);
}

#[tokio::test]
async fn test_mark_complete_rejected() {
    let harness = TestHarness::start().await;
    harness.mount_post(rejected("Task not found")).await;

    let err = harness
        .store()
        .mark_task_complete("99", "Lake View")
        .await
        .unwrap_err();
    assert!(err.is_business());
}

#[tokio::test]
async fn test_category_meta() {
    let harness = TestHarness::start().await;
    harness.mount_post(done()).await;
    let store = harness.store();

    let mut meta = CategoryMeta {
        building_name: "Lake View".to_string(),
        category: "Electrical".to_string(),
        vendor_name: "Volt Co".to_string(),
        payment: "Yes".to_string(),
        billing: "No".to_string(),
    };
    store.update_category_meta(&meta).await.unwrap();

    let queries = harness.posted_queries().await;
    assert_eq!(queries.len(), 1);
    assert!(queries[0].contains("action=updateCategoryMeta"));
    assert!(queries[0].contains("vendorName=Volt+Co"));
    assert!(queries[0].contains("billing=No"));

    meta.billing = String::new();
    assert!(store.update_category_meta(&meta).await.is_err());
    assert_eq!(harness.posted_queries().await.len(), 1);
}

#[tokio::test]
async fn test_empty_mutation_response_is_malformed() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path(SCRIPT_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&harness.server)
        .await;

    let err = harness
        .store()
        .mark_task_complete("12", "Lake View")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}
