//! The CSV user directory behind the login flow.

use floorflow_auth::{AuthError, LoginService, SessionStore, UserDirectory};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{EXPORT_PATH, TestHarness};

const LOGIN_CSV: &str = "\"User Name\",\"User ID\",\"Password\",\"Role\",\"Page Show\"\n\
\"Asha\",\"a1\",\"pw1\",\"admin\",\"\"\n\
\"Ravi\",\"r1\",\"pw2\",\"\",\"Vendors or Work Category\"\n\
\"Broken\"\n";

async fn mount_login_sheet(harness: &TestHarness) {
    Mock::given(method("GET"))
        .and(path(EXPORT_PATH))
        .and(query_param("tqx", "out:csv"))
        .and(query_param("sheet", "Login Master"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_CSV))
        .mount(&harness.server)
        .await;
}

#[tokio::test]
async fn test_directory_entries() {
    let harness = TestHarness::start().await;
    mount_login_sheet(&harness).await;

    let entries = harness.directory().entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].user_id, "r1");
    assert_eq!(entries[1].page_show, "Vendors or Work Category");
}

#[tokio::test]
async fn test_login_and_restore() {
    let harness = TestHarness::start().await;
    mount_login_sheet(&harness).await;
    let tmp = TempDir::new().unwrap();
    let service = LoginService::new(harness.directory(), SessionStore::new(tmp.path()));

    let user = service.login("Ravi", "pw2").await.unwrap();
    assert_eq!(user.user_id, "r1");
    assert_eq!(user.role, "user");
    assert_eq!(service.restore(), Some(user));

    let err = service.login("r1", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_blank_login_makes_no_request() {
    let harness = TestHarness::start().await;
    mount_login_sheet(&harness).await;
    let tmp = TempDir::new().unwrap();
    let service = LoginService::new(harness.directory(), SessionStore::new(tmp.path()));

    let err = service.login("a1", "").await.unwrap_err();
    assert!(matches!(err, AuthError::MissingCredentials));
    let requests = harness.server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_directory_unavailable() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path(EXPORT_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&harness.server)
        .await;
    let tmp = TempDir::new().unwrap();
    let service = LoginService::new(harness.directory(), SessionStore::new(tmp.path()));

    let err = service.login("a1", "pw1").await.unwrap_err();
    assert!(matches!(err, AuthError::Directory(_)));
    assert!(service.restore().is_none());
}
