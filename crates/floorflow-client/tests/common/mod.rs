//! Common test utilities and harness for the client integration tests.

#![allow(dead_code)]

use floorflow_client::{ClientConfig, CsvUserDirectory, HttpSheetStore};
use floorflow_core::BuildingKey;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the script endpoint is served under.
pub const SCRIPT_PATH: &str = "/exec";

/// Spreadsheet id used by every test.
pub const SHEET_ID: &str = "sheet-1";

/// Path of the export endpoint for [`SHEET_ID`].
pub const EXPORT_PATH: &str = "/spreadsheets/d/sheet-1/gviz/tq";

/// Test harness wrapping a mock server that plays both endpoints.
pub struct TestHarness {
    /// The mock server.
    pub server: MockServer,
}

impl TestHarness {
    /// Starts a fresh mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Client configuration pointing at the mock server.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(format!("{}{SCRIPT_PATH}", self.server.uri()), SHEET_ID)
            .with_docs_base_url(self.server.uri())
    }

    /// Store under test.
    pub fn store(&self) -> HttpSheetStore {
        HttpSheetStore::new(self.config())
    }

    /// Directory under test.
    pub fn directory(&self) -> CsvUserDirectory {
        CsvUserDirectory::new(self.config())
    }

    /// Answers `GET ?action={action}` with `body`.
    pub async fn mount_query(&self, action: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(SCRIPT_PATH))
            .and(query_param("action", action))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answers the JSON export of `sheet` with the given rows.
    pub async fn mount_export(&self, sheet: &str, rows: Value) {
        Mock::given(method("GET"))
            .and(path(EXPORT_PATH))
            .and(query_param("tqx", "out:json"))
            .and(query_param("sheet", sheet))
            .respond_with(ResponseTemplate::new(200).set_body_string(gviz(rows)))
            .mount(&self.server)
            .await;
    }

    /// Answers every `POST` to the script endpoint with `body`.
    pub async fn mount_post(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(SCRIPT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Bodies of every `POST` received so far, decoded as text.
    pub async fn posted_bodies(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .map(|r| String::from_utf8_lossy(&r.body).into_owned())
            .collect()
    }

    /// Query strings of every `POST` received so far.
    pub async fn posted_queries(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .map(|r| r.url.query().unwrap_or_default().to_string())
            .collect()
    }
}

/// A successful envelope carrying `data`.
pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// A successful envelope with no payload.
pub fn done() -> Value {
    json!({ "success": true })
}

/// A rejected envelope.
pub fn rejected(message: &str) -> Value {
    json!({ "success": false, "error": message })
}

/// Wraps table rows the way the export endpoint does.
pub fn gviz(rows: Value) -> String {
    let table = json!({
        "version": "0.6",
        "status": "ok",
        "table": { "cols": [], "rows": rows }
    });
    format!("/*O_o*/\ngoogle.visualization.Query.setResponse({table});")
}

/// A positional export row from plain cell values.
pub fn sheet_row(cells: &[&str]) -> Value {
    let cells: Vec<Value> = cells
        .iter()
        .map(|c| if c.is_empty() { Value::Null } else { json!({ "v": c }) })
        .collect();
    json!({ "c": cells })
}

/// Key of the building used across tests.
pub fn lake_view() -> BuildingKey {
    BuildingKey::new("1", "Lake View").unwrap()
}

/// Store-native building rows.
pub fn building_rows() -> Value {
    json!([
        {
            "Serial No.": 1,
            "Budling Name": "Lake View",
            "Address": "12 Shore Rd",
            "Total floor": 2,
            "Each Floor Flat No": "101 to 104, 201 to 203",
            "Work Status": "In Progress"
        },
        {
            "Serial No.": 2,
            "Budling Name": "Hill Crest",
            "Total floor": "1",
            "Each Floor Flat No": "101 to 102",
            "Work Status": "Complete"
        }
    ])
}

/// Store-native task rows of one flat.
pub fn task_rows() -> Value {
    json!([
        {
            "Task ID": "T1", "Task No": 11, "Action": "Conduits",
            "Task category": "Electrical", "Floor Name": "First",
            "Actual date": "2024-03-01", "Payment Status": "Yes", "Bill": "Yes",
            "Vendor Name": "Volt Co"
        },
        {
            "Task ID": "T2", "Task No": 12, "Action": "Pipes",
            "Task category": "Plumbing", "Floor Name": "First",
            "Actual date": "", "Payment Status": "No", "Bill": ""
        },
        {
            "Task ID": "T3", "Task No": 13, "Action": "Wiring",
            "Task category": "Electrical", "Floor Name": "Second",
            "Actual date": null, "Payment Status": "Yes", "Bill": "Yes",
            "Vendor Name": "Volt Co"
        }
    ])
}

/// Decodes a form body into its fields.
pub fn form_fields(body: &str) -> Vec<(String, String)> {
    reqwest::Url::parse(&format!("http://form.local/?{body}"))
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Value of `name` in a form body.
pub fn form_field(body: &str, name: &str) -> Option<String> {
    form_fields(body)
        .into_iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v)
}
