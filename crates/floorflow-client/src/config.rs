//! Endpoint configuration for the HTTP store.

use serde::{Deserialize, Serialize};

/// Default host of the spreadsheet export endpoint.
pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.google.com";

/// Names of the sheets read through the export endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    /// Sheet holding the user directory.
    pub login: String,
    /// Vendor reference sheet.
    pub vendors: String,
    /// Work-category reference sheet.
    pub work_categories: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            login: "Login Master".to_string(),
            vendors: "Vendor Master".to_string(),
            work_categories: "Category work master".to_string(),
        }
    }
}

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Script endpoint handling `action` queries and mutations.
    pub script_url: String,
    /// Spreadsheet id used by the export endpoint.
    pub sheet_id: String,
    /// Host of the export endpoint.
    pub docs_base_url: String,
    /// Sheet names.
    pub sheets: SheetNames,
}

impl ClientConfig {
    /// Creates a configuration with default export host and sheet names.
    pub fn new(script_url: impl Into<String>, sheet_id: impl Into<String>) -> Self {
        Self {
            script_url: script_url.into(),
            sheet_id: sheet_id.into(),
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
            sheets: SheetNames::default(),
        }
    }

    /// Overrides the export host.
    pub fn with_docs_base_url(mut self, url: impl Into<String>) -> Self {
        self.docs_base_url = url.into();
        self
    }

    /// Overrides the sheet names.
    pub fn with_sheets(mut self, sheets: SheetNames) -> Self {
        self.sheets = sheets;
        self
    }

    /// Export endpoint for this spreadsheet, without query parameters.
    pub fn export_url(&self) -> String {
        format!(
            "{}/spreadsheets/d/{}/gviz/tq",
            self.docs_base_url.trim_end_matches('/'),
            self.sheet_id
        )
    }

    /// Checks that both endpoints are set.
    pub fn validate(&self) -> floorflow_core::Result<()> {
        if self.script_url.trim().is_empty() {
            return Err(floorflow_core::Error::config("script_url is not set"));
        }
        if self.sheet_id.trim().is_empty() {
            return Err(floorflow_core::Error::config("sheet_id is not set"));
        }
        Ok(())
    }
}
