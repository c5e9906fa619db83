//! User directory read from the login sheet's CSV export.

use async_trait::async_trait;

use floorflow_auth::{AuthError, DirectoryEntry, UserDirectory};

use crate::{ClientConfig, ClientError};

/// [`UserDirectory`] backed by the CSV export of the login sheet.
#[derive(Debug, Clone)]
pub struct CsvUserDirectory {
    client: reqwest::Client,
    config: ClientConfig,
}

impl CsvUserDirectory {
    /// Creates a directory with a fresh HTTP client.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a directory sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    async fn fetch(&self) -> Result<String, ClientError> {
        let response = self
            .client
            .get(self.config.export_url())
            .query(&[("tqx", "out:csv"), ("sheet", self.config.sheets.login.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Parses the login sheet CSV. The header row is skipped, as are rows with
/// fewer than three columns.
pub fn parse_directory(csv_text: &str) -> Result<Vec<DirectoryEntry>, ClientError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let columns: Vec<&str> = record.iter().collect();
        if let Some(entry) = DirectoryEntry::from_columns(&columns) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

#[async_trait]
impl UserDirectory for CsvUserDirectory {
    async fn entries(&self) -> Result<Vec<DirectoryEntry>, AuthError> {
        let body = self
            .fetch()
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to fetch user data"))?;
        let entries = parse_directory(&body)?;
        tracing::debug!(entries = entries.len(), "user directory loaded");
        Ok(entries)
    }
}
