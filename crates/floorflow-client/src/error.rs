//! Client error types and their mapping onto the core taxonomy.

use floorflow_auth::AuthError;

/// Errors raised while talking to the script or export endpoints.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Status code returned.
        status: u16,
        /// URL that was requested.
        url: String,
    },

    /// The response body was not a usable `{success, data}` envelope.
    #[error("invalid response envelope: {0}")]
    Envelope(String),

    /// The store answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The export endpoint returned something other than a wrapped table.
    #[error("invalid sheet export: {0}")]
    Gviz(String),

    /// JSON decoding failed.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV decoding failed.
    #[error("CSV decode error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<ClientError> for floorflow_core::Error {
    fn from(err: ClientError) -> Self {
        use floorflow_core::Error;
        match err {
            ClientError::Http(source) => {
                Error::transport_with_source(format!("request failed: {source}"), source)
            }
            ClientError::Status { .. } => Error::transport(err.to_string()),
            ClientError::Rejected(message) => Error::rejected(message),
            ClientError::Envelope(_)
            | ClientError::Gviz(_)
            | ClientError::Json(_)
            | ClientError::Csv(_) => Error::malformed(err.to_string()),
        }
    }
}

impl From<ClientError> for AuthError {
    fn from(err: ClientError) -> Self {
        AuthError::Directory(err.to_string())
    }
}
