//! Error types for the Floorflow core library.

/// Errors that can occur while talking to the project store or applying
/// dashboard rules.
///
/// Variants follow the failure taxonomy of the remote sheet service:
/// transport failures, unparseable payloads, server-side rejections and
/// composite-key lookups that found no row.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Network or HTTP transport failure.
    #[error("Transport error: {message}")]
    Transport {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The store answered with a payload that could not be decoded.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// What was wrong with the payload
        message: String,
    },

    /// The store reported `success: false`.
    #[error("Request rejected: {message}")]
    Rejected {
        /// Message reported by the store
        message: String,
    },

    /// No row matched the composite key of an update target.
    #[error("Could not find the {entity} row to update ({key})")]
    RowNotFound {
        /// Entity being updated ("vendor", "category", ...)
        entity: String,
        /// Rendered composite key that was searched for
        key: String,
    },

    /// Input validation error
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// The logged-in user may not open the requested section.
    #[error("Access denied: you don't have permission to access {section}")]
    AccessDenied {
        /// Section that was requested
        section: String,
    },

    /// A mutation was asked to move between states it cannot connect.
    #[error("Invalid mutation transition: {from} -> {to}")]
    InvalidTransition {
        /// State the mutation was in
        from: String,
        /// State that was requested
        to: String,
    },

    /// Session persistence error
    #[error("Session error: {message}")]
    Session {
        /// What went wrong
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for Floorflow operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error came from the transport layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Io(_))
    }

    /// Returns whether this error is a business-rule failure rather than a
    /// transport or decoding problem.
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            Error::Rejected { .. }
                | Error::RowNotFound { .. }
                | Error::Validation { .. }
                | Error::AccessDenied { .. }
        )
    }

    /// Creates a new transport error with a message.
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Error::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with a message and source error.
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new malformed-response error.
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Error::MalformedResponse {
            message: message.into(),
        }
    }

    /// Creates a new rejection error.
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Error::Rejected {
            message: message.into(),
        }
    }

    /// Creates a new row-not-found error.
    pub fn row_not_found<E, K>(entity: E, key: K) -> Self
    where
        E: Into<String>,
        K: Into<String>,
    {
        Error::RowNotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new access-denied error.
    pub fn access_denied<S: Into<String>>(section: S) -> Self {
        Error::AccessDenied {
            section: section.into(),
        }
    }

    /// Creates a new session error.
    pub fn session<S: Into<String>>(message: S) -> Self {
        Error::Session {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
