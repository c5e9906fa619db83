//! The `{success, data, error}` envelope every script response uses.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ClientError;

/// Decoded response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Whether the store accepted the request.
    #[serde(default)]
    pub success: bool,
    /// Payload of a successful query.
    #[serde(default)]
    pub data: Option<Value>,
    /// Failure description, when the store gives one.
    #[serde(default)]
    pub error: Option<String>,
    /// Alternative failure description used by some actions.
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Parses a raw response body.
    ///
    /// An empty body is a decoding failure, not an implicit success.
    pub fn parse(body: &str) -> Result<Self, ClientError> {
        if body.trim().is_empty() {
            return Err(ClientError::Envelope("empty response from server".into()));
        }
        serde_json::from_str(body)
            .map_err(|e| ClientError::Envelope(format!("response is not JSON: {e}")))
    }

    fn rejection(&self) -> ClientError {
        let message = self
            .error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "request was not successful".to_string());
        ClientError::Rejected(message)
    }

    /// Accepts the envelope only when `success` is true.
    pub fn into_unit(self) -> Result<(), ClientError> {
        if self.success {
            Ok(())
        } else {
            Err(self.rejection())
        }
    }

    /// Decodes the `data` array of a successful query.
    ///
    /// Rows that do not fit `T` fail the whole response.
    pub fn into_rows<T: DeserializeOwned>(self) -> Result<Vec<T>, ClientError> {
        if !self.success {
            return Err(self.rejection());
        }
        match self.data {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(ClientError::from))
                .collect(),
            Some(other) => Err(ClientError::Envelope(format!(
                "expected a data array, got {}",
                kind(&other)
            ))),
            None => Err(ClientError::Envelope("missing data array".into())),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_rows() {
        let envelope = Envelope::parse(r#"{"success":true,"data":[1,2,3]}"#).unwrap();
        let rows: Vec<u32> = envelope.into_rows().unwrap();
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[test]
    fn test_rejection_prefers_error_then_message() {
        let err = Envelope::parse(r#"{"success":false,"error":"bad sheet","message":"m"}"#)
            .unwrap()
            .into_unit()
            .unwrap_err();
        assert_eq!(err.to_string(), "bad sheet");

        let err = Envelope::parse(r#"{"success":false,"message":"Row not found"}"#)
            .unwrap()
            .into_rows::<Value>()
            .unwrap_err();
        let ClientError::Rejected(message) = err else {
            unreachable!("Expected Rejected error");
        };
        assert_eq!(message, "Row not found");
    }

    #[test]
    fn test_empty_body_is_malformed() {
        let err = Envelope::parse("   ").unwrap_err();
        assert!(matches!(err, ClientError::Envelope(_)));
    }

    #[test]
    fn test_non_json_body() {
        let err = Envelope::parse("<html>Moved</html>").unwrap_err();
        assert!(err.to_string().contains("not JSON"));
    }

    #[test]
    fn test_success_without_array() {
        let err = Envelope::parse(r#"{"success":true,"data":{"a":1}}"#)
            .unwrap()
            .into_rows::<Value>()
            .unwrap_err();
        assert!(err.to_string().contains("an object"));
    }
}
