//! Parsing of the spreadsheet JSON export.
//!
//! The export answers with a script wrapper around a table:
//! `google.visualization.Query.setResponse({...});`. Rows carry their cells
//! under `c`, each cell its value under `v` and a formatted rendering under
//! `f`. Rows without `c` are skipped but still count towards the positions
//! of the rows after them.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::ClientError;
use crate::cell::cell_text;

const WRAPPER: &str = r"(?s)google\.visualization\.Query\.setResponse\((.*)\);";

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<ResponseError>,
    #[serde(default)]
    table: Option<Table>,
}

#[derive(Debug, Deserialize)]
struct ResponseError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detailed_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Table {
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    c: Option<Vec<Option<Cell>>>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    #[serde(default)]
    v: Option<Value>,
    #[serde(default)]
    f: Option<String>,
}

impl Cell {
    /// Date cells come back as `Date(y,m,d)`; their formatted text is what
    /// the sheet shows.
    fn text(&self) -> Option<String> {
        match &self.v {
            Some(Value::String(s)) if s.starts_with("Date(") => {
                self.f.clone().or_else(|| Some(s.clone()))
            }
            Some(v) => cell_text(v),
            None => None,
        }
    }
}

/// One data row of an exported sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// Zero-based position among the data rows, header excluded.
    pub position: usize,
    /// Cell text by column, `None` for empty cells.
    pub cells: Vec<Option<String>>,
}

impl SheetRow {
    /// Text of column `index`, empty when missing.
    pub fn text(&self, index: usize) -> String {
        self.cells
            .get(index)
            .cloned()
            .flatten()
            .unwrap_or_default()
    }
}

/// Unwraps and decodes an export body.
///
/// A body without the script wrapper, or an export reporting an error, is
/// a [`ClientError::Gviz`]. A table with no rows is an empty list.
pub fn parse_export(body: &str) -> Result<Vec<SheetRow>, ClientError> {
    let wrapper = Regex::new(WRAPPER).map_err(|e| ClientError::Gviz(e.to_string()))?;
    let json = wrapper
        .captures(body)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ClientError::Gviz("response is not a sheet export".into()))?
        .as_str();

    let response: Response = serde_json::from_str(json)?;
    if response.status.as_deref() == Some("error") {
        let message = response
            .errors
            .iter()
            .find_map(|e| e.detailed_message.clone().or_else(|| e.message.clone()))
            .unwrap_or_else(|| "export reported an error".to_string());
        return Err(ClientError::Gviz(message));
    }

    let rows = response.table.map(|t| t.rows).unwrap_or_default();
    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(position, row)| {
            let cells = row.c?;
            Some(SheetRow {
                position,
                cells: cells
                    .iter()
                    .map(|cell| cell.as_ref().and_then(Cell::text))
                    .collect(),
            })
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn wrap(json: &str) -> String {
        format!("/*O_o*/\ngoogle.visualization.Query.setResponse({json});")
    }

    #[test]
    fn test_rows_keep_their_position() {
        let body = wrap(
            r#"{"status":"ok","table":{"rows":[
                {"c":[{"v":"a"},null,{"v":3.0}]},
                {},
                {"c":[{"v":"b"},{"v":"x"}]}
            ]}}"#,
        );
        let rows = parse_export(&body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 0);
        assert_eq!(rows[0].text(1), "");
        assert_eq!(rows[0].text(2), "3");
        assert_eq!(rows[1].position, 2);
        assert_eq!(rows[1].text(1), "x");
        assert_eq!(rows[1].text(8), "");
    }

    #[test]
    fn test_dates_use_formatted_text() {
        let body = wrap(
            r#"{"table":{"rows":[{"c":[{"v":"Date(2024,0,5)","f":"05/01/2024"}]}]}}"#,
        );
        let rows = parse_export(&body).unwrap();
        assert_eq!(rows[0].text(0), "05/01/2024");
    }

    #[test]
    fn test_missing_table_is_empty() {
        assert!(parse_export(&wrap(r#"{"status":"ok"}"#)).unwrap().is_empty());
    }

    #[test]
    fn test_unwrapped_body_is_rejected() {
        let err = parse_export("<html>sign in</html>").unwrap_err();
        assert!(matches!(err, ClientError::Gviz(_)));
    }

    #[test]
    fn test_export_error_message() {
        let body = wrap(
            r#"{"status":"error","errors":[{"reason":"invalid_query","message":"Invalid query","detailed_message":"Unable to parse query"}]}"#,
        );
        let err = parse_export(&body).unwrap_err();
        assert_eq!(err.to_string(), "invalid sheet export: Unable to parse query");
    }
}
