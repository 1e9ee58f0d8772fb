//! Table building and CSV encoding.
//!
//! [`build_csv`] parses every input, merges the rows in input order, projects
//! each row onto the effective column list and encodes the result. The header
//! line is emitted verbatim; only data cells are escaped.

use std::fmt;

use itertools::Itertools;
use log::debug;
use serde_json::Value;

use crate::{
    data::CellValue,
    discover::discover_columns,
    document::{flatten_rows, parse_document},
    error::{ConversionError, Result},
};

/// MIME type to attach when the CSV text is offered as a download.
pub const CSV_MIME_TYPE: &str = "text/csv; charset=utf-8";
/// File name suggested for exported CSV text.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "data.csv";

const FIELD_SEPARATOR: &str = ",";
const LINE_SEPARATOR: &str = "\n";

/// Encoded CSV text together with the columns it was projected onto.
///
/// The projected cells are kept in their unescaped display form alongside the
/// text, one inner vector per data row, so readers never re-parse the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    columns: Vec<String>,
    cells: Vec<Vec<String>>,
    text: String,
}

impl CsvDocument {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data lines, excluding the header.
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Unescaped cell text per data row, in column order.
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

impl fmt::Display for CsvDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CsvDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Builds a CSV table from raw JSON texts.
///
/// `columns` is used verbatim when non-empty; otherwise every discovered column
/// is emitted. A single unparseable input aborts the whole conversion.
pub fn build_csv<S: AsRef<str>>(inputs: &[S], columns: &[String]) -> Result<CsvDocument> {
    let rows = merge_rows(inputs)?;
    if rows.is_empty() {
        return Err(ConversionError::EmptyResult);
    }

    let columns = if columns.is_empty() {
        let discovered = discover_columns(inputs);
        debug!("No columns selected; using {} discovered", discovered.len());
        discovered
    } else {
        columns.to_vec()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.join(FIELD_SEPARATOR));
    lines.extend(rows.iter().map(|row| encode_row(row, &columns)));
    debug!(
        "Encoded {} row(s) across {} column(s)",
        rows.len(),
        columns.len()
    );

    let cells = rows.iter().map(|row| project_row(row, &columns)).collect();
    Ok(CsvDocument {
        text: lines.join(LINE_SEPARATOR),
        columns,
        cells,
    })
}

fn merge_rows<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Value>> {
    let mut rows = Vec::new();
    for (idx, input) in inputs.iter().enumerate() {
        let value = parse_document(input.as_ref())
            .map_err(|err| ConversionError::invalid_json(idx, &err))?;
        rows.extend(flatten_rows(value));
    }
    Ok(rows)
}

fn encode_row(row: &Value, columns: &[String]) -> String {
    columns
        .iter()
        .map(|column| CellValue::lookup(row, column).encode())
        .join(FIELD_SEPARATOR)
}

fn project_row(row: &Value, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|column| CellValue::lookup(row, column).as_display().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(doc: &CsvDocument) -> Vec<&str> {
        doc.as_str().split('\n').collect()
    }

    #[test]
    fn quoted_comma_in_string_cell() {
        let doc = build_csv(&[r#"{"a":1,"b":"x,y"}"#], &[]).unwrap();
        assert_eq!(lines(&doc), vec!["a,b", "1,\"x,y\""]);
        assert_eq!(doc.row_count(), 1);
    }

    #[test]
    fn array_elements_become_rows_with_gaps() {
        let doc = build_csv(&[r#"[{"a":1},{"b":2}]"#], &[]).unwrap();
        assert_eq!(doc.columns(), ["a", "b"]);
        assert_eq!(lines(&doc), vec!["a,b", "1,", ",2"]);
    }

    #[test]
    fn explicit_columns_are_used_verbatim() {
        let columns = vec!["b".to_string(), "missing".to_string(), "a".to_string()];
        let doc = build_csv(&[r#"{"a":1,"b":null}"#], &columns).unwrap();
        assert_eq!(lines(&doc), vec!["b,missing,a", ",,1"]);
    }

    #[test]
    fn header_names_are_not_escaped() {
        let columns = vec!["x,y".to_string()];
        let doc = build_csv(&[r#"{"x,y":"v"}"#], &columns).unwrap();
        assert_eq!(lines(&doc), vec!["x,y", "v"]);
    }

    #[test]
    fn one_bad_input_aborts_the_build() {
        let err = build_csv(&["{}", "not json"], &[]).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::InvalidJson {
                input_index: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn zero_rows_is_an_error() {
        assert_eq!(
            build_csv(&["[]", "[]"], &["a".to_string()]).unwrap_err(),
            ConversionError::EmptyResult
        );
        let none: [&str; 0] = [];
        assert_eq!(
            build_csv(&none, &[]).unwrap_err(),
            ConversionError::EmptyResult
        );
    }

    #[test]
    fn non_object_rows_render_as_empty_cells() {
        let doc = build_csv(&[r#"[{"a":1,"b":2}, 7, "s", null]"#], &[]).unwrap();
        assert_eq!(lines(&doc), vec!["a,b", "1,2", ",", ",", ","]);
    }

    #[test]
    fn cells_hold_unescaped_display_text() {
        let doc = build_csv(&[r#"[{"a":"x,y"},{"b":1},{"a":{"k":[1]}}]"#], &["a".to_string()])
            .unwrap();
        assert_eq!(
            doc.cells(),
            [
                vec!["x,y".to_string()],
                vec![String::new()],
                vec![r#"{"k":[1]}"#.to_string()]
            ]
        );
        assert_eq!(doc.row_count(), 3);
    }

    #[test]
    fn no_trailing_newline() {
        let doc = build_csv(&[r#"{"a":"1"}"#, r#"{"a":"2"}"#], &[]).unwrap();
        assert_eq!(doc.to_string(), "a\n1\n2");
    }
}
