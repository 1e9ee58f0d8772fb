//! Column discovery across heterogeneous JSON inputs.

use std::collections::BTreeSet;

use log::debug;
use serde_json::Value;

use crate::document::{flatten_rows, parse_document, row_fields};

/// Sorted union of the top-level keys found in every input.
///
/// Inputs that fail to parse contribute nothing, as do array elements that are
/// not objects. Ordering is byte-wise and case-sensitive, so identical inputs
/// always yield the same column list.
pub fn discover_columns<S: AsRef<str>>(inputs: &[S]) -> Vec<String> {
    let mut columns = BTreeSet::new();
    for (idx, input) in inputs.iter().enumerate() {
        match parse_document(input.as_ref()) {
            Ok(value) => collect_keys(value, &mut columns),
            Err(err) => debug!("Skipping input {} during discovery: {err}", idx + 1),
        }
    }
    columns.into_iter().collect()
}

pub(crate) fn collect_keys(value: Value, columns: &mut BTreeSet<String>) {
    for row in flatten_rows(value) {
        if let Some(fields) = row_fields(&row) {
            columns.extend(fields.keys().cloned());
        }
    }
}
