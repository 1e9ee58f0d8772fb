use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Number, Value};

/// One JSON value as it appears in a single (row, column) slot.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    Null,
    Bool(bool),
    Number(&'a Number),
    String(&'a str),
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
}

impl<'a> CellValue<'a> {
    /// Looks up `column` in `row`. Missing keys and non-object rows are `Null`.
    pub fn lookup(row: &'a Value, column: &str) -> Self {
        row.as_object()
            .and_then(|fields| fields.get(column))
            .map(CellValue::from)
            .unwrap_or(CellValue::Null)
    }

    /// Unescaped cell text.
    pub fn as_display(&self) -> Cow<'a, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Number(n) => Cow::Owned(format_number(n)),
            CellValue::String(s) => Cow::Borrowed(*s),
            CellValue::Object(map) => Cow::Owned(compact_json(*map)),
            CellValue::Array(items) => Cow::Owned(compact_json(*items)),
        }
    }

    /// Cell text with quotes doubled and, where needed, the whole cell wrapped.
    pub fn encode(&self) -> Cow<'a, str> {
        match self.as_display() {
            Cow::Borrowed(text) => escape_cell(text),
            Cow::Owned(text) => Cow::Owned(escape_cell(&text).into_owned()),
        }
    }
}

impl<'a> From<&'a Value> for CellValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => CellValue::Number(n),
            Value::String(s) => CellValue::String(s),
            Value::Object(map) => CellValue::Object(map),
            Value::Array(items) => CellValue::Array(items),
        }
    }
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

fn format_number(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    // f64's Display already drops a zero fraction; only -0 needs folding.
    match number.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}

fn compact_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    // Serializing an in-memory JSON tree cannot fail: every key is a string.
    serde_json::to_string(value).unwrap_or_default()
}

/// Applies the cell escaping rules to already-rendered text.
///
/// Every `"` is doubled first; the doubled text is then wrapped in quotes when
/// it contains a comma, a quote or a newline.
pub fn escape_cell(text: &str) -> Cow<'_, str> {
    let doubled: Cow<'_, str> = if text.contains('"') {
        Cow::Owned(text.replace('"', "\"\""))
    } else {
        Cow::Borrowed(text)
    };
    if doubled.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{doubled}\""))
    } else {
        doubled
    }
}
