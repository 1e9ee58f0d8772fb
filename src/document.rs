//! Input documents and the JSON parsing helper shared by discovery and building.
//!
//! An input document is one JSON text supplied by the caller. Parsing is always
//! done from scratch: nothing parsed here outlives the call that asked for it.
//!
//! - [`parse_document`] is the single place raw text becomes a JSON value.
//! - [`flatten_rows`] turns a parsed document into the rows it contributes.
//! - [`InputSet`] is the ordered, editable collection of input slots a front
//!   end works with.

use anyhow::{Result, anyhow, bail};
use serde_json::{Map, Value};

/// Per-slot status shown next to an input that does not parse.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON";

pub fn parse_document(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(text)
}

/// Returns `None` when `text` parses as JSON and the status message otherwise.
pub fn validate_document(text: &str) -> Option<&'static str> {
    match parse_document(text) {
        Ok(_) => None,
        Err(_) => Some(INVALID_JSON_MESSAGE),
    }
}

/// The rows a parsed document contributes, in order.
///
/// Arrays contribute each element (flattened one level only); any other value
/// contributes itself as a single row.
pub fn flatten_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// The keyed view of a row. Anything that is not an object has no keys.
pub fn row_fields(row: &Value) -> Option<&Map<String, Value>> {
    row.as_object()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSet {
    inputs: Vec<String>,
}

impl Default for InputSet {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSet {
    /// A fresh set holding one empty slot.
    pub fn new() -> Self {
        InputSet {
            inputs: vec![String::new()],
        }
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let inputs = texts.into_iter().map(Into::into).collect::<Vec<_>>();
        if inputs.is_empty() {
            Self::new()
        } else {
            InputSet { inputs }
        }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.inputs.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.inputs
    }

    /// Appends an empty slot and returns its index.
    pub fn add(&mut self) -> usize {
        self.inputs.push(String::new());
        self.inputs.len() - 1
    }

    pub fn update(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let len = self.inputs.len();
        let slot = self
            .inputs
            .get_mut(index)
            .ok_or_else(|| anyhow!("Input {index} is out of range (have {len})"))?;
        *slot = text.into();
        Ok(())
    }

    /// Removes a slot. The first slot is permanent.
    pub fn remove(&mut self, index: usize) -> Result<String> {
        if index == 0 {
            bail!("The first input cannot be removed");
        }
        if index >= self.inputs.len() {
            bail!(
                "Input {index} is out of range (have {})",
                self.inputs.len()
            );
        }
        Ok(self.inputs.remove(index))
    }

    pub fn validate(&self, index: usize) -> Option<&'static str> {
        self.inputs
            .get(index)
            .and_then(|text| validate_document(text))
    }

    pub fn validation_errors(&self) -> Vec<Option<&'static str>> {
        self.inputs
            .iter()
            .map(|text| validate_document(text))
            .collect()
    }
}
