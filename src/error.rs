//! Failure kinds surfaced by the conversion core.
//!
//! Discovery never fails; building is all-or-nothing and reports exactly one of
//! these variants. Everything above the core (file I/O, the selection store,
//! the CLI) reports through `anyhow` instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid JSON in input {}: {message}", display_index(.input_index))]
    InvalidJson {
        input_index: Option<usize>,
        message: String,
    },

    #[error("No valid JSON data provided")]
    EmptyResult,
}

impl ConversionError {
    pub(crate) fn invalid_json(input_index: usize, err: &serde_json::Error) -> Self {
        ConversionError::InvalidJson {
            input_index: Some(input_index),
            message: err.to_string(),
        }
    }

    /// Zero-based position of the offending input, when known.
    pub fn input_index(&self) -> Option<usize> {
        match self {
            ConversionError::InvalidJson { input_index, .. } => *input_index,
            ConversionError::EmptyResult => None,
        }
    }
}

fn display_index(index: &Option<usize>) -> String {
    match index {
        Some(idx) => (idx + 1).to_string(),
        None => "?".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
