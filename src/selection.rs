//! Selected-column state and its persistence.
//!
//! A selection starts [`ColumnSelection::Unset`]. The first time a non-empty
//! set of available columns is observed it becomes `Explicit` with every
//! available column; from then on only explicit edits change it, including an
//! edit down to an empty list.

use std::{
    env,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store key under which the selected columns are persisted.
pub const SELECTED_COLUMNS_KEY: &str = "jsonToCsvSelectedColumns";
/// Environment variable naming the default selection store file.
pub const STATE_ENV_VAR: &str = "JSON_CSV_STATE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnSelection {
    #[default]
    Unset,
    Explicit(Vec<String>),
}

impl ColumnSelection {
    pub fn is_unset(&self) -> bool {
        matches!(self, ColumnSelection::Unset)
    }

    /// Selected columns in output order. Empty means "all available".
    pub fn columns(&self) -> &[String] {
        match self {
            ColumnSelection::Unset => &[],
            ColumnSelection::Explicit(columns) => columns,
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns().iter().any(|c| c == column)
    }

    /// Applies the one-time default. Returns `true` when the state changed.
    pub fn observe_available(&mut self, available: &[String]) -> bool {
        if self.is_unset() && !available.is_empty() {
            debug!("Defaulting selection to {} available column(s)", available.len());
            *self = ColumnSelection::Explicit(available.to_vec());
            true
        } else {
            false
        }
    }

    /// Deselects `column` if selected, otherwise selects it and re-sorts.
    pub fn toggle(&mut self, column: &str) {
        let mut columns = self.columns().to_vec();
        if let Some(pos) = columns.iter().position(|c| c == column) {
            columns.remove(pos);
        } else {
            columns.push(column.to_string());
            columns.sort();
        }
        *self = ColumnSelection::Explicit(columns);
    }

    pub fn select_all(&mut self, available: &[String]) {
        *self = ColumnSelection::Explicit(available.to_vec());
    }

    pub fn deselect_all(&mut self) {
        *self = ColumnSelection::Explicit(Vec::new());
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreContents {
    #[serde(
        rename = "jsonToCsvSelectedColumns",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    selected_columns: Option<Vec<String>>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

/// File-backed key/value store holding the selection between runs.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SelectionStore { path: path.into() }
    }

    /// Store at `path`, or at `$JSON_CSV_STATE` when no path is given.
    pub fn resolve(path: Option<&Path>) -> Option<Self> {
        match path {
            Some(p) => Some(Self::new(p)),
            None => env::var_os(STATE_ENV_VAR)
                .filter(|value| !value.is_empty())
                .map(Self::new),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored selection. A missing file or key is `Unset`.
    pub fn load(&self) -> Result<ColumnSelection> {
        let contents = self.read_contents()?;
        Ok(match contents.selected_columns {
            Some(columns) => ColumnSelection::Explicit(columns),
            None => ColumnSelection::Unset,
        })
    }

    /// Writes the selection, keeping any unrelated keys already in the file.
    pub fn save(&self, selection: &ColumnSelection) -> Result<()> {
        let mut contents = self.read_contents()?;
        contents.selected_columns = match selection {
            ColumnSelection::Unset => None,
            ColumnSelection::Explicit(columns) => Some(columns.clone()),
        };
        let file = File::create(&self.path)
            .with_context(|| format!("Creating selection store {:?}", self.path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &contents)
            .context("Writing selection store JSON")?;
        writer.flush().context("Flushing selection store")?;
        debug!("Saved selection to {:?}", self.path);
        Ok(())
    }

    fn read_contents(&self) -> Result<StoreContents> {
        if !self.path.exists() {
            return Ok(StoreContents::default());
        }
        let file = File::open(&self.path)
            .with_context(|| format!("Opening selection store {:?}", self.path))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing selection store {:?}", self.path))
    }
}
