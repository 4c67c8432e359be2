//! Data source abstraction and metadata.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{CaseGroupsError, Result};

use super::value::Value;

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// A table of case records keyed by column name.
///
/// Rows are stored row-major and always have exactly one cell per column;
/// short rows are padded with [`Value::Missing`] on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: IndexSet<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from column names and typed rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut names = IndexSet::with_capacity(columns.len());
        for column in columns {
            if names.contains(&column) {
                return Err(CaseGroupsError::DuplicateColumn(column));
            }
            names.insert(column);
        }

        let width = names.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Missing);
                row
            })
            .collect();

        Ok(Self {
            columns: names,
            rows,
        })
    }

    /// Create a table from raw strings, typing each cell with [`Value::parse`].
    pub fn from_strings<S: AsRef<str>>(columns: &[S], rows: &[Vec<S>]) -> Result<Self> {
        let columns = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| Value::parse(cell.as_ref())).collect())
            .collect();
        Self::new(columns, rows)
    }

    /// Same columns, no rows.
    pub fn empty_like(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in table order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.as_str())
    }

    /// Position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Position of a column, or an [`CaseGroupsError::UnknownColumn`] naming the role
    /// the column was requested for.
    pub fn require_column(&self, name: &str, context: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| CaseGroupsError::unknown_column(name, context))
    }

    /// Resolve several columns at once.
    pub fn require_columns<S: AsRef<str>>(&self, names: &[S], context: &str) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| self.require_column(name.as_ref(), context))
            .collect()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Keep only the rows matching a predicate.
    pub fn retain_rows(&self, mut keep: impl FnMut(&[Value]) -> bool) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
        }
    }

    /// Rewrite every cell of one column.
    pub fn map_column(&mut self, index: usize, mut f: impl FnMut(&Value) -> Value) {
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(index) {
                *cell = f(cell);
            }
        }
    }

    /// Every `column:value` token a filter can be built from.
    ///
    /// Columns are listed in sorted order and values in sorted order within each
    /// column; missing values are skipped.
    pub fn filter_options(&self) -> Vec<String> {
        let mut columns: Vec<(usize, &str)> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c.as_str()))
            .collect();
        columns.sort_by(|a, b| a.1.cmp(b.1));

        let mut options = Vec::new();
        for (index, name) in columns {
            let values: BTreeSet<String> = self
                .column_values(index)
                .filter_map(Value::label)
                .collect();
            options.extend(values.into_iter().map(|v| format!("{}:{}", name, v)));
        }
        options
    }
}
