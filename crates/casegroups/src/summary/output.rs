//! The merged summary table and its CSV form.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::key::{AttributeValue, GroupKey};
use crate::error::{CaseGroupsError, Result};

/// UTF-8 signature prepended to exported CSV.
pub const UTF8_BOM: &str = "\u{feff}";

/// Fixed columns following the group columns in every summary.
pub const SUMMARY_COLUMNS: &[&str] = &[
    "group_count",
    "group_rank",
    "attribute_value",
    "attribute_count",
    "attribute_rank",
];

/// One (group, attribute value) row of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub group: GroupKey,
    pub group_count: usize,
    pub group_rank: u32,
    pub attribute: AttributeValue,
    pub attribute_count: usize,
    pub attribute_rank: u32,
}

impl SummaryRow {
    fn cells(&self) -> Vec<String> {
        let mut cells = self.group.values().to_vec();
        cells.push(self.group_count.to_string());
        cells.push(self.group_rank.to_string());
        cells.push(self.attribute.to_string());
        cells.push(self.attribute_count.to_string());
        cells.push(self.attribute_rank.to_string());
        cells
    }
}

/// One (group, attribute value, window) row of a temporal summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalRow {
    #[serde(flatten)]
    pub base: SummaryRow,
    pub window: String,
    pub window_count: usize,
    pub window_rank: u32,
    pub window_delta: Option<i64>,
}

impl TemporalRow {
    fn cells(&self) -> Vec<String> {
        let mut cells = self.base.cells();
        cells.push(self.window.clone());
        cells.push(self.window_count.to_string());
        cells.push(self.window_rank.to_string());
        cells.push(self.window_delta.map(|d| d.to_string()).unwrap_or_default());
        cells
    }
}

/// Summary without a temporal column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainSummary {
    pub group_columns: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

/// Summary broken down by windows of a temporal column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalSummary {
    pub group_columns: Vec<String>,
    pub temporal_column: String,
    pub rows: Vec<TemporalRow>,
}

/// The ranked summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    Plain(PlainSummary),
    Temporal(TemporalSummary),
}

impl Summary {
    pub fn group_columns(&self) -> &[String] {
        match self {
            Summary::Plain(s) => &s.group_columns,
            Summary::Temporal(s) => &s.group_columns,
        }
    }

    pub fn temporal_column(&self) -> Option<&str> {
        match self {
            Summary::Plain(_) => None,
            Summary::Temporal(s) => Some(&s.temporal_column),
        }
    }

    /// Header row: group columns, the fixed summary columns, and for temporal
    /// summaries the four `<T>_window*` columns.
    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = self.group_columns().to_vec();
        headers.extend(SUMMARY_COLUMNS.iter().map(|c| c.to_string()));
        if let Some(t) = self.temporal_column() {
            headers.push(format!("{}_window", t));
            headers.push(format!("{}_window_count", t));
            headers.push(format!("{}_window_rank", t));
            headers.push(format!("{}_window_delta", t));
        }
        headers
    }

    pub fn len(&self) -> usize {
        match self {
            Summary::Plain(s) => s.rows.len(),
            Summary::Temporal(s) => s.rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The (group, attribute) part of every row, in table order.
    pub fn base_rows(&self) -> Box<dyn Iterator<Item = &SummaryRow> + '_> {
        match self {
            Summary::Plain(s) => Box::new(s.rows.iter()),
            Summary::Temporal(s) => Box::new(s.rows.iter().map(|r| &r.base)),
        }
    }

    /// Data rows as display strings, in header order.
    pub fn records(&self) -> Vec<Vec<String>> {
        match self {
            Summary::Plain(s) => s.rows.iter().map(SummaryRow::cells).collect(),
            Summary::Temporal(s) => s.rows.iter().map(TemporalRow::cells).collect(),
        }
    }

    /// A copy keeping only the rows whose (group, attribute) part matches.
    pub fn retain(&self, mut keep: impl FnMut(&SummaryRow) -> bool) -> Summary {
        match self {
            Summary::Plain(s) => Summary::Plain(PlainSummary {
                group_columns: s.group_columns.clone(),
                rows: s.rows.iter().filter(|r| keep(r)).cloned().collect(),
            }),
            Summary::Temporal(s) => Summary::Temporal(TemporalSummary {
                group_columns: s.group_columns.clone(),
                temporal_column: s.temporal_column.clone(),
                rows: s.rows.iter().filter(|r| keep(&r.base)).cloned().collect(),
            }),
        }
    }

    /// Distinct group keys, sorted.
    pub fn groups(&self) -> Vec<GroupKey> {
        let mut groups: Vec<GroupKey> = self.base_rows().map(|r| r.group.clone()).collect();
        groups.sort();
        groups.dedup();
        groups
    }

    /// Comma-delimited CSV with a UTF-8 signature, header row first, no index column.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .from_writer(Vec::new());

        writer.write_record(self.headers())?;
        for record in self.records() {
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| CaseGroupsError::Config(format!("Failed to flush CSV: {}", e)))?;
        let body = String::from_utf8(bytes)
            .map_err(|e| CaseGroupsError::Config(format!("CSV is not UTF-8: {}", e)))?;

        Ok(format!("{}{}", UTF8_BOM, body))
    }

    /// Write [`Summary::to_csv`] to a file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_csv()?).map_err(|e| CaseGroupsError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
