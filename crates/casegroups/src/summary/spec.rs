//! User selections that define one summary.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CaseGroupsError, Result};
use crate::input::Table;

/// Which columns to group by, which to count, and how to restrict the rows.
///
/// Can be read from JSON:
///
/// ```json
/// {
///   "groups": ["region"],
///   "aggregates": ["status", "channel"],
///   "temporal": "month",
///   "filters": ["priority:high"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySpec {
    /// Columns whose value combinations define the groups.
    pub groups: Vec<String>,
    /// Columns whose values are counted within each group.
    pub aggregates: Vec<String>,
    /// Optional column whose values define time windows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal: Option<String>,
    /// `column:value` tokens; a row must match all of them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
}

impl SummarySpec {
    pub fn new<S: Into<String>>(
        groups: impl IntoIterator<Item = S>,
        aggregates: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
            aggregates: aggregates.into_iter().map(Into::into).collect(),
            temporal: None,
            filters: Vec::new(),
        }
    }

    pub fn with_temporal(mut self, column: impl Into<String>) -> Self {
        self.temporal = Some(column.into());
        self
    }

    pub fn with_filters<S: Into<String>>(mut self, filters: impl IntoIterator<Item = S>) -> Self {
        self.filters = filters.into_iter().map(Into::into).collect();
        self
    }

    /// The temporal column, treating an empty name as none.
    pub fn temporal_column(&self) -> Option<&str> {
        self.temporal.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Check the selections against a table's columns.
    ///
    /// Filter tokens are checked when the filter runs.
    pub fn validate(&self, table: &Table) -> Result<()> {
        if self.groups.is_empty() {
            return Err(CaseGroupsError::EmptySelection(
                "at least one group column is required".to_string(),
            ));
        }
        if self.aggregates.is_empty() {
            return Err(CaseGroupsError::EmptySelection(
                "at least one aggregate column is required".to_string(),
            ));
        }

        table.require_columns(&self.groups, "group")?;
        table.require_columns(&self.aggregates, "aggregate")?;
        if let Some(temporal) = self.temporal_column() {
            table.require_column(temporal, "temporal")?;
        }
        Ok(())
    }

    /// Load a spec from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CaseGroupsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let spec = serde_json::from_reader(BufReader::new(file))?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_strings(&["region", "status", "month"], &[vec!["north", "open", "2024-01"]])
            .unwrap()
    }

    #[test]
    fn test_validate() {
        let spec = SummarySpec::new(["region"], ["status"]).with_temporal("month");
        assert!(spec.validate(&table()).is_ok());
    }

    #[test]
    fn test_empty_groups_rejected() {
        let spec = SummarySpec::new(Vec::<String>::new(), vec!["status".to_string()]);
        assert!(matches!(
            spec.validate(&table()),
            Err(CaseGroupsError::EmptySelection(_))
        ));
    }

    #[test]
    fn test_unknown_temporal_rejected() {
        let spec = SummarySpec::new(["region"], ["status"]).with_temporal("week");
        assert!(spec.validate(&table()).unwrap_err().is_input_error());
    }

    #[test]
    fn test_blank_temporal_is_none() {
        let spec = SummarySpec::new(["region"], ["status"]).with_temporal("");
        assert_eq!(spec.temporal_column(), None);
    }

    #[test]
    fn test_deserialize_defaults() {
        let spec: SummarySpec =
            serde_json::from_str(r#"{"groups": ["region"], "aggregates": ["status"]}"#).unwrap();
        assert_eq!(spec, SummarySpec::new(["region"], ["status"]));
    }
}
