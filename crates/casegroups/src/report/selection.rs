//! Choosing which summary rows a report covers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::summary::{GroupKey, Summary};

/// Rows of the summary to report on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ReportSelection {
    /// Every row.
    #[default]
    All,
    /// Only the listed groups.
    Groups(Vec<GroupKey>),
    /// Groups whose rank is at most this value.
    TopRanks(u32),
}

impl ReportSelection {
    /// Pick a selection from both user inputs; explicit groups win over a rank
    /// cutoff, and a zero cutoff means no cutoff.
    pub fn from_inputs(groups: Vec<GroupKey>, top_ranks: Option<u32>) -> Self {
        if !groups.is_empty() {
            ReportSelection::Groups(groups)
        } else {
            match top_ranks {
                Some(n) if n > 0 => ReportSelection::TopRanks(n),
                _ => ReportSelection::All,
            }
        }
    }

    /// The rows of `summary` this selection keeps.
    pub fn apply(&self, summary: &Summary) -> Summary {
        match self {
            ReportSelection::All => summary.clone(),
            ReportSelection::Groups(groups) => {
                let wanted: HashSet<&GroupKey> = groups.iter().collect();
                summary.retain(|row| wanted.contains(&row.group))
            }
            ReportSelection::TopRanks(n) => summary.retain(|row| row.group_rank <= *n),
        }
    }

    /// Plain-language note on how the data was narrowed; empty for [`ReportSelection::All`].
    pub fn description(&self) -> String {
        match self {
            ReportSelection::All => String::new(),
            ReportSelection::Groups(groups) => format!(
                "Filtered to the following groups only: {}",
                groups
                    .iter()
                    .map(|g| g.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ReportSelection::TopRanks(n) => {
                format!("Filtered to the top {} groups by record count", n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{AttributeValue, PlainSummary, SummaryRow};

    fn summary() -> Summary {
        let row = |group: &str, rank: u32| SummaryRow {
            group: GroupKey::new(vec![group.to_string()]),
            group_count: 1,
            group_rank: rank,
            attribute: AttributeValue::new("status", "open"),
            attribute_count: 1,
            attribute_rank: 1,
        };
        Summary::Plain(PlainSummary {
            group_columns: vec!["region".to_string()],
            rows: vec![row("north", 1), row("south", 2), row("west", 3)],
        })
    }

    #[test]
    fn test_groups_win_over_ranks() {
        let groups = vec![GroupKey::parse("west", '|')];
        let selection = ReportSelection::from_inputs(groups.clone(), Some(2));
        assert_eq!(selection, ReportSelection::Groups(groups));
        assert_eq!(ReportSelection::from_inputs(Vec::new(), Some(0)), ReportSelection::All);
    }

    #[test]
    fn test_top_ranks() {
        let selected = ReportSelection::TopRanks(2).apply(&summary());
        assert_eq!(selected.len(), 2);
        assert_eq!(
            ReportSelection::TopRanks(2).description(),
            "Filtered to the top 2 groups by record count"
        );
    }

    #[test]
    fn test_explicit_groups() {
        let selection = ReportSelection::Groups(vec![
            GroupKey::parse("south", '|'),
            GroupKey::parse("west", '|'),
        ]);
        let selected = selection.apply(&summary());
        assert_eq!(selected.groups().len(), 2);
        assert_eq!(
            selection.description(),
            "Filtered to the following groups only: south, west"
        );
    }
}
