//! Grounding context handed to report generation, and the generated report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::selection::ReportSelection;
use crate::error::Result;
use crate::summary::SummaryOutput;

/// The three variables a report prompt is filled with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportContext {
    /// Markdown description of the summary table.
    pub description: String,
    /// The selected summary rows as CSV.
    pub dataset: String,
    /// How the rows were narrowed for this report; may be empty.
    pub filters: String,
    /// Number of data rows in `dataset`.
    pub row_count: usize,
}

impl ReportContext {
    /// Build the context for the rows of `output` kept by `selection`.
    pub fn from_summary(output: &SummaryOutput, selection: &ReportSelection) -> Result<Self> {
        let selected = selection.apply(&output.summary);
        Ok(Self {
            description: output.description.clone(),
            dataset: selected.to_csv()?,
            filters: selection.description(),
            row_count: selected.len(),
        })
    }
}

/// A generated narrative report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Markdown text of the report.
    pub text: String,
    /// Rows the report was generated over.
    pub selection: ReportSelection,
    /// Provider that produced the text.
    pub provider: String,
    /// Model that produced the text.
    pub model: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Table;
    use crate::summary::{SummarySpec, UTF8_BOM, summarize};

    #[test]
    fn test_context_from_top_ranks() {
        let table = Table::from_strings(
            &["region", "status"],
            &[
                vec!["north", "open"],
                vec!["north", "closed"],
                vec!["south", "open"],
            ],
        )
        .unwrap();
        let output = summarize(&table, &SummarySpec::new(["region"], ["status"])).unwrap();

        let context = ReportContext::from_summary(&output, &ReportSelection::TopRanks(1)).unwrap();

        assert_eq!(context.row_count, 2);
        assert!(context.dataset.starts_with(UTF8_BOM));
        assert!(!context.dataset.contains("south"));
        assert_eq!(context.description, output.description);
        assert!(context.filters.contains("top 1"));
    }
}
