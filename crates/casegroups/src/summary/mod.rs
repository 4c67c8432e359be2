//! Group/attribute summarization.
//!
//! The pipeline runs strictly forward:
//!
//! ```text
//! normalize -> drop incomplete groups -> filter
//!     -> {group counts, attribute counts, windowed counts} -> merge
//! ```
//!
//! Every stage is a pure function of its inputs. [`summarize`] runs them all for
//! one [`SummarySpec`].

mod attribute;
mod describe;
mod filter;
mod grouped;
mod key;
mod merge;
mod normalize;
mod output;
mod rank;
mod spec;
mod temporal;

pub use attribute::{AttributeCount, build_attribute_counts};
pub use describe::{describe, proportion_percent};
pub use filter::{FilterToken, drop_incomplete_groups, filter};
pub use grouped::{GroupCount, build_group_counts};
pub use key::{AttributeValue, GroupKey};
pub use merge::merge;
pub use normalize::normalize;
pub use output::{
    PlainSummary, SUMMARY_COLUMNS, Summary, SummaryRow, TemporalRow, TemporalSummary, UTF8_BOM,
};
pub use spec::SummarySpec;
pub use temporal::{WindowRecord, build_windowed};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::input::Table;

/// A computed summary with the context needed to display or report on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryOutput {
    /// The selections this summary was computed from.
    pub spec: SummarySpec,
    /// The ranked table.
    pub summary: Summary,
    /// Markdown description of the table.
    pub description: String,
    /// Records with values for all group columns, before filtering.
    pub initial_row_count: usize,
    /// Records remaining after filtering.
    pub filtered_row_count: usize,
}

impl SummaryOutput {
    /// Whether the filters left nothing to summarize.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }

    /// Percentage of the group-complete records that passed the filters.
    pub fn dataset_proportion(&self) -> u32 {
        proportion_percent(self.filtered_row_count, self.initial_row_count)
    }
}

/// Run the full pipeline for one spec.
///
/// Selection errors are returned before any work is done. A filter that matches
/// nothing is not an error; it yields an empty summary.
pub fn summarize(table: &Table, spec: &SummarySpec) -> Result<SummaryOutput> {
    spec.validate(table)?;

    let normalized = normalize(table);
    let complete = drop_incomplete_groups(&normalized, &spec.groups)?;
    let initial_row_count = complete.row_count();
    let filtered = filter(&complete, &spec.filters)?;
    let filtered_row_count = filtered.row_count();

    let group_counts = build_group_counts(&filtered, &spec.groups)?;
    let attribute_counts = build_attribute_counts(&filtered, &spec.groups, &spec.aggregates)?;
    let windowed = match spec.temporal_column() {
        Some(temporal) => Some(build_windowed(
            &filtered,
            &spec.groups,
            temporal,
            &spec.aggregates,
        )?),
        None => None,
    };

    let summary = merge(
        &group_counts,
        &attribute_counts,
        windowed.as_deref(),
        spec.temporal_column(),
        &spec.groups,
    )?;

    info!(
        initial_rows = initial_row_count,
        filtered_rows = filtered_row_count,
        groups = group_counts.len(),
        summary_rows = summary.len(),
        "created summary"
    );

    Ok(SummaryOutput {
        spec: spec.clone(),
        description: describe(spec, initial_row_count, filtered_row_count),
        summary,
        initial_row_count,
        filtered_row_count,
    })
}
