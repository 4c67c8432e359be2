//! Joining group, attribute and window counts into one ranked table.

use std::collections::HashMap;

use tracing::debug;

use super::attribute::AttributeCount;
use super::grouped::GroupCount;
use super::key::{AttributeValue, GroupKey};
use super::output::{PlainSummary, Summary, SummaryRow, TemporalRow, TemporalSummary};
use super::temporal::WindowRecord;
use crate::error::{CaseGroupsError, Result};

/// Inner-join the builder outputs into a [`Summary`].
///
/// Without window records the result has one row per (group, attribute value);
/// with them, one row per (group, attribute value, window). Records with no match
/// in the other inputs are dropped. Rows are ordered by group rank, group key,
/// attribute rank, attribute value and window.
pub fn merge<S: AsRef<str>>(
    group_counts: &[GroupCount],
    attribute_counts: &[AttributeCount],
    windowed: Option<&[WindowRecord]>,
    temporal_column: Option<&str>,
    group_columns: &[S],
) -> Result<Summary> {
    let group_columns: Vec<String> = group_columns
        .iter()
        .map(|c| c.as_ref().to_string())
        .collect();

    if let Some(bad) = group_counts
        .iter()
        .find(|g| g.group.len() != group_columns.len())
    {
        return Err(CaseGroupsError::Config(format!(
            "group key {} does not match {} group columns",
            bad.group,
            group_columns.len()
        )));
    }

    let groups: HashMap<&GroupKey, &GroupCount> =
        group_counts.iter().map(|g| (&g.group, g)).collect();

    let mut rows: Vec<SummaryRow> = attribute_counts
        .iter()
        .filter_map(|a| {
            groups.get(&a.group).map(|g| SummaryRow {
                group: a.group.clone(),
                group_count: g.count,
                group_rank: g.rank,
                attribute: a.attribute.clone(),
                attribute_count: a.count,
                attribute_rank: a.rank,
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        a.group_rank
            .cmp(&b.group_rank)
            .then_with(|| a.group.cmp(&b.group))
            .then_with(|| a.attribute_rank.cmp(&b.attribute_rank))
            .then_with(|| a.attribute.cmp(&b.attribute))
    });

    let summary = match (windowed, temporal_column.filter(|t| !t.is_empty())) {
        (None, None) => Summary::Plain(PlainSummary {
            group_columns,
            rows,
        }),
        (Some(windowed), Some(temporal)) => {
            let base: HashMap<(&GroupKey, &AttributeValue), usize> = rows
                .iter()
                .enumerate()
                .map(|(i, r)| ((&r.group, &r.attribute), i))
                .collect();

            let mut temporal_rows: Vec<(usize, TemporalRow)> = windowed
                .iter()
                .filter_map(|w| {
                    base.get(&(&w.group, &w.attribute)).map(|&i| {
                        (
                            i,
                            TemporalRow {
                                base: rows[i].clone(),
                                window: w.window.clone(),
                                window_count: w.count,
                                window_rank: w.rank,
                                window_delta: w.delta,
                            },
                        )
                    })
                })
                .collect();
            temporal_rows
                .sort_by(|(ia, a), (ib, b)| ia.cmp(ib).then_with(|| a.window.cmp(&b.window)));

            Summary::Temporal(TemporalSummary {
                group_columns,
                temporal_column: temporal.to_string(),
                rows: temporal_rows.into_iter().map(|(_, r)| r).collect(),
            })
        }
        (Some(_), None) => {
            return Err(CaseGroupsError::Config(
                "window records given without a temporal column name".to_string(),
            ));
        }
        (None, Some(temporal)) => {
            return Err(CaseGroupsError::Config(format!(
                "temporal column '{}' given without window records",
                temporal
            )));
        }
    };

    debug!(rows = summary.len(), "merged summary");
    Ok(summary)
}
