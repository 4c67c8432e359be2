//! Attribute counts per temporal window, with window-over-window deltas.
//!
//! Windows are the distinct values of the temporal column, ordered as strings.
//! Columns holding dates must already be formatted so that string order is
//! chronological order (e.g. `2024-01`, `2024-02`).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::attribute::{ScopedCounts, count_row, resolve_aggregates};
use super::key::{AttributeValue, GroupKey};
use super::rank::rank_dense_desc;
use crate::error::{CaseGroupsError, Result};
use crate::input::{Table, Value};

/// Count of one attribute value for one group in one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub group: GroupKey,
    pub attribute: AttributeValue,
    pub window: String,
    pub count: usize,
    /// Dense rank among attribute values of the same group and window.
    pub rank: u32,
    /// Change from the immediately preceding window, where a pair with no
    /// record counts as 0; `None` at the pair's first window.
    pub delta: Option<i64>,
}

/// Count attribute values per (group, window) and compute deltas along each
/// (group, attribute) series.
///
/// Rows with a missing group or temporal value are skipped. Only non-zero counts
/// produce records. Output is ordered by group, window, rank, then attribute.
pub fn build_windowed<S: AsRef<str>, A: AsRef<str>>(
    table: &Table,
    group_columns: &[S],
    temporal_column: &str,
    aggregate_columns: &[A],
) -> Result<Vec<WindowRecord>> {
    if group_columns.is_empty() {
        return Err(CaseGroupsError::EmptySelection(
            "at least one group column is required".to_string(),
        ));
    }
    let group_indices = table.require_columns(group_columns, "group")?;
    let temporal_index = table.require_column(temporal_column, "temporal")?;
    let aggregates = resolve_aggregates(table, aggregate_columns)?;

    let mut counts: ScopedCounts<(GroupKey, String)> = BTreeMap::new();
    let mut windows: BTreeSet<String> = BTreeSet::new();
    for row in table.rows() {
        let Some(group) = GroupKey::from_row(row, &group_indices) else {
            continue;
        };
        let Some(window) = row.get(temporal_index).and_then(Value::label) else {
            continue;
        };
        windows.insert(window.clone());
        count_row(&mut counts, (group, window), row, &aggregates);
    }

    // Position of every window in the global order, shared by all groups.
    let positions: HashMap<String, usize> = windows
        .into_iter()
        .enumerate()
        .map(|(i, w)| (w, i))
        .collect();

    // Scopes iterate by group then window, so the last (position, count) seen for
    // a series is its latest earlier window. If that is not the immediately
    // preceding window, the series had no records there and its count was 0.
    let mut previous: HashMap<(GroupKey, AttributeValue), (usize, usize)> = HashMap::new();
    let mut output = Vec::new();

    for ((group, window), values) in counts {
        let position = positions.get(&window).copied().unwrap_or_default();
        let mut scoped: Vec<WindowRecord> = values
            .into_iter()
            .map(|(attribute, count)| {
                let series = (group.clone(), attribute.clone());
                let delta = previous
                    .insert(series, (position, count))
                    .map(|(prior_position, prior_count)| {
                        let prior = if prior_position + 1 == position {
                            prior_count
                        } else {
                            0
                        };
                        count as i64 - prior as i64
                    });
                WindowRecord {
                    group: group.clone(),
                    attribute,
                    window: window.clone(),
                    count,
                    rank: 0,
                    delta,
                }
            })
            .collect();

        rank_dense_desc(
            &mut scoped,
            |w| w.count,
            |a, b| a.attribute.cmp(&b.attribute),
            |w, rank| w.rank = rank,
        );
        output.extend(scoped);
    }

    debug!(
        temporal = temporal_column,
        rows = output.len(),
        "built windowed counts"
    );
    Ok(output)
}
