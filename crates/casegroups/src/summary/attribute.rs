//! Per-group attribute value counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::key::{AttributeValue, GroupKey};
use super::rank::rank_dense_desc;
use crate::error::{CaseGroupsError, Result};
use crate::input::{Table, Value};

/// How often one attribute value occurs within one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeCount {
    pub group: GroupKey,
    pub attribute: AttributeValue,
    pub count: usize,
    /// Dense rank among all attribute values of the same group.
    pub rank: u32,
}

/// Attribute value counts per scope key.
pub(crate) type ScopedCounts<K> = BTreeMap<K, BTreeMap<AttributeValue, usize>>;

/// Resolved aggregate columns: table position and name.
pub(crate) fn resolve_aggregates<S: AsRef<str>>(
    table: &Table,
    aggregate_columns: &[S],
) -> Result<Vec<(usize, String)>> {
    if aggregate_columns.is_empty() {
        return Err(CaseGroupsError::EmptySelection(
            "at least one aggregate column is required".to_string(),
        ));
    }
    aggregate_columns
        .iter()
        .map(|name| {
            let name = name.as_ref();
            table
                .require_column(name, "aggregate")
                .map(|i| (i, name.to_string()))
        })
        .collect()
}

/// Add one row's non-missing aggregate values to the counts of `scope`.
pub(crate) fn count_row<K: Ord>(
    counts: &mut ScopedCounts<K>,
    scope: K,
    row: &[Value],
    aggregates: &[(usize, String)],
) {
    let scoped = counts.entry(scope).or_default();
    for (index, column) in aggregates {
        if let Some(value) = row.get(*index).and_then(Value::label) {
            *scoped
                .entry(AttributeValue::new(column.as_str(), value))
                .or_insert(0) += 1;
        }
    }
}

/// Count each distinct value of each aggregate column within each group.
///
/// Ranks restart at 1 in every group. Output is ordered by group key, then rank,
/// then attribute.
pub fn build_attribute_counts<S: AsRef<str>, A: AsRef<str>>(
    table: &Table,
    group_columns: &[S],
    aggregate_columns: &[A],
) -> Result<Vec<AttributeCount>> {
    if group_columns.is_empty() {
        return Err(CaseGroupsError::EmptySelection(
            "at least one group column is required".to_string(),
        ));
    }
    let group_indices = table.require_columns(group_columns, "group")?;
    let aggregates = resolve_aggregates(table, aggregate_columns)?;

    let mut counts: ScopedCounts<GroupKey> = BTreeMap::new();
    for row in table.rows() {
        if let Some(group) = GroupKey::from_row(row, &group_indices) {
            count_row(&mut counts, group, row, &aggregates);
        }
    }

    let mut output = Vec::new();
    for (group, values) in counts {
        let mut scoped: Vec<AttributeCount> = values
            .into_iter()
            .map(|(attribute, count)| AttributeCount {
                group: group.clone(),
                attribute,
                count,
                rank: 0,
            })
            .collect();

        rank_dense_desc(
            &mut scoped,
            |a| a.count,
            |a, b| a.attribute.cmp(&b.attribute),
            |a, rank| a.rank = rank,
        );
        output.extend(scoped);
    }

    debug!(rows = output.len(), "built attribute counts");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_of(counts: &[AttributeCount]) -> Vec<(String, String, usize, u32)> {
        counts
            .iter()
            .map(|a| (a.group.to_string(), a.attribute.to_string(), a.count, a.rank))
            .collect()
    }

    #[test]
    fn test_region_status_ties() {
        let table = Table::from_strings(
            &["region", "status"],
            &[
                vec!["north", "open"],
                vec!["north", "closed"],
                vec!["south", "open"],
            ],
        )
        .unwrap();

        let counts = build_attribute_counts(&table, &["region"], &["status"]).unwrap();
        assert_eq!(
            summary_of(&counts),
            vec![
                ("north".to_string(), "status:closed".to_string(), 1, 1),
                ("north".to_string(), "status:open".to_string(), 1, 1),
                ("south".to_string(), "status:open".to_string(), 1, 1),
            ]
        );
    }

    #[test]
    fn test_ranks_reset_per_group_and_span_columns() {
        let table = Table::from_strings(
            &["region", "status", "channel"],
            &[
                vec!["north", "open", "web"],
                vec!["north", "open", "web"],
                vec!["north", "closed", "web"],
                vec!["south", "open", ""],
            ],
        )
        .unwrap();

        let counts =
            build_attribute_counts(&table, &["region"], &["status", "channel"]).unwrap();
        assert_eq!(
            summary_of(&counts),
            vec![
                ("north".to_string(), "channel:web".to_string(), 3, 1),
                ("north".to_string(), "status:open".to_string(), 2, 2),
                ("north".to_string(), "status:closed".to_string(), 1, 3),
                ("south".to_string(), "status:open".to_string(), 1, 1),
            ]
        );
    }

    #[test]
    fn test_unknown_aggregate() {
        let table = Table::from_strings(&["region"], &[vec!["north"]]).unwrap();
        let err = build_attribute_counts(&table, &["region"], &["status"]).unwrap_err();
        assert!(err.to_string().contains("aggregate"));
    }
}
