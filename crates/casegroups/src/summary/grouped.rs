//! Per-group record counts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::key::GroupKey;
use super::rank::rank_dense_desc;
use crate::error::{CaseGroupsError, Result};
use crate::input::Table;

/// Number of records in one group and the group's rank by that number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub group: GroupKey,
    pub count: usize,
    /// Dense rank, 1 = most records.
    pub rank: u32,
}

/// Count the records of every distinct group key.
///
/// Rows with a missing group value are not counted. Output is ordered by rank,
/// then by group key.
pub fn build_group_counts<S: AsRef<str>>(
    table: &Table,
    group_columns: &[S],
) -> Result<Vec<GroupCount>> {
    if group_columns.is_empty() {
        return Err(CaseGroupsError::EmptySelection(
            "at least one group column is required".to_string(),
        ));
    }
    let indices = table.require_columns(group_columns, "group")?;

    let mut counts: HashMap<GroupKey, usize> = HashMap::new();
    for row in table.rows() {
        if let Some(key) = GroupKey::from_row(row, &indices) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(group, count)| GroupCount {
            group,
            count,
            rank: 0,
        })
        .collect();

    rank_dense_desc(
        &mut groups,
        |g| g.count,
        |a, b| a.group.cmp(&b.group),
        |g, rank| g.rank = rank,
    );

    debug!(groups = groups.len(), "built group counts");
    Ok(groups)
}
