//! Property-based tests for the summary pipeline.
//!
//! These tests use proptest to generate random case tables and verify that
//! the pipeline maintains its invariants under all of them.
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p casegroups --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p casegroups --test property_tests
//! ```

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use casegroups::Table;
use casegroups::summary::{
    SummarySpec, build_attribute_counts, build_group_counts, build_windowed,
    drop_incomplete_groups, filter, summarize,
};

// =============================================================================
// Test Strategies
// =============================================================================

type CaseRow = (&'static str, &'static str, &'static str, &'static str);

/// Region, status, priority and month; regions and priorities may be missing.
fn case_row() -> impl Strategy<Value = CaseRow> {
    (
        prop::sample::select(vec!["north", "south", "east", "west", ""]),
        prop::sample::select(vec!["open", "closed", "pending"]),
        prop::sample::select(vec!["high", "low", "NULL"]),
        prop::sample::select(vec!["2024-01", "2024-02", "2024-03", "2024-04"]),
    )
}

fn case_rows() -> impl Strategy<Value = Vec<CaseRow>> {
    prop::collection::vec(case_row(), 1..80)
}

fn table(rows: &[CaseRow]) -> Table {
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|&(region, status, priority, month)| vec![region, status, priority, month])
        .collect();
    Table::from_strings(&["region", "status", "priority", "month"], &rows).unwrap()
}

/// Ranks, sorted by count descending, must start at 1, step by at most 1, and
/// change exactly when the count changes.
fn assert_dense(mut ranked: Vec<(usize, u32)>) -> Result<(), TestCaseError> {
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    if let Some(&(_, first)) = ranked.first() {
        prop_assert_eq!(first, 1);
    }
    for pair in ranked.windows(2) {
        let ((count_a, rank_a), (count_b, rank_b)) = (pair[0], pair[1]);
        if count_a == count_b {
            prop_assert_eq!(rank_a, rank_b);
        } else {
            prop_assert_eq!(rank_b, rank_a + 1);
        }
    }
    Ok(())
}

// =============================================================================
// Pipeline Properties
// =============================================================================

proptest! {
    /// Identical input and selections give byte-identical CSV.
    #[test]
    fn summary_is_deterministic(rows in case_rows()) {
        let table = table(&rows);
        let spec = SummarySpec::new(["region"], ["status", "priority"]).with_temporal("month");

        let first = summarize(&table, &spec).unwrap().summary.to_csv().unwrap();
        let second = summarize(&table, &spec).unwrap().summary.to_csv().unwrap();
        prop_assert_eq!(first, second);
    }

    /// Group ranks are dense over all groups.
    #[test]
    fn group_ranks_are_dense(rows in case_rows()) {
        let groups = build_group_counts(&table(&rows), &["region"]).unwrap();
        assert_dense(groups.iter().map(|g| (g.count, g.rank)).collect())?;
    }

    /// Attribute ranks are dense within each group.
    #[test]
    fn attribute_ranks_are_dense_per_group(rows in case_rows()) {
        let counts = build_attribute_counts(&table(&rows), &["region"], &["status", "priority"])
            .unwrap();

        let mut scopes: BTreeMap<String, Vec<(usize, u32)>> = BTreeMap::new();
        for c in &counts {
            scopes.entry(c.group.to_string()).or_default().push((c.count, c.rank));
        }
        for ranked in scopes.into_values() {
            assert_dense(ranked)?;
        }
    }

    /// Each delta is the change from the immediately preceding window in the
    /// global window order, counting an absent pair as 0; the first window of a
    /// series has none.
    #[test]
    fn window_deltas_follow_counts(rows in case_rows()) {
        let windows = build_windowed(&table(&rows), &["region"], "month", &["status"]).unwrap();

        let order: Vec<&str> = rows
            .iter()
            .filter(|&&(region, _, _, _)| !region.is_empty())
            .map(|&(_, _, _, month)| month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut series: BTreeMap<(String, String), BTreeMap<String, (usize, Option<i64>)>> =
            BTreeMap::new();
        for w in &windows {
            prop_assert!(w.count > 0);
            series
                .entry((w.group.to_string(), w.attribute.to_string()))
                .or_default()
                .insert(w.window.clone(), (w.count, w.delta));
        }

        for points in series.values() {
            let first = points.keys().next().unwrap();
            for (window, &(count, delta)) in points {
                if window == first {
                    prop_assert_eq!(delta, None);
                    continue;
                }
                let i = order.iter().position(|w| *w == window.as_str()).unwrap();
                let prior = points.get(order[i - 1]).map_or(0, |&(c, _)| c);
                prop_assert_eq!(delta, Some(count as i64 - prior as i64));
            }
        }
    }

    /// Group counts add up to the rows left after filtering.
    #[test]
    fn group_counts_conserve_rows(
        rows in case_rows(),
        status in prop::sample::select(vec!["open", "closed"]),
    ) {
        let complete = drop_incomplete_groups(&table(&rows), &["region"]).unwrap();
        let filtered = filter(&complete, &[format!("status:{}", status)]).unwrap();

        let groups = build_group_counts(&filtered, &["region"]).unwrap();
        let total: usize = groups.iter().map(|g| g.count).sum();
        prop_assert_eq!(total, filtered.row_count());
    }

    /// Filter tokens combine with AND.
    #[test]
    fn filter_is_conjunction(rows in case_rows()) {
        let table = table(&rows);

        let filtered = filter(&table, &["status:open", "priority:high"]).unwrap();
        let expected = rows
            .iter()
            .filter(|&&(_, status, priority, _)| status == "open" && priority == "high")
            .count();
        prop_assert_eq!(filtered.row_count(), expected);

        let contradictory = filter(&table, &["status:open", "status:closed"]).unwrap();
        prop_assert_eq!(contradictory.row_count(), 0);
    }
}
