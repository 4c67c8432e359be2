//! End-to-end tests: file on disk through a session to CSV and report.

use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use casegroups::{CaseGroupsError, MockProvider, ReportSelection, Session, Summary, SummarySpec};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn region_status() -> NamedTempFile {
    create_test_file(
        "region,status,month\n\
         north,open,2024-01\n\
         north,closed,2024-01\n\
         south,open,2024-02\n",
    )
}

/// A larger set of cases with a second grouping column and some gaps.
fn cases() -> NamedTempFile {
    create_test_file(
        "case_id\tregion\tchannel\tstatus\tpriority\tmonth\n\
         1\tnorth\tphone\topen\thigh\t2024-01\n\
         2\tnorth\tphone\tclosed\tlow\t2024-01\n\
         3\tnorth\temail\topen\thigh\t2024-02\n\
         4\tsouth\tphone\topen\tlow\t2024-01\n\
         5\tsouth\temail\topen\thigh\t2024-02\n\
         6\tsouth\temail\tclosed\thigh\t2024-02\n\
         7\teast\tphone\topen\tNULL\t2024-03\n\
         8\t\tphone\topen\tlow\t2024-03\n\
         9\tnorth\tphone\topen\thigh\t2024-03\n",
    )
}

// =============================================================================
// Summary Scenarios
// =============================================================================

#[test]
fn test_region_status_summary() {
    let file = region_status();
    let mut session = Session::load(file.path()).unwrap();

    let output = session
        .create_summary(SummarySpec::new(["region"], ["status"]))
        .unwrap();

    assert_eq!(
        output.summary.to_csv().unwrap(),
        "\u{feff}region,group_count,group_rank,attribute_value,attribute_count,attribute_rank\n\
         north,2,1,status:closed,1,1\n\
         north,2,1,status:open,1,1\n\
         south,1,2,status:open,1,1\n"
    );
}

#[test]
fn test_region_status_by_month() {
    let file = region_status();
    let mut session = Session::load(file.path()).unwrap();

    let spec = SummarySpec::new(["region"], ["status"]).with_temporal("month");
    let output = session.create_summary(spec).unwrap();

    let Summary::Temporal(summary) = &output.summary else {
        panic!("expected a temporal summary");
    };
    assert_eq!(summary.rows.len(), 3);

    // north has no records in 2024-02, so no window row exists for it there
    assert!(
        summary
            .rows
            .iter()
            .all(|r| r.base.group.to_string() != "north" || r.window == "2024-01")
    );
    assert!(summary.rows.iter().all(|r| r.window_delta.is_none()));

    let headers = output.summary.headers();
    assert_eq!(
        &headers[6..],
        &[
            "month_window",
            "month_window_count",
            "month_window_rank",
            "month_window_delta"
        ]
    );
}

#[test]
fn test_tsv_with_gaps() {
    let file = cases();
    let mut session = Session::load(file.path()).unwrap();
    assert_eq!(session.source().unwrap().row_count, 9);

    let output = session
        .create_summary(SummarySpec::new(["region"], ["status", "priority"]))
        .unwrap();

    // The row without a region is dropped before counting.
    assert_eq!(output.initial_row_count, 8);

    let groups: Vec<String> = output
        .summary
        .groups()
        .iter()
        .map(|g| g.to_string())
        .collect();
    assert_eq!(groups, vec!["east", "north", "south"]);

    // Missing priority values are never counted as attribute values.
    assert!(
        output
            .summary
            .base_rows()
            .all(|r| r.attribute.value != "NULL" && !r.attribute.value.is_empty())
    );
}

#[test]
fn test_multi_column_groups() {
    let file = cases();
    let mut session = Session::load(file.path()).unwrap();

    let output = session
        .create_summary(SummarySpec::new(["region", "channel"], ["status"]))
        .unwrap();

    let first = output.summary.base_rows().next().unwrap();
    assert_eq!(first.group.to_string(), "(north, phone)");
    assert_eq!(first.group_count, 3);
    assert_eq!(first.group_rank, 1);
    assert_eq!(output.summary.headers()[..2], ["region", "channel"]);
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn test_filter_conjunction() {
    let file = cases();
    let mut session = Session::load(file.path()).unwrap();

    let spec = SummarySpec::new(["region"], ["channel"])
        .with_filters(["status:open", "priority:high"]);
    let output = session.create_summary(spec).unwrap();

    assert_eq!(output.filtered_row_count, 4);
    assert_eq!(output.dataset_proportion(), 50);
    assert!(output.description.contains("**50%**"));

    let spec = SummarySpec::new(["region"], ["channel"])
        .with_filters(["status:open", "status:closed"]);
    let output = session.create_summary(spec).unwrap();
    assert!(output.is_empty());
    assert_eq!(output.summary.to_csv().unwrap().lines().count(), 1);
}

#[test]
fn test_filter_options_skip_missing() {
    let file = cases();
    let session = Session::load(file.path()).unwrap();
    let options = session.filter_options();

    assert!(options.contains(&"priority:high".to_string()));
    assert!(!options.iter().any(|o| o == "priority:NULL" || o == "region:"));
    let position = |token: &str| options.iter().position(|o| o == token);
    assert!(position("case_id:1") < position("channel:email"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unknown_column_keeps_prior_summary() {
    let file = region_status();
    let mut session = Session::load(file.path()).unwrap();
    session
        .create_summary(SummarySpec::new(["region"], ["status"]))
        .unwrap();

    let err = session
        .create_summary(SummarySpec::new(["district"], ["status"]))
        .unwrap_err();
    assert!(matches!(err, CaseGroupsError::UnknownColumn { .. }));
    assert_eq!(err.to_string(), "Unknown group column: 'district'");

    let err = session
        .create_summary(SummarySpec::new(["region"], ["status"]).with_filters(["status"]))
        .unwrap_err();
    assert!(matches!(err, CaseGroupsError::MalformedFilter(_)));

    assert_eq!(session.summary().unwrap().summary.len(), 3);
}

#[test]
fn test_empty_selection() {
    let file = region_status();
    let mut session = Session::load(file.path()).unwrap();

    let empty: [&str; 0] = [];
    let err = session
        .create_summary(SummarySpec::new(["region"], empty))
        .unwrap_err();
    assert!(matches!(err, CaseGroupsError::EmptySelection(_)));
}

// =============================================================================
// Export And Reports
// =============================================================================

#[test]
fn test_write_csv_and_spec_file() {
    let dir = TempDir::new().unwrap();
    let spec_path = dir.path().join("spec.json");
    std::fs::write(
        &spec_path,
        r#"{"groups": ["region"], "aggregates": ["status"], "temporal": "month"}"#,
    )
    .unwrap();

    let file = cases();
    let mut session = Session::load(file.path()).unwrap();
    let spec = SummarySpec::load(&spec_path).unwrap();
    let output = session.create_summary(spec).unwrap();

    let csv_path = dir.path().join("cases.group_summary.csv");
    output.summary.write_csv(&csv_path).unwrap();

    let written = std::fs::read(&csv_path).unwrap();
    assert!(written.starts_with(b"\xEF\xBB\xBF"));

    let reloaded = Session::load(&csv_path).unwrap();
    assert_eq!(
        reloaded.table().columns().collect::<Vec<_>>(),
        output.summary.headers()
    );
}

#[test]
fn test_report_over_top_groups() {
    let file = cases();
    let mut session = Session::load(file.path()).unwrap();
    session
        .create_summary(SummarySpec::new(["region"], ["status"]))
        .unwrap();

    let context = session
        .report_context(&ReportSelection::TopRanks(1))
        .unwrap();
    assert!(context.dataset.contains("north"));
    assert!(!context.dataset.contains("south"));

    let report = session
        .generate_report(&MockProvider::new(), ReportSelection::TopRanks(1))
        .unwrap();
    assert!(report.text.contains("top 1 groups"));
    assert_eq!(report.provider, "mock");
}
