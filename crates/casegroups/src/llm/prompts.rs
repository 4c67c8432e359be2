//! Prompt templates for report generation.

use crate::report::ReportContext;

use super::provider::LlmConfig;

/// Build the user prompt for a group comparison report.
pub fn report_prompt(context: &ReportContext, config: &LlmConfig) -> String {
    let filters = if context.filters.is_empty() {
        "No additional filters; all groups in the summary are included.".to_string()
    } else {
        context.filters.clone()
    };

    let extra = config
        .instructions
        .as_deref()
        .map(|i| format!("\n\n## Additional Instructions\n{}", i))
        .unwrap_or_default();

    format!(
        r#"Write a report comparing the groups in this data summary.

## Summary Description
{}

## Report Scope
{}

## Data Summary ({} rows, CSV)
{}

## Task
Write a markdown report that:
1. Opens with a short overview of the groups covered and how they compare in size
2. Describes, for each group, its most frequent attribute values and what sets it apart
3. Where window columns are present, describes notable increases or decreases over time
4. Closes with the most significant similarities and differences between groups

Cite group_count, attribute_count and window values from the table when making a claim.
Do not state anything the table does not support.{}"#,
        context.description.trim(),
        filters,
        context.row_count,
        context.dataset.trim_start_matches('\u{feff}').trim(),
        extra
    )
}

/// System prompt for all report generation.
pub fn system_prompt() -> &'static str {
    r#"You are an analyst who writes reports comparing groups of case records.

You are given a table in which each row pairs a group with one attribute value:
- group_count / group_rank: how many records the group has and its rank by that count
- attribute_value: a column:value pair counted within the group
- attribute_count / attribute_rank: how often the value occurs in the group and its rank
- <time>_window columns, when present: the same count within one time window, its rank
  in that window, and its change (delta) from the preceding window

Guidelines:
- Be concise and specific
- Ground every statement in the numbers given
- Ranks are dense: equal counts share a rank
- An empty delta means there is no earlier window to compare with
- Never speculate about causes the data cannot show"#
}
