//! Markdown description shown with a summary and passed to report generation.

use super::spec::SummarySpec;

/// Share of `part` in `whole` as a whole percentage; 0 when `whole` is 0.
///
/// Halves round to the even neighbour, so 12.5% is reported as 12%.
pub fn proportion_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round_ties_even() as u32
}

/// Describe what a summary table contains.
///
/// `initial_rows` counts records with values for every group column;
/// `filtered_rows` counts those left after the filters.
pub fn describe(spec: &SummarySpec, initial_rows: usize, filtered_rows: usize) -> String {
    let groups = bracketed(spec.groups.iter().map(|g| g.to_string()));

    let mut description = String::from("This table shows:");
    if spec.filters.is_empty() {
        description.push_str(&format!(
            "\n- A summary of all **{}** data records with values for all grouping attributes",
            initial_rows
        ));
    } else {
        let filters = bracketed(spec.filters.iter().map(|f| f.replace(':', "\\:")));
        description.push_str(&format!(
            "\n- A summary of **{}** data records matching {}, representing **{}%** of the \
             overall dataset with values for all grouping attributes",
            filtered_rows,
            filters,
            proportion_percent(filtered_rows, initial_rows)
        ));
    }

    description.push_str(&format!(
        "\n- The **group_count** of records for all {} groups, and corresponding **group_rank**",
        groups
    ));
    description.push_str(&format!(
        "\n- The **attribute_count** of each **attribute_value** for all {} groups, and \
         corresponding **attribute_rank**",
        groups
    ));

    if let Some(t) = spec.temporal_column() {
        description.push_str(&format!(
            "\n- The **{t}_window_count** of each **attribute_value** for each **{t}_window** \
             for all {groups} groups, and corresponding **{t}_window_rank**"
        ));
        description.push_str(&format!(
            "\n- The **{t}_window_delta**, or change in the **attribute_count** for successive \
             **{t}_window** values, within each {groups} group"
        ));
    }

    description
}

/// `[**a**, **b**]`
fn bracketed(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.map(|i| format!("**{}**", i)).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportion() {
        assert_eq!(proportion_percent(1, 3), 33);
        assert_eq!(proportion_percent(2, 3), 67);
        assert_eq!(proportion_percent(5, 0), 0);
    }

    #[test]
    fn test_proportion_halves_round_to_even() {
        assert_eq!(proportion_percent(1, 8), 12);
        assert_eq!(proportion_percent(3, 8), 38);
        assert_eq!(proportion_percent(1, 200), 0);
    }

    #[test]
    fn test_unfiltered_description() {
        let spec = SummarySpec::new(["region"], ["status"]);
        let text = describe(&spec, 3, 3);
        assert!(text.starts_with("This table shows:"));
        assert!(text.contains("all **3** data records"));
        assert!(text.contains("[**region**]"));
        assert!(!text.contains("window"));
    }

    #[test]
    fn test_filtered_temporal_description() {
        let spec = SummarySpec::new(["region", "channel"], ["status"])
            .with_temporal("month")
            .with_filters(["priority:high"]);
        let text = describe(&spec, 4, 1);
        assert!(text.contains("**1** data records matching [**priority\\:high**]"));
        assert!(text.contains("**25%**"));
        assert!(text.contains("[**region**, **channel**]"));
        assert!(text.contains("**month_window_delta**"));
    }
}
