//! Summarize command - build the group summary and write it as CSV.

use std::path::{Path, PathBuf};

use casegroups::Summary;
use colored::Colorize;

use crate::cli::SummaryArgs;

/// Rows shown in the terminal preview.
const PREVIEW_ROWS: usize = 20;

pub fn run(
    args: SummaryArgs,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_and_summarize(&args)?;
    let Some(result) = session.summary() else {
        return Err("No summary was created".into());
    };

    if verbose {
        println!();
        println!("{}", "Spec:".yellow().bold());
        println!("{}", serde_json::to_string_pretty(&result.spec)?);
    }

    println!();
    if result.is_empty() {
        println!("{}", "No data matches the selected filters.".yellow());
    } else {
        print_preview(&result.summary);
    }

    println!();
    println!("{}", result.description);

    let output_path = output.unwrap_or_else(|| default_output(&args.file));
    result.summary.write_csv(&output_path)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

/// `<stem>.group_summary.csv` next to the input file.
fn default_output(file: &Path) -> PathBuf {
    let mut p = file.to_path_buf();
    let stem = p.file_stem().unwrap_or_default().to_string_lossy();
    p.set_file_name(format!("{}.group_summary.csv", stem));
    p
}

fn print_preview(summary: &Summary) {
    let headers = summary.headers();
    let records = summary.records();

    println!("{}", headers.join("  ").cyan().bold());
    for record in records.iter().take(PREVIEW_ROWS) {
        println!("{}", record.join("  "));
    }
    if records.len() > PREVIEW_ROWS {
        println!(
            "{}",
            format!("... {} more rows", records.len() - PREVIEW_ROWS).dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("data/cases.csv")),
            PathBuf::from("data/cases.group_summary.csv")
        );
    }
}
