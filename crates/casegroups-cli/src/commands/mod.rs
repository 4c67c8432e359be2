//! CLI command implementations.

pub mod options;
pub mod report;
pub mod summarize;

use std::path::Path;

use casegroups::Session;
use colored::Colorize;

use crate::cli::SummaryArgs;

/// Load the data file and build the summary the arguments describe.
pub(crate) fn load_and_summarize(
    args: &SummaryArgs,
) -> Result<Session, Box<dyn std::error::Error>> {
    let mut session = load(&args.file)?;
    let spec = args.to_spec()?;

    let output = session.create_summary(spec)?;

    println!(
        "Summarized {} of {} records into {} rows",
        output.filtered_row_count.to_string().white().bold(),
        output.initial_row_count,
        output.summary.len().to_string().white().bold()
    );
    Ok(session)
}

/// Load a data file into a new session.
pub(crate) fn load(file: &Path) -> Result<Session, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Loading".cyan().bold(),
        file.display().to_string().white()
    );
    Ok(Session::load(file)?)
}
