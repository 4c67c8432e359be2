//! Options command - list columns and filter tokens of a data file.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(file: PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load(&file)?;
    let table = session.table();

    if verbose {
        if let Some(source) = session.source() {
            println!(
                "  {} rows, {} columns, sha256 {}",
                source.row_count, source.column_count, source.hash
            );
        }
    }

    println!();
    println!("{}", "Columns:".yellow().bold());
    for column in table.columns() {
        println!("  {}", column);
    }

    let options = session.filter_options();
    println!();
    println!(
        "{} ({})",
        "Filters:".yellow().bold(),
        options.len().to_string().white()
    );
    for option in &options {
        println!("  {}", option);
    }

    Ok(())
}
