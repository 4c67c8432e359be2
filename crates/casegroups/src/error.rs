//! Error types for the casegroups library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for casegroups operations.
#[derive(Debug, Error)]
pub enum CaseGroupsError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to summarize.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// The same column name appears more than once in a header row.
    #[error("Duplicate column: '{0}'")]
    DuplicateColumn(String),

    /// A selection or filter named a column the table does not have.
    #[error("Unknown {context} column: '{column}'")]
    UnknownColumn { column: String, context: String },

    /// A filter token is not of the form `column:value`.
    #[error("Malformed filter '{0}': expected <column>:<value>")]
    MalformedFilter(String),

    /// A required selection (group or aggregate columns) is empty.
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure in a text-generation provider.
    #[error("LLM error: {0}")]
    Llm(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CaseGroupsError {
    /// Shorthand for an unknown column in the given role.
    pub fn unknown_column(column: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
            context: context.into(),
        }
    }

    /// Whether this error was caused by the caller's selections rather than the data
    /// or the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownColumn { .. } | Self::MalformedFilter(_) | Self::EmptySelection(_)
        )
    }
}

/// Result type alias for casegroups operations.
pub type Result<T> = std::result::Result<T, CaseGroupsError>;
