//! Casegroups: compare groups of case records.
//!
//! A table of case records is summarized by chosen group columns: how many
//! records each group has, which attribute values are most frequent within it,
//! and optionally how those counts move across time windows. The ranked summary
//! is written as CSV and can be handed to an LLM to write a narrative report.
//!
//! # Core Principles
//!
//! - **Deterministic**: The same table and selections always give the same summary
//! - **Non-destructive**: The loaded table is never modified by a summary
//! - **Grounded**: Reports are generated only from the summary rows they cover
//!
//! # Example
//!
//! ```no_run
//! use casegroups::{Session, SummarySpec};
//!
//! let mut session = Session::load("cases.csv").unwrap();
//! let spec = SummarySpec::new(["region"], ["status"]).with_temporal("month");
//! let output = session.create_summary(spec).unwrap();
//!
//! println!("{}", output.description);
//! output.summary.write_csv("cases.group_summary.csv").unwrap();
//! ```

pub mod error;
pub mod input;
pub mod llm;
pub mod report;
pub mod summary;

mod session;

pub use error::{CaseGroupsError, Result};
pub use input::{Parser, ParserConfig, SourceMetadata, Table, Value};
pub use llm::{
    AnthropicProvider, LlmConfig, LlmProvider, MockProvider, OllamaProvider, OpenAIProvider,
};
pub use report::{Report, ReportContext, ReportSelection};
pub use session::Session;
pub use summary::{GroupKey, Summary, SummaryOutput, SummarySpec, summarize};
