//! Narrative reports over a summary.

mod context;
mod selection;

pub use context::{Report, ReportContext};
pub use selection::ReportSelection;
