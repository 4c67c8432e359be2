//! Input parsing and case-record tables.

mod parser;
mod source;
mod value;

pub use parser::{Parser, ParserConfig};
pub use source::{SourceMetadata, Table};
pub use value::{MISSING_MARKERS, Value};
