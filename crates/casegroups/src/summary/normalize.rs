//! Repair of integer columns that were widened to floating point.

use tracing::debug;

use crate::input::{Table, Value};

/// Rewrite every column whose non-missing values are all integral numbers into an
/// integer column, keeping missing cells missing.
///
/// Columns holding any text, any non-integral number, or no numbers at all are
/// returned unchanged. Never fails.
pub fn normalize(table: &Table) -> Table {
    let mut normalized = table.clone();

    for (index, name) in table.columns().enumerate() {
        if !is_integral_column(table, index) {
            continue;
        }

        normalized.map_column(index, |value| match value.as_integral() {
            Some(n) => Value::Integer(n),
            None => value.clone(),
        });

        debug!(column = name, "normalized float column to integers");
    }

    normalized
}

/// True when the column has at least one float and every non-missing value is an
/// integral number.
fn is_integral_column(table: &Table, index: usize) -> bool {
    let mut has_float = false;
    for value in table.column_values(index) {
        match value {
            Value::Missing | Value::Integer(_) => {}
            Value::Float(_) if value.as_integral().is_some() => has_float = true,
            Value::Float(_) | Value::Text(_) => return false,
        }
    }
    has_float
}
