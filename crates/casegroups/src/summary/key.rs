//! Keys identifying groups and attribute values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::Value;

/// Values of the group columns for one group, in group-column order.
///
/// Ordering is lexicographic over the display strings, which is also the
/// tie-break order for equally ranked groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(Vec<String>);

impl GroupKey {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Build the key of a row, or `None` if any group column is missing.
    pub fn from_row(row: &[Value], group_indices: &[usize]) -> Option<Self> {
        group_indices
            .iter()
            .map(|&i| row.get(i).and_then(Value::label))
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Parse a key written with `separator` between the values, e.g. `north|web`.
    pub fn parse(text: &str, separator: char) -> Self {
        Self(text.split(separator).map(|v| v.trim().to_string()).collect())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{}", single),
            values => write!(f, "({})", values.join(", ")),
        }
    }
}

/// One distinct value of one aggregate column, rendered as `column:value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeValue {
    pub column: String,
    pub value: String,
}

impl AttributeValue {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column, self.value)
    }
}
