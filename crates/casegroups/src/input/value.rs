//! Typed cell values.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

// Integers keep their text form only when it round-trips; "007" stays text.
static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?(0|[1-9]\d*)$").unwrap());

static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.\d*|\.\d+|\d+(\.\d*)?[eE][+-]?\d+)$").unwrap()
});

/// Cell contents treated as missing when loading data.
pub const MISSING_MARKERS: &[&str] = &[
    "", "<NA>", "nan", "NaN", "None", "none", "NULL", "null",
];

/// A single scalar cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value.
    #[default]
    Missing,
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Anything else.
    Text(String),
}

impl Value {
    /// Type a raw cell as read from a delimited file.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if Self::is_missing_marker(trimmed) {
            return Value::Missing;
        }

        if INTEGER_PATTERN.is_match(trimmed) {
            if let Ok(n) = trimmed.parse::<i64>() {
                return Value::Integer(n);
            }
        }

        if INTEGER_PATTERN.is_match(trimmed) || FLOAT_PATTERN.is_match(trimmed) {
            if let Ok(f) = trimmed.parse::<f64>() {
                if f.is_finite() {
                    return Value::Float(f);
                }
            }
        }

        Value::Text(raw.to_string())
    }

    /// Check if a raw string represents a missing value.
    pub fn is_missing_marker(value: &str) -> bool {
        let trimmed = value.trim();
        MISSING_MARKERS.contains(&trimmed)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The integer this value represents exactly, if any.
    pub fn as_integral(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
            _ => None,
        }
    }

    /// Display form, or `None` for missing values.
    pub fn label(&self) -> Option<String> {
        match self {
            Value::Missing => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(raw: &str) -> Self {
        Value::parse(raw)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}
