//! Row filtering by `column:value` tokens.

use std::fmt;

use tracing::debug;

use crate::error::{CaseGroupsError, Result};
use crate::input::{Table, Value};

/// A parsed `column:value` constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterToken {
    pub column: String,
    pub value: String,
}

impl FilterToken {
    /// Parse a token against the columns of `table`.
    ///
    /// Column names may themselves contain `:`, so the longest column name that
    /// prefixes the token wins. Values may contain `:` freely.
    pub fn parse(token: &str, table: &Table) -> Result<Self> {
        let Some((head, _)) = token.split_once(':') else {
            return Err(CaseGroupsError::MalformedFilter(token.to_string()));
        };

        let column = table
            .columns()
            .filter(|c| {
                token.len() > c.len()
                    && token.starts_with(c)
                    && token.as_bytes()[c.len()] == b':'
            })
            .max_by_key(|c| c.len())
            .ok_or_else(|| CaseGroupsError::unknown_column(head, "filter"))?;

        Ok(Self {
            column: column.to_string(),
            value: token[column.len() + 1..].to_string(),
        })
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column, self.value)
    }
}

/// Keep the rows where, for every token, the cell in the token's column displays
/// as the token's value.
///
/// Tokens combine with AND, so the same column given two different values matches
/// nothing. An empty token list keeps every row.
pub fn filter<S: AsRef<str>>(table: &Table, tokens: &[S]) -> Result<Table> {
    let constraints = tokens
        .iter()
        .map(|token| {
            let parsed = FilterToken::parse(token.as_ref(), table)?;
            let index = table.require_column(&parsed.column, "filter")?;
            Ok((index, parsed.value))
        })
        .collect::<Result<Vec<_>>>()?;

    let filtered = table.retain_rows(|row| {
        constraints.iter().all(|(index, expected)| {
            row.get(*index)
                .and_then(Value::label)
                .is_some_and(|actual| &actual == expected)
        })
    });

    debug!(
        tokens = constraints.len(),
        before = table.row_count(),
        after = filtered.row_count(),
        "filtered rows"
    );

    Ok(filtered)
}

/// Drop rows with a missing value in any group column.
pub fn drop_incomplete_groups<S: AsRef<str>>(table: &Table, group_columns: &[S]) -> Result<Table> {
    let indices = table.require_columns(group_columns, "group")?;
    Ok(table.retain_rows(|row| {
        indices
            .iter()
            .all(|&i| row.get(i).is_some_and(|v| !v.is_missing()))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_strings(
            &["A", "B", "time:of:day"],
            &[
                vec!["x", "y", "10:30"],
                vec!["x", "z", "11:00"],
                vec!["w", "y", "10:30"],
                vec!["", "y", "12:15"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_conjunction() {
        let table = sample();
        let filtered = filter(&table, &["A:x", "B:y"]).unwrap();
        assert_eq!(filtered.row_count(), 1);
    }

    #[test]
    fn test_same_column_twice_matches_nothing() {
        let table = sample();
        let filtered = filter(&table, &["A:x", "A:w"]).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_no_tokens_keeps_everything() {
        let table = sample();
        let tokens: [&str; 0] = [];
        assert_eq!(filter(&table, &tokens).unwrap(), table);
    }

    #[test]
    fn test_colons_in_column_and_value() {
        let table = sample();
        let token = FilterToken::parse("time:of:day:10:30", &table).unwrap();
        assert_eq!(token.column, "time:of:day");
        assert_eq!(token.value, "10:30");
        assert_eq!(filter(&table, &["time:of:day:10:30"]).unwrap().row_count(), 2);
    }

    #[test]
    fn test_unknown_column_fails_fast() {
        let table = sample();
        let err = filter(&table, &["C:x"]).unwrap_err();
        assert!(matches!(
            err,
            CaseGroupsError::UnknownColumn { ref column, .. } if column == "C"
        ));
    }

    #[test]
    fn test_malformed_token() {
        let table = sample();
        assert!(matches!(
            filter(&table, &["A"]),
            Err(CaseGroupsError::MalformedFilter(_))
        ));
    }

    #[test]
    fn test_missing_cells_never_match() {
        let table = sample();
        assert_eq!(filter(&table, &["A:"]).unwrap().row_count(), 0);
    }

    #[test]
    fn test_drop_incomplete_groups() {
        let table = sample();
        assert_eq!(drop_incomplete_groups(&table, &["A"]).unwrap().row_count(), 3);
        assert!(drop_incomplete_groups(&table, &["Q"]).is_err());
    }
}
