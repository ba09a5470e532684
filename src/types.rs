use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One record's ordered field values
pub type Row = Vec<String>;

/// Error type returned by user-supplied hooks
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by user-supplied hooks
pub type HookResult<T> = Result<T, BoxError>;

/// A value to be rendered as an SQL literal
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL `null`
    Null,
    /// Integer, rendered unquoted
    Integer(i64),
    /// Floating point, rendered unquoted
    Float(f64),
    /// Decimal literal kept exactly as it appeared in the input
    Decimal(String),
    /// Text, rendered as a double-quoted escaped string
    Text(String),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// How the default value filter treats CSV fields that look like numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Every non-empty field is a string literal
    #[default]
    QuoteAll,
    /// Plain decimal fields (`42`, `-3.5`) are emitted unquoted
    Detect,
}

/// Tokenizing options for the tabular input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Field delimiter
    pub delimiter: char,
    /// Quote character
    pub quote: char,
    /// Escape character used inside quoted fields, if any
    pub escape: Option<char>,
    /// Whether two consecutive quotes inside a quoted field mean one quote
    pub double_quote: bool,
    /// Lines starting with this character are skipped
    pub comment: Option<char>,
    /// Whether the first record is a header and should be skipped
    pub has_headers: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            escape: None,
            double_quote: true,
            comment: None,
            has_headers: false,
        }
    }
}

/// Primary key locator for update statements: CSV column index and SQL column name.
///
/// Serialized as a `[index, column]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, String)", into = "(usize, String)")]
pub struct PrimaryKey {
    pub index: usize,
    pub column: String,
}

impl PrimaryKey {
    pub fn new(index: usize, column: impl Into<String>) -> Self {
        Self {
            index,
            column: column.into(),
        }
    }
}

impl From<(usize, String)> for PrimaryKey {
    fn from((index, column): (usize, String)) -> Self {
        Self { index, column }
    }
}

impl From<PrimaryKey> for (usize, String) {
    fn from(pk: PrimaryKey) -> Self {
        (pk.index, pk.column)
    }
}

impl Default for PrimaryKey {
    fn default() -> Self {
        Self::new(0, "id")
    }
}

/// A row was shorter than a configured column index
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("column {index} is out of range for a row with {len} fields")]
pub struct ColumnOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Look up `index` in `values`, failing with [`ColumnOutOfRange`].
pub fn column<'a>(values: &'a [String], index: usize) -> Result<&'a str, ColumnOutOfRange> {
    values
        .get(index)
        .map(String::as_str)
        .ok_or(ColumnOutOfRange {
            index,
            len: values.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_value_conversions() {
        assert_eq!(SqlValue::from("a"), SqlValue::Text("a".to_string()));
        assert_eq!(SqlValue::from(7i64), SqlValue::Integer(7));
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(1.5f64)), SqlValue::Float(1.5));
    }

    #[test]
    fn test_dialect_deserializes_partial() {
        let dialect: Dialect = serde_json::from_str(r#"{"delimiter": ";"}"#).unwrap();
        assert_eq!(dialect.delimiter, ';');
        assert_eq!(dialect.quote, '"');
        assert!(!dialect.has_headers);
    }

    #[test]
    fn test_primary_key_is_a_pair() {
        let pk: PrimaryKey = serde_json::from_str(r#"[2, "account_id"]"#).unwrap();
        assert_eq!(pk, PrimaryKey::new(2, "account_id"));
        assert_eq!(serde_json::to_string(&PrimaryKey::default()).unwrap(), r#"[0,"id"]"#);
    }

    #[test]
    fn test_column_lookup() {
        let values = vec!["a".to_string(), "b".to_string()];
        assert_eq!(column(&values, 1), Ok("b"));
        assert_eq!(column(&values, 2), Err(ColumnOutOfRange { index: 2, len: 2 }));
    }
}
