// SQL literal escaping for field values
use crate::types::{NumericPolicy, SqlValue};
use once_cell::sync::Lazy;
use regex::Regex;

static PLAIN_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("valid decimal pattern"));

/// Render a value as an SQL literal.
///
/// Null becomes `null`, numbers are written unquoted and everything else is
/// wrapped in double quotes with backslashes and quotes escaped.
pub fn escape(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "null".to_string(),
        SqlValue::Integer(n) => n.to_string(),
        SqlValue::Float(f) if f.is_finite() => f.to_string(),
        SqlValue::Float(_) => "null".to_string(),
        SqlValue::Decimal(d) => d.clone(),
        SqlValue::Text(s) if s.is_empty() => "null".to_string(),
        SqlValue::Text(s) => quote(s),
    }
}

/// Classify a raw CSV field: empty is null, plain decimals are kept verbatim
/// under [`NumericPolicy::Detect`], everything else is text.
pub fn classify_field(raw: &str, numbers: NumericPolicy) -> SqlValue {
    if raw.is_empty() {
        SqlValue::Null
    } else if numbers == NumericPolicy::Detect && is_plain_decimal(raw) {
        SqlValue::Decimal(raw.to_string())
    } else {
        SqlValue::Text(raw.to_string())
    }
}

/// Render a raw CSV field as an SQL literal under the given numeric policy.
pub fn escape_field(raw: &str, numbers: NumericPolicy) -> String {
    escape(&classify_field(raw, numbers))
}

/// Whether `raw` is an optionally negative integer or decimal with no exponent
pub fn is_plain_decimal(raw: &str) -> bool {
    PLAIN_DECIMAL.is_match(raw)
}

// Backslashes must be doubled before quotes are escaped.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    out.push_str(&s.replace('\\', "\\\\").replace('"', "\\\""));
    out.push('"');
    out
}

/// Reverse [`escape_field`] for a quoted literal. Returns `None` for
/// anything that is not a double-quoted string literal.
pub fn unquote(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(chars.next()?);
        } else {
            out.push(c);
        }
    }
    Some(out)
}
