// Statement-level options, loadable from JSON
use crate::error::ConvertError;
use crate::renderer::{RenderOptions, RowFormat, ValueFilter, ValuesFilter};
use crate::types::{Dialect, HookResult, NumericPolicy, PrimaryKey, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Options for the insert and update statement builders.
///
/// Every field is optional. Absent fields get the builder's defaults; fields
/// that are present are never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatementOptions {
    /// Target table, may include a column list such as `accounts(id, balance)`
    pub table: Option<String>,
    /// Use `insert ignore`
    pub ignore: Option<bool>,
    /// Combine all rows into one multi-row insert
    pub bulk: Option<bool>,
    /// Primary key for update statements
    pub pk: Option<PrimaryKey>,
    pub before: Option<String>,
    pub after: Option<String>,
    /// Row template with one `%s` placeholder
    pub row_format: Option<String>,
    pub values_glue: Option<String>,
    pub row_glue: Option<String>,
    pub when_empty: Option<String>,
    pub dialect: Option<Dialect>,
    pub numbers: Option<NumericPolicy>,
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

impl StatementOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = Some(ignore);
        self
    }

    pub fn bulk(mut self, bulk: bool) -> Self {
        self.bulk = Some(bulk);
        self
    }

    pub fn pk(mut self, index: usize, column: impl Into<String>) -> Self {
        self.pk = Some(PrimaryKey::new(index, column));
        self
    }

    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn row_format(mut self, template: impl Into<String>) -> Self {
        self.row_format = Some(template.into());
        self
    }

    pub fn values_glue(mut self, glue: impl Into<String>) -> Self {
        self.values_glue = Some(glue.into());
        self
    }

    pub fn row_glue(mut self, glue: impl Into<String>) -> Self {
        self.row_glue = Some(glue.into());
        self
    }

    pub fn when_empty(mut self, when_empty: impl Into<String>) -> Self {
        self.when_empty = Some(when_empty.into());
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn numbers(mut self, numbers: NumericPolicy) -> Self {
        self.numbers = Some(numbers);
        self
    }

    /// Fill every absent field from `other`, keeping the values already set
    pub fn merge_missing(&mut self, other: StatementOptions) {
        fill(&mut self.table, other.table);
        fill(&mut self.ignore, other.ignore);
        fill(&mut self.bulk, other.bulk);
        fill(&mut self.pk, other.pk);
        fill(&mut self.before, other.before);
        fill(&mut self.after, other.after);
        fill(&mut self.row_format, other.row_format);
        fill(&mut self.values_glue, other.values_glue);
        fill(&mut self.row_glue, other.row_glue);
        fill(&mut self.when_empty, other.when_empty);
        fill(&mut self.dialect, other.dialect);
        fill(&mut self.numbers, other.numbers);
    }

    /// Convert into pipeline options, attaching the given hooks.
    /// A row format set on `hooks` takes precedence over the template here.
    pub fn into_render_options(self, hooks: RenderHooks) -> RenderOptions {
        RenderOptions {
            before: self.before,
            after: self.after,
            row_format: hooks.row_format.or(self.row_format.map(RowFormat::Template)),
            values_glue: self.values_glue,
            row_glue: self.row_glue,
            when_empty: self.when_empty,
            value_filter: hooks.value_filter,
            values_filter: hooks.values_filter,
            dialect: self.dialect,
            numbers: self.numbers,
        }
    }
}

/// User-supplied hooks for the statement builders
#[derive(Default)]
pub struct RenderHooks {
    pub value_filter: Option<ValueFilter>,
    pub values_filter: Option<ValuesFilter>,
    pub row_format: Option<RowFormat>,
}

impl RenderHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value_filter<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, usize, usize) -> HookResult<Option<String>> + 'static,
    {
        self.value_filter = Some(Box::new(f));
        self
    }

    pub fn values_filter<F>(mut self, f: F) -> Self
    where
        F: Fn(Row, usize) -> HookResult<Option<Row>> + 'static,
    {
        self.values_filter = Some(Box::new(f));
        self
    }

    pub fn row_format(mut self, row_format: RowFormat) -> Self {
        self.row_format = Some(row_format);
        self
    }
}

impl fmt::Debug for RenderHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderHooks")
            .field("value_filter", &self.value_filter.is_some())
            .field("values_filter", &self.values_filter.is_some())
            .field("row_format", &self.row_format)
            .finish()
    }
}
