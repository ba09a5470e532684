// Rendering options, defaults and resolution
use crate::error::ConvertError;
use crate::renderer::escape::escape_field;
use crate::renderer::row_format::Template;
use crate::types::{Dialect, HookResult, NumericPolicy, Row};
use std::fmt;

/// Per-field hook: `(value, row_index, col_index) -> rendered field`.
/// Returning `None` renders an empty field.
pub type ValueFilter = Box<dyn Fn(&str, usize, usize) -> HookResult<Option<String>>>;

/// Per-row hook: `(row, row_index) -> replacement row`. Returning `None` drops the row.
pub type ValuesFilter = Box<dyn Fn(Row, usize) -> HookResult<Option<Row>>>;

/// Custom row builder receiving every filtered field of the row
pub type RowBuilder = Box<dyn Fn(&[String]) -> HookResult<String>>;

/// How a transformed row becomes one rendered string
pub enum RowFormat {
    /// Format string with a single `%s` placeholder for the glued values
    Template(String),
    /// Function composing the output from the full value sequence
    Builder(RowBuilder),
}

impl RowFormat {
    pub fn template(template: impl Into<String>) -> Self {
        RowFormat::Template(template.into())
    }

    pub fn builder<F>(f: F) -> Self
    where
        F: Fn(&[String]) -> HookResult<String> + 'static,
    {
        RowFormat::Builder(Box::new(f))
    }
}

impl fmt::Debug for RowFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFormat::Template(template) => f.debug_tuple("Template").field(template).finish(),
            RowFormat::Builder(_) => f.write_str("Builder(..)"),
        }
    }
}

/// Immutable default values shared by every conversion
#[derive(Debug, Clone, Copy)]
pub struct Defaults {
    pub before: &'static str,
    pub after: &'static str,
    pub statement_after: &'static str,
    pub values_glue: &'static str,
    pub row_format: &'static str,
    pub row_glue: &'static str,
    pub when_empty: &'static str,
}

pub const DEFAULTS: Defaults = Defaults {
    before: "",
    after: "",
    statement_after: ";\n",
    values_glue: ", ",
    row_format: "%s",
    row_glue: "\n",
    when_empty: "",
};

/// Options for the generic row-rendering pipeline.
///
/// Every field is optional; [`RenderOptions::resolve`] fills the missing ones
/// from [`DEFAULTS`] without touching values the caller supplied.
#[derive(Default)]
pub struct RenderOptions {
    pub before: Option<String>,
    pub after: Option<String>,
    pub row_format: Option<RowFormat>,
    pub values_glue: Option<String>,
    pub row_glue: Option<String>,
    pub when_empty: Option<String>,
    pub value_filter: Option<ValueFilter>,
    pub values_filter: Option<ValuesFilter>,
    pub dialect: Option<Dialect>,
    pub numbers: Option<NumericPolicy>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn row_format(mut self, row_format: RowFormat) -> Self {
        self.row_format = Some(row_format);
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

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn numbers(mut self, numbers: NumericPolicy) -> Self {
        self.numbers = Some(numbers);
        self
    }

    /// Fill every absent option with its default and validate the row format
    pub fn resolve(self) -> Result<ResolvedOptions, ConvertError> {
        let row_format = match self
            .row_format
            .unwrap_or_else(|| RowFormat::template(DEFAULTS.row_format))
        {
            RowFormat::Template(template) => ResolvedFormat::Template(Template::parse(&template)?),
            RowFormat::Builder(builder) => ResolvedFormat::Builder(builder),
        };

        let value_filter: ValueFilter = match self.value_filter {
            Some(filter) => filter,
            None => {
                let numbers = self.numbers.unwrap_or_default();
                Box::new(move |value: &str, _row: usize, _col: usize| {
                    Ok(Some(escape_field(value, numbers)))
                })
            }
        };

        Ok(ResolvedOptions {
            before: self.before.unwrap_or_else(|| DEFAULTS.before.to_string()),
            after: self.after.unwrap_or_else(|| DEFAULTS.after.to_string()),
            row_format,
            values_glue: self
                .values_glue
                .unwrap_or_else(|| DEFAULTS.values_glue.to_string()),
            row_glue: self.row_glue.unwrap_or_else(|| DEFAULTS.row_glue.to_string()),
            when_empty: self
                .when_empty
                .unwrap_or_else(|| DEFAULTS.when_empty.to_string()),
            value_filter,
            values_filter: self.values_filter,
            dialect: self.dialect.unwrap_or_default(),
        })
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("before", &self.before)
            .field("after", &self.after)
            .field("row_format", &self.row_format)
            .field("values_glue", &self.values_glue)
            .field("row_glue", &self.row_glue)
            .field("when_empty", &self.when_empty)
            .field("value_filter", &self.value_filter.is_some())
            .field("values_filter", &self.values_filter.is_some())
            .field("dialect", &self.dialect)
            .field("numbers", &self.numbers)
            .finish()
    }
}

/// Row format after validation
pub enum ResolvedFormat {
    Template(Template),
    Builder(RowBuilder),
}

/// Fully resolved options; every field has a value
pub struct ResolvedOptions {
    pub before: String,
    pub after: String,
    pub row_format: ResolvedFormat,
    pub values_glue: String,
    pub row_glue: String,
    pub when_empty: String,
    pub value_filter: ValueFilter,
    pub values_filter: Option<ValuesFilter>,
    pub dialect: Dialect,
}
