// Converter facade bound to one CSV file
use crate::error::ConvertError;
use crate::renderer::{self, RenderOptions, RenderedDocument};
use crate::statements::insert::insert_render_options;
use crate::statements::options::{RenderHooks, StatementOptions};
use crate::statements::table_name::table_name_from_path;
use crate::statements::update::update_render_options;
use std::path::{Path, PathBuf};

/// Converts one CSV file into SQL scripts.
///
/// The file is read anew by every call, so one converter can produce
/// several scripts.
///
/// ```no_run
/// use csv2sql::{CsvConverter, StatementOptions};
///
/// let converter = CsvConverter::new("account_balances.csv");
/// let sql = converter.to_updates([None, Some("balance")], StatementOptions::new().table("accounts"))?;
/// print!("{}", sql);
/// # Ok::<(), csv2sql::ConvertError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CsvConverter {
    path: PathBuf,
}

impl CsvConverter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Table name used when no `table` option is given
    pub fn default_table(&self) -> String {
        table_name_from_path(&self.path)
    }

    /// Run the generic pipeline over the file
    pub fn render_rows(&self, options: RenderOptions) -> Result<String, ConvertError> {
        renderer::render_rows(&self.path, options)
    }

    /// Run the generic pipeline and return statistics with the document
    pub fn render_document(&self, options: RenderOptions) -> Result<RenderedDocument, ConvertError> {
        renderer::render_document(&self.path, options)
    }

    /// INSERT statements for every row
    pub fn to_inserts(&self, options: StatementOptions) -> Result<String, ConvertError> {
        self.to_inserts_with(options, RenderHooks::new())
            .map(|document| document.sql)
    }

    /// INSERT statements for every row, with custom hooks
    pub fn to_inserts_with(
        &self,
        options: StatementOptions,
        hooks: RenderHooks,
    ) -> Result<RenderedDocument, ConvertError> {
        self.render_document(insert_render_options(&self.path, options, hooks))
    }

    /// UPDATE statements for every row, keyed by the primary key column
    pub fn to_updates<I, S>(&self, set_columns: I, options: StatementOptions) -> Result<String, ConvertError>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.to_updates_with(set_columns, options, RenderHooks::new())
            .map(|document| document.sql)
    }

    /// UPDATE statements for every row, with custom hooks
    pub fn to_updates_with<I, S>(
        &self,
        set_columns: I,
        options: StatementOptions,
        hooks: RenderHooks,
    ) -> Result<RenderedDocument, ConvertError>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let set_columns = set_columns
            .into_iter()
            .map(|column| column.map(Into::into))
            .collect();
        self.render_document(update_render_options(&self.path, set_columns, options, hooks))
    }
}

/// Render INSERT statements for every row of `source`
pub fn build_insert_statements(
    source: impl AsRef<Path>,
    options: StatementOptions,
) -> Result<String, ConvertError> {
    CsvConverter::new(source.as_ref()).to_inserts(options)
}

/// Render UPDATE statements for every row of `source`
pub fn build_update_statements<I, S>(
    source: impl AsRef<Path>,
    set_columns: I,
    options: StatementOptions,
) -> Result<String, ConvertError>
where
    I: IntoIterator<Item = Option<S>>,
    S: Into<String>,
{
    CsvConverter::new(source.as_ref()).to_updates(set_columns, options)
}
