//! Convert CSV files into SQL insert and update scripts.
//!
//! Rows are streamed from the input, passed through optional row and value
//! hooks, rendered through a template or a row builder and joined into a
//! single script.
//!
//! A value filter can build typed [`SqlValue`]s and render them with
//! [`renderer::escape`]:
//!
//! ```
//! use csv2sql::renderer::escape;
//! use csv2sql::{RenderOptions, SqlValue};
//!
//! let options = RenderOptions::new().value_filter(|value, _, col| {
//!     let typed = if col == 0 {
//!         SqlValue::from(value.parse::<i64>().ok())
//!     } else {
//!         SqlValue::from(value)
//!     };
//!     Ok(Some(escape(&typed)))
//! });
//! # let _ = options;
//! ```
pub mod error;
pub mod types;
pub mod row_source;
pub mod renderer;
pub mod statements;

pub use error::ConvertError;
pub use renderer::{render_document, render_rows, RenderOptions, RenderStatistics, RenderedDocument, RowFormat};
pub use row_source::RowSource;
pub use statements::{
    build_insert_statements, build_update_statements, CsvConverter, RenderHooks, StatementOptions,
};
pub use types::{Dialect, NumericPolicy, PrimaryKey, Row, SqlValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
