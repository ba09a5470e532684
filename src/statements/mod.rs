// Statement builders for INSERT and UPDATE scripts
pub mod converter;
pub mod insert;
pub mod options;
pub mod table_name;
pub mod update;

// Re-export main types and functions
pub use converter::{build_insert_statements, build_update_statements, CsvConverter};
pub use insert::insert_render_options;
pub use options::{RenderHooks, StatementOptions};
pub use table_name::{sanitize_table_name, table_name_from_path};
pub use update::update_render_options;

#[cfg(test)]
mod tests;
