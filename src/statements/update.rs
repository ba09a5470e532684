// UPDATE statement builder
use crate::renderer::{RenderOptions, RowFormat, DEFAULTS};
use crate::statements::options::{RenderHooks, StatementOptions};
use crate::statements::table_name::table_name_from_path;
use crate::types::{column, HookResult};
use std::path::Path;
use tracing::debug;

/// Pipeline options producing one UPDATE statement per row of `source`.
///
/// `set_columns` is aligned with the CSV columns: `None` leaves column `i`
/// out of the SET clause, `Some(name)` assigns it to SQL column `name`. The
/// primary key column (default `0` / `id`) goes into the WHERE clause.
pub fn update_render_options(
    source: &Path,
    set_columns: Vec<Option<String>>,
    mut options: StatementOptions,
    hooks: RenderHooks,
) -> RenderOptions {
    let table = options
        .table
        .take()
        .unwrap_or_else(|| table_name_from_path(source));
    let pk = options.pk.take().unwrap_or_default();
    debug!(table = %table, pk_index = pk.index, pk_column = %pk.column, "Building update statements");

    let mut render = options.into_render_options(hooks);
    render.row_format.get_or_insert_with(|| {
        RowFormat::builder(move |values: &[String]| -> HookResult<String> {
            let mut assignments = Vec::with_capacity(set_columns.len());
            for (index, set_column) in set_columns.iter().enumerate() {
                if let Some(name) = set_column {
                    assignments.push(format!("{} = {}", name, column(values, index)?));
                }
            }
            Ok(format!(
                "update {} set {} where {} = {}",
                table,
                assignments.join(", "),
                pk.column,
                column(values, pk.index)?
            ))
        })
    });
    render.row_glue.get_or_insert_with(|| ";\n".to_string());
    render
        .after
        .get_or_insert_with(|| DEFAULTS.statement_after.to_string());
    render
}
