// INSERT statement builder
use crate::renderer::{escape_template_literal, RenderOptions, RowFormat, DEFAULTS};
use crate::statements::options::{RenderHooks, StatementOptions};
use crate::statements::table_name::table_name_from_path;
use std::path::Path;
use tracing::debug;

/// Pipeline options producing INSERT statements for the rows of `source`.
///
/// Bulk mode renders a single `insert into <table> values(...),\n(...);`
/// statement; otherwise every row becomes its own statement.
pub fn insert_render_options(
    source: &Path,
    mut options: StatementOptions,
    hooks: RenderHooks,
) -> RenderOptions {
    let table = options
        .table
        .take()
        .unwrap_or_else(|| table_name_from_path(source));
    let verb = if options.ignore.unwrap_or(false) {
        "insert ignore"
    } else {
        "insert"
    };
    let bulk = options.bulk.unwrap_or(false);
    debug!(table = %table, verb, bulk, "Building insert statements");

    let mut render = options.into_render_options(hooks);
    if bulk {
        let before = render.before.take().unwrap_or_default();
        render.before = Some(format!("{}{} into {} values", before, verb, table));
        render.row_format.get_or_insert_with(|| RowFormat::template("(%s)"));
        render.row_glue.get_or_insert_with(|| ",\n".to_string());
    } else {
        render.row_format.get_or_insert_with(|| {
            RowFormat::template(format!(
                "{} into {} values(%s)",
                verb,
                escape_template_literal(&table)
            ))
        });
        render.row_glue.get_or_insert_with(|| ";\n".to_string());
    }
    render
        .after
        .get_or_insert_with(|| DEFAULTS.statement_after.to_string());
    render
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_of(render: &RenderOptions) -> &str {
        match &render.row_format {
            Some(RowFormat::Template(template)) => template,
            other => panic!("expected template, got {:?}", other),
        }
    }

    #[test]
    fn test_non_bulk_defaults() {
        let render = insert_render_options(
            Path::new("data/users.csv"),
            StatementOptions::new(),
            RenderHooks::new(),
        );

        assert_eq!(template_of(&render), "insert into users_csv values(%s)");
        assert_eq!(render.row_glue.as_deref(), Some(";\n"));
        assert_eq!(render.after.as_deref(), Some(";\n"));
        assert_eq!(render.before, None);
    }

    #[test]
    fn test_bulk_defaults() {
        let render = insert_render_options(
            Path::new("users.csv"),
            StatementOptions::new().table("users").bulk(true).ignore(true),
            RenderHooks::new(),
        );

        assert_eq!(render.before.as_deref(), Some("insert ignore into users values"));
        assert_eq!(template_of(&render), "(%s)");
        assert_eq!(render.row_glue.as_deref(), Some(",\n"));
        assert_eq!(render.after.as_deref(), Some(";\n"));
    }

    #[test]
    fn test_bulk_keeps_caller_before() {
        let render = insert_render_options(
            Path::new("users.csv"),
            StatementOptions::new()
                .table("users")
                .bulk(true)
                .before("start transaction;\n")
                .after(";\ncommit;\n"),
            RenderHooks::new(),
        );

        assert_eq!(
            render.before.as_deref(),
            Some("start transaction;\ninsert into users values")
        );
        assert_eq!(render.after.as_deref(), Some(";\ncommit;\n"));
    }

    #[test]
    fn test_caller_row_format_is_kept() {
        let render = insert_render_options(
            Path::new("users.csv"),
            StatementOptions::new().row_format("replace into users values(%s)"),
            RenderHooks::new(),
        );

        assert_eq!(template_of(&render), "replace into users values(%s)");
    }

    #[test]
    fn test_percent_in_table_name_is_escaped() {
        let render = insert_render_options(
            Path::new("x.csv"),
            StatementOptions::new().table("odd%table"),
            RenderHooks::new(),
        );

        assert_eq!(template_of(&render), "insert into odd%%table values(%s)");
    }
}
