use super::*;
use crate::error::ConvertError;
use crate::renderer::RowFormat;
use crate::types::{Dialect, NumericPolicy};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_csv(temp_dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

#[test]
fn test_inserts_quote_all_fields_by_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "users.csv", "1,alice\n2,bob\n");

    let sql = CsvConverter::new(&path)
        .to_inserts(StatementOptions::new().table("users"))
        .unwrap();

    assert_eq!(
        sql,
        "insert into users values(\"1\", \"alice\");\ninsert into users values(\"2\", \"bob\");\n"
    );
}

#[test]
fn test_inserts_use_file_name_as_default_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "Daily-Users.csv", "1\n");
    let converter = CsvConverter::new(&path);

    let sql = converter.to_inserts(StatementOptions::new()).unwrap();

    assert_eq!(converter.default_table(), "daily_users_csv");
    assert_eq!(sql, "insert into daily_users_csv values(\"1\");\n");
}

#[test]
fn test_bulk_insert_is_one_statement() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "users.csv", "1,alice\n2,bob\n3,\n");

    let sql = CsvConverter::new(&path)
        .to_inserts(
            StatementOptions::new()
                .table("users")
                .bulk(true)
                .numbers(NumericPolicy::Detect),
        )
        .unwrap();

    assert_eq!(
        sql,
        "insert into users values(1, \"alice\"),\n(2, \"bob\"),\n(3, null);\n"
    );
}

#[test]
fn test_insert_ignore_variant() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "users.csv", "1\n");

    let sql = CsvConverter::new(&path)
        .to_inserts(StatementOptions::new().table("users").ignore(true))
        .unwrap();

    assert_eq!(sql, "insert ignore into users values(\"1\");\n");
}

#[test]
fn test_inserts_with_transaction_wrapping() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "users.csv", "1\n2\n");

    let sql = CsvConverter::new(&path)
        .to_inserts(
            StatementOptions::new()
                .table("users")
                .before("start transaction;\n")
                .after(";\ncommit;\n"),
        )
        .unwrap();

    assert_eq!(
        sql,
        "start transaction;\ninsert into users values(\"1\");\ninsert into users values(\"2\");\ncommit;\n"
    );
}

#[test]
fn test_inserts_on_empty_file_use_when_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "users.csv", "");

    let converter = CsvConverter::new(&path);
    let default = converter.to_inserts(StatementOptions::new().bulk(true)).unwrap();
    let custom = converter
        .to_inserts(StatementOptions::new().when_empty("-- nothing to insert\n"))
        .unwrap();

    assert_eq!(default, "");
    assert_eq!(custom, "-- nothing to insert\n");
}

#[test]
fn test_inserts_with_hooks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "users.csv", "id,name\n1,alice\n2,bob\n3,carol\n");

    let document = CsvConverter::new(&path)
        .to_inserts_with(
            StatementOptions::new().table("users(id, name)"),
            RenderHooks::new()
                .values_filter(|row, index| Ok(if index == 0 || row[1] == "bob" { None } else { Some(row) }))
                .value_filter(|value, _, col| {
                    Ok(Some(if col == 0 { value.to_string() } else { format!("upper(\"{}\")", value) }))
                }),
        )
        .unwrap();

    assert_eq!(
        document.sql,
        "insert into users(id, name) values(1, upper(\"alice\"));\ninsert into users(id, name) values(3, upper(\"carol\"));\n"
    );
    assert_eq!(document.statistics.rows_read, 4);
    assert_eq!(document.statistics.rows_dropped, 2);
    assert_eq!(document.statistics.rows_rendered, 2);
}

#[test]
fn test_updates_with_detected_numbers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "balances.csv", "42,100.5\n43,\n");

    let sql = build_update_statements(
        &path,
        [None, Some("balance")],
        StatementOptions::new()
            .table("accounts")
            .numbers(NumericPolicy::Detect),
    )
    .unwrap();

    assert_eq!(
        sql,
        "update accounts set balance = 100.5 where id = 42;\nupdate accounts set balance = null where id = 43;\n"
    );
}

#[test]
fn test_updates_quote_by_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "balances.csv", "42,100.5\n");

    let sql = build_update_statements(&path, [None, Some("balance")], StatementOptions::new()).unwrap();

    assert_eq!(
        sql,
        "update balances_csv set balance = \"100.5\" where id = \"42\";\n"
    );
}

#[test]
fn test_updates_pk_out_of_range_reports_row() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "balances.csv", "42,100.5,x\n43,7\n");

    let result = CsvConverter::new(&path).to_updates(
        [None, Some("balance")],
        StatementOptions::new().pk(2, "code"),
    );

    match result {
        Err(ConvertError::Configuration { row, message }) => {
            assert_eq!(row, Some(1));
            assert!(message.contains("column 2"));
        }
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_updates_set_column_out_of_range() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "balances.csv", "42\n");

    let result = CsvConverter::new(&path).to_updates(
        [None, Some("balance")],
        StatementOptions::new(),
    );

    assert!(matches!(result, Err(ConvertError::Configuration { row: Some(0), .. })));
}

#[test]
fn test_updates_with_custom_row_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "balances.csv", "42,100.5\n");

    let document = CsvConverter::new(&path)
        .to_updates_with(
            [None, Some("balance")],
            StatementOptions::new(),
            RenderHooks::new().row_format(RowFormat::builder(|values| Ok(format!("-- {}", values.join(" "))))),
        )
        .unwrap();

    assert_eq!(document.sql, "-- \"42\" \"100.5\";\n");
}

#[test]
fn test_semicolon_dialect_with_headers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "prices.csv", "sku;price\nA-1;9.99\n");

    let sql = build_insert_statements(
        &path,
        StatementOptions::new()
            .table("prices")
            .dialect(Dialect {
                delimiter: ';',
                has_headers: true,
                ..Default::default()
            })
            .numbers(NumericPolicy::Detect),
    )
    .unwrap();

    assert_eq!(sql, "insert into prices values(\"A-1\", 9.99);\n");
}

#[test]
fn test_missing_file_is_resource_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let result = build_insert_statements(temp_dir.path().join("nope.csv"), StatementOptions::new());

    assert!(matches!(result, Err(ConvertError::Resource { .. })));
}

#[test]
fn test_updates_without_set_columns_still_render() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "balances.csv", "42,1\n");

    let sql = build_update_statements(&path, Vec::<Option<&str>>::new(), StatementOptions::new().table("t"))
        .unwrap();

    assert_eq!(sql, "update t set  where id = \"42\";\n");
}

#[test]
fn test_updates_on_empty_file_use_when_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "balances.csv", "");

    let sql = build_update_statements(
        &path,
        Vec::<Option<&str>>::new(),
        StatementOptions::new().table("t").when_empty("EMPTY"),
    )
    .unwrap();

    assert_eq!(sql, "EMPTY");
}

#[test]
fn test_unclosed_quote_fails_instead_of_merging_rows() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_csv(&temp_dir, "broken.csv", "1,\"abc\n2,def\n");

    let result = build_insert_statements(&path, StatementOptions::new().table("t"));

    assert!(matches!(result, Err(ConvertError::Parse { record: 1, .. })));
}

#[test]
fn test_directory_input_is_resource_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let result = build_insert_statements(temp_dir.path(), StatementOptions::new().table("t"));

    assert!(matches!(result, Err(ConvertError::Resource { .. })));
}
