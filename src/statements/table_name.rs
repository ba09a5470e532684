// Default table names derived from input file names
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid non-word pattern"));

/// Derive a table name from the base name of `path`: lowercased, with every
/// character outside `[a-z0-9_]` replaced by `_`. The extension is kept, so
/// `Account Balances.csv` becomes `account_balances_csv`.
pub fn table_name_from_path(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    sanitize_table_name(&base)
}

/// Lowercase `name` and replace non-word characters with `_`
pub fn sanitize_table_name(name: &str) -> String {
    NON_WORD.replace_all(&name.to_lowercase(), "_").into_owned()
}
