//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use relhub_core::result::AppResult;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items as a table
pub fn print_table<T: Tabled>(items: &[T]) {
    if items.is_empty() {
        println!("No results found.");
    } else {
        println!("{}", Table::new(items));
    }
}

/// Print a serializable value as pretty JSON
///
/// Fails if the value cannot be represented, e.g. a non-UTF-8 path.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use relhub_core::error::ErrorKind;

    #[cfg(unix)]
    #[test]
    fn test_print_json_reports_unrepresentable_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        use std::path::PathBuf;

        let paths = vec![PathBuf::from(OsStr::from_bytes(b"dist/\xffbad"))];
        let err = print_json(&paths).unwrap_err();
        assert!(err.is(ErrorKind::Serialization));
    }

    #[test]
    fn test_print_json_ok() {
        assert!(print_json(&["a.txt", "b.txt"]).is_ok());
    }
}
