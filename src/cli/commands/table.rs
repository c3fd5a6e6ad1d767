//! Format table command implementation
//!
//! Prints a format table as TOML, either the built-in one or a table file
//! after checking it.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::core::format::FormatTable;
use clap::Args;
use std::borrow::Cow;

/// Arguments for the format-table command
#[derive(Args, Debug)]
pub struct FormatTableArgs {
    /// Table file to check and print; the built-in table when omitted
    #[arg(short, long, value_name = "FILE")]
    pub table: Option<String>,
}

impl FormatTableArgs {
    /// Execute the format-table command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let table = match &self.table {
            Some(path) => match FormatTable::from_file(path) {
                Ok(table) => Cow::Owned(table),
                Err(e) => {
                    tracing::error!(error = %e, "Invalid format table");
                    eprintln!("❌ {e}");
                    return Ok(EXIT_CONFIG_ERROR);
                }
            },
            None => Cow::Borrowed(FormatTable::builtin()),
        };

        print!("{}", table.to_toml_string()?);
        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_prints() {
        let args = FormatTableArgs { table: None };
        assert_eq!(args.execute().unwrap(), EXIT_SUCCESS);
    }

    #[test]
    fn test_missing_table_file() {
        let args = FormatTableArgs {
            table: Some("/nonexistent/table.toml".to_string()),
        };
        assert_eq!(args.execute().unwrap(), EXIT_CONFIG_ERROR);
    }
}
