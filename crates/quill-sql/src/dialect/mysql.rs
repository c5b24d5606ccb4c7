use super::{sqlite::limit_comma, Dialect, SelectParts};
use quill_core::Result;

/// MySQL and MariaDB.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &str {
        "mysql"
    }

    fn delimiters(&self) -> (&str, &str) {
        ("`", "`")
    }

    fn select_statement(&self, parts: &SelectParts<'_>) -> Result<String> {
        limit_comma(parts)
    }

    fn identity_clause(&self, _column: &str) -> Result<String> {
        Ok("; select last_insert_id()".to_string())
    }
}
