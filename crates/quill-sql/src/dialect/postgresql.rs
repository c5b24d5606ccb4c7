use super::{Dialect, SelectParts};
use quill_core::Result;
use std::fmt::Write;

#[derive(Debug, Default, Clone, Copy)]
pub struct PostgreSql;

impl Dialect for PostgreSql {
    fn name(&self) -> &str {
        "postgresql"
    }

    fn delimiters(&self) -> (&str, &str) {
        ("\"", "\"")
    }

    fn select_statement(&self, parts: &SelectParts<'_>) -> Result<String> {
        let mut sql = parts.base()?;

        if parts.is_paged() {
            parts.expect_order()?;
            write!(sql, " limit {} offset {}", parts.fetch, parts.offset)?;
        } else if parts.is_limited() {
            write!(sql, " limit {}", parts.limit)?;
        }

        Ok(sql)
    }

    fn identity_clause(&self, column: &str) -> Result<String> {
        Ok(format!(" returning {column}"))
    }
}
