use super::{Dialect, SelectParts};
use quill_core::Result;
use std::fmt::Write;

#[derive(Debug, Default, Clone, Copy)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn delimiters(&self) -> (&str, &str) {
        ("\"", "\"")
    }

    fn select_statement(&self, parts: &SelectParts<'_>) -> Result<String> {
        limit_comma(parts)
    }

    fn identity_clause(&self, _column: &str) -> Result<String> {
        Ok("; select last_insert_rowid()".to_string())
    }
}

/// `limit n` and `limit offset, fetch`, shared with MySQL.
pub(super) fn limit_comma(parts: &SelectParts<'_>) -> Result<String> {
    let mut sql = parts.base()?;

    if parts.is_paged() {
        parts.expect_order()?;
        write!(sql, " limit {}, {}", parts.offset, parts.fetch)?;
    } else if parts.is_limited() {
        write!(sql, " limit {}", parts.limit)?;
    }

    Ok(sql)
}
