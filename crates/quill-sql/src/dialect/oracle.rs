use super::{Dialect, SelectParts};
use quill_core::{Error, Result};
use std::fmt::Write;

/// Oracle 12c and later. Parameters are written `:name`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Oracle;

impl Dialect for Oracle {
    fn name(&self) -> &str {
        "oracle"
    }

    fn delimiters(&self) -> (&str, &str) {
        ("\"", "\"")
    }

    fn parameter_prefix(&self) -> &str {
        ":"
    }

    fn select_statement(&self, parts: &SelectParts<'_>) -> Result<String> {
        let mut sql = parts.base()?;

        if parts.is_paged() {
            parts.expect_order()?;
            write!(
                sql,
                " offset {} rows fetch next {} rows only",
                parts.offset, parts.fetch
            )?;
        } else if parts.is_limited() {
            write!(sql, " fetch first {} rows only", parts.limit)?;
        }

        Ok(sql)
    }

    fn identity_clause(&self, _column: &str) -> Result<String> {
        Err(Error::unsupported_feature(
            "identity retrieval is not supported by the oracle dialect",
        ))
    }
}
