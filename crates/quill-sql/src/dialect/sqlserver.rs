use super::{Dialect, SelectParts};
use quill_core::{Error, Result};
use std::fmt::Write;

/// SQL Server 2005 and 2008.
///
/// Limits with `top(n)` and pages by numbering rows with `row_number()` in a
/// derived table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServer;

/// SQL Server 2012 and later, paging with `offset .. fetch next`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServer2012;

impl Dialect for SqlServer {
    fn name(&self) -> &str {
        "sqlserver"
    }

    fn delimiters(&self) -> (&str, &str) {
        ("[", "]")
    }

    fn select_statement(&self, parts: &SelectParts<'_>) -> Result<String> {
        if !parts.is_paged() {
            return select_top(parts);
        }

        let order = parts.expect_order()?;
        let (Some(first), Some(last)) = (
            parts.offset.checked_add(1),
            parts.offset.checked_add(parts.fetch),
        ) else {
            return Err(Error::invalid_statement(
                "page window exceeds the row number range",
            ));
        };

        let mut sql = format!(
            "select * from (select row_number() over (order by {order}) as [__row], {} from {}",
            parts.selection, parts.source
        );
        parts.write_clauses(&mut sql, false)?;
        write!(
            sql,
            ") as [__paged] where [__row] between {} and {}",
            first, last
        )?;

        Ok(sql)
    }

    fn identity_clause(&self, _column: &str) -> Result<String> {
        Ok("; select scope_identity()".to_string())
    }
}

impl Dialect for SqlServer2012 {
    fn name(&self) -> &str {
        "sqlserver2012"
    }

    fn delimiters(&self) -> (&str, &str) {
        ("[", "]")
    }

    fn select_statement(&self, parts: &SelectParts<'_>) -> Result<String> {
        if !parts.is_paged() {
            return select_top(parts);
        }

        parts.expect_order()?;
        let mut sql = parts.base()?;
        write!(
            sql,
            " offset {} rows fetch next {} rows only",
            parts.offset, parts.fetch
        )?;

        Ok(sql)
    }

    fn identity_clause(&self, _column: &str) -> Result<String> {
        Ok("; select scope_identity()".to_string())
    }
}

fn select_top(parts: &SelectParts<'_>) -> Result<String> {
    if !parts.is_limited() {
        return parts.base();
    }

    let mut sql = format!(
        "select top({}) {} from {}",
        parts.limit, parts.selection, parts.source
    );
    parts.write_clauses(&mut sql, true)?;
    Ok(sql)
}
