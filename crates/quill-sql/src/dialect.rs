mod ansi;
pub use ansi::Ansi;

mod mysql;
pub use mysql::MySql;

mod oracle;
pub use oracle::Oracle;

mod postgresql;
pub use postgresql::PostgreSql;

mod sqlite;
pub use sqlite::Sqlite;

mod sqlserver;
pub use sqlserver::{SqlServer, SqlServer2012};

use quill_core::stmt::Value;
use quill_core::{Error, Result};
use std::fmt::{self, Write};

/// One database engine's SQL syntax.
///
/// Dialects are immutable and carry no per-call state; a single instance can
/// be shared by any number of concurrent compilations. Every builder and the
/// expression compiler take the dialect as an explicit argument.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Provider identifier, used as part of statement cache keys.
    fn name(&self) -> &str;

    /// Left and right identifier delimiters.
    fn delimiters(&self) -> (&str, &str);

    /// Marker placed before parameter names.
    fn parameter_prefix(&self) -> &str {
        "@"
    }

    /// Separator between statements of a batch.
    fn statement_separator(&self) -> &str {
        ";\n"
    }

    /// Wraps each dot-separated segment of `ident` in the dialect's
    /// delimiters. Segments that are already delimited are kept as they are.
    fn escape_identifier(&self, ident: &str) -> String {
        let (left, right) = self.delimiters();
        let mut ret = String::with_capacity(ident.len() + 4);

        for (i, segment) in ident.split('.').enumerate() {
            if i > 0 {
                ret.push('.');
            }

            if segment.starts_with(left) && segment.ends_with(right) && segment.len() > 1 {
                ret.push_str(segment);
            } else {
                ret.push_str(left);
                ret.push_str(segment);
                ret.push_str(right);
            }
        }

        ret
    }

    /// Placeholder for the parameter `name`.
    fn parameter(&self, name: &str) -> String {
        format!("{}{name}", self.parameter_prefix())
    }

    /// Renders `value` as an inline SQL literal.
    fn format_literal(&self, value: &Value) -> Result<String> {
        format_literal(value)
    }

    /// Renders a complete select statement.
    fn select_statement(&self, parts: &SelectParts<'_>) -> Result<String>;

    /// Clause appended to an insert to read back the identity value of the
    /// inserted row. `column` is the escaped identity column.
    fn identity_clause(&self, column: &str) -> Result<String>;
}

/// The clauses of a select statement, already rendered.
///
/// Counts of zero mean "not requested". Paging applies when either `offset`
/// or `fetch` is nonzero and then takes precedence over `limit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectParts<'a> {
    pub selection: &'a str,
    pub source: &'a str,
    pub conditions: Option<&'a str>,
    pub order: Option<&'a str>,
    pub grouping: Option<&'a str>,
    pub limit: usize,
    pub offset: usize,
    pub fetch: usize,
}

impl SelectParts<'_> {
    pub fn is_paged(&self) -> bool {
        self.offset != 0 || self.fetch != 0
    }

    pub fn is_limited(&self) -> bool {
        self.limit != 0 && !self.is_paged()
    }

    /// Order clause, required for paging.
    pub fn expect_order(&self) -> Result<&str> {
        self.order
            .ok_or_else(|| Error::invalid_statement("paging requires an order by clause"))
    }

    /// `where`, `group by` and `order by`, each with a leading space.
    pub(crate) fn write_clauses(&self, dst: &mut String, order: bool) -> fmt::Result {
        if let Some(conditions) = self.conditions {
            write!(dst, " where {conditions}")?;
        }

        if let Some(grouping) = self.grouping {
            write!(dst, " group by {grouping}")?;
        }

        if let (true, Some(order)) = (order, self.order) {
            write!(dst, " order by {order}")?;
        }

        Ok(())
    }

    /// `select <selection> from <source>` plus every clause.
    pub(crate) fn base(&self) -> Result<String> {
        let mut dst = format!("select {} from {}", self.selection, self.source);
        self.write_clauses(&mut dst, true)?;
        Ok(dst)
    }
}

/// Literal rendering shared by the built-in dialects.
pub fn format_literal(value: &Value) -> Result<String> {
    Ok(match value {
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::F64(v) => format!("{v:?}"),
        Value::I32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::Null => "null".to_string(),
        Value::String(v) => format!("'{}'", v.replace('\'', "''")),
        Value::Enum(_) | Value::List(_) | Value::Record(_) => {
            return Err(Error::unsupported_feature(format!(
                "{value} cannot be written as a SQL literal"
            )))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_each_segment() {
        let dialect = SqlServer;
        assert_eq!(dialect.escape_identifier("dbo.Person"), "[dbo].[Person]");
        assert_eq!(dialect.escape_identifier("[dbo].Person"), "[dbo].[Person]");
        assert_eq!(dialect.escape_identifier("[Person]"), "[Person]");
        assert_eq!(Sqlite.escape_identifier("id"), "\"id\"");
        assert_eq!(MySql.escape_identifier("a.b"), "`a`.`b`");
    }

    #[test]
    fn literals() {
        assert_eq!(format_literal(&Value::from("it's")).unwrap(), "'it''s'");
        assert_eq!(format_literal(&Value::Bool(true)).unwrap(), "1");
        assert_eq!(format_literal(&Value::I32(-3)).unwrap(), "-3");
        assert!(format_literal(&Value::List(vec![]))
            .unwrap_err()
            .is_unsupported_feature());
    }

    #[test]
    fn parameter_prefix() {
        assert_eq!(Sqlite.parameter("p0"), "@p0");
        assert_eq!(Oracle.parameter("p0"), ":p0");
    }
}
