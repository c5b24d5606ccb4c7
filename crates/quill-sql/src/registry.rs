use crate::dialect::{Ansi, Dialect, MySql, Oracle, PostgreSql, SqlServer, SqlServer2012, Sqlite};
use indexmap::IndexMap;
use quill_core::{err, Error, Result};
use std::sync::Arc;
use url::Url;

/// Maps provider identifiers to dialects.
///
/// A new registry knows every built-in dialect. Identifiers are matched
/// case-insensitively.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    dialects: IndexMap<String, Arc<dyn Dialect>>,
}

impl DialectRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register("ansi", Ansi);
        registry.register("sqlserver", SqlServer);
        registry.register("mssql", SqlServer);
        registry.register("sqlserver2012", SqlServer2012);
        registry.register("sqlite", Sqlite);
        registry.register("mysql", MySql);
        registry.register("mariadb", MySql);
        registry.register("postgresql", PostgreSql);
        registry.register("postgres", PostgreSql);
        registry.register("oracle", Oracle);

        registry
    }

    /// A registry with no dialects.
    pub fn empty() -> Self {
        Self {
            dialects: IndexMap::new(),
        }
    }

    /// Registers `dialect` under `id`, replacing any previous registration.
    pub fn register(&mut self, id: &str, dialect: impl Dialect + 'static) -> &mut Self {
        self.register_arc(id, Arc::new(dialect))
    }

    pub fn register_arc(&mut self, id: &str, dialect: Arc<dyn Dialect>) -> &mut Self {
        tracing::debug!(id, dialect = dialect.name(), "registered dialect");
        self.dialects.insert(id.to_ascii_lowercase(), dialect);
        self
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Dialect>> {
        self.dialects.get(&id.to_ascii_lowercase()).cloned()
    }

    /// Like [`get`](Self::get), failing for unknown identifiers.
    pub fn expect(&self, id: &str) -> Result<Arc<dyn Dialect>> {
        self.get(id)
            .ok_or_else(|| Error::unsupported_feature(format!("no dialect registered for `{id}`")))
    }

    /// Resolves the dialect for a connection URL by its scheme, so
    /// `postgres://localhost/app` selects PostgreSQL.
    pub fn for_url(&self, url: &str) -> Result<Arc<dyn Dialect>> {
        let parsed = Url::parse(url).map_err(|e| {
            Error::from(anyhow::Error::from(e)).context(err!("invalid connection url `{url}`"))
        })?;

        self.expect(parsed.scheme())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.dialects.keys().map(String::as_str)
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_ins_are_seeded() {
        let registry = DialectRegistry::new();
        assert_eq!(registry.expect("MSSQL").unwrap().name(), "sqlserver");
        assert_eq!(registry.expect("postgres").unwrap().name(), "postgresql");
        assert!(registry.get("db2").is_none());
        assert!(registry.expect("db2").unwrap_err().is_unsupported_feature());
    }

    #[test]
    fn resolves_urls_by_scheme() {
        let registry = DialectRegistry::new();
        assert_eq!(
            registry.for_url("sqlite://data.db").unwrap().name(),
            "sqlite"
        );
        assert_eq!(
            registry.for_url("mysql://root@localhost/app").unwrap().name(),
            "mysql"
        );
        assert!(registry.for_url("not a url").is_err());
    }

    #[test]
    fn user_dialects_override() {
        let mut registry = DialectRegistry::empty();
        registry.register("sqlite", PostgreSql);
        assert_eq!(registry.expect("sqlite").unwrap().name(), "postgresql");
        assert_eq!(registry.ids().collect::<Vec<_>>(), ["sqlite"]);
    }
}
