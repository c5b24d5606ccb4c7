use super::{Cache, DefaultResolver, NameResolver, Schema};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,

    resolver: Arc<dyn NameResolver>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            table_name_prefix: None,
            resolver: Arc::new(DefaultResolver),
        }
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Sets the resolver used for table and column names that are not
    /// declared explicitly.
    pub fn resolver(&mut self, resolver: impl NameResolver + 'static) -> &mut Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn build(&self) -> Schema {
        Schema {
            table_name_prefix: self.table_name_prefix.clone(),
            resolver: self.resolver.clone(),
            maps: Cache::new(),
            statements: Cache::new(),
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
