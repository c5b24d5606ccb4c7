mod builder;
pub use builder::Builder;

mod cache;
use cache::Cache;

mod model;
pub use model::Model;

mod model_builder;
pub use model_builder::{FieldBuilder, ModelBuilder};

mod name;
pub use name::{DefaultResolver, NameResolver, SnakeCaseResolver};

mod object_map;
pub use object_map::ObjectMap;

mod property_map;
pub use property_map::PropertyMap;

mod value_map;
pub use value_map::ValueMap;

mod verify;

use crate::Result;
use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Mapping configuration plus the caches derived from it.
///
/// A `Schema` owns the object maps built for every mapped type it has seen and
/// the SQL text of the canonical statements compiled against those maps. Both
/// caches are populated lazily and never evicted. Most programs use
/// [`Schema::global`]; build an independent instance with [`Schema::builder`]
/// to change table naming.
pub struct Schema {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,

    /// Derives table and column names not given explicitly
    resolver: Arc<dyn NameResolver>,

    maps: Cache<TypeId, Arc<ObjectMap>>,

    statements: Cache<StatementKey, Arc<str>>,
}

/// Identifies a cached statement text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatementKey {
    pub kind: StatementKind,

    /// Name of the dialect the text was rendered for
    pub dialect: String,

    pub model: TypeId,
}

/// The statement shapes whose text depends only on the model and dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Insert,
    UpdateByKey,
    DeleteByKey,
    SelectByKey,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The process-wide schema with default naming.
    pub fn global() -> &'static Schema {
        static GLOBAL: OnceLock<Schema> = OnceLock::new();
        GLOBAL.get_or_init(|| Builder::new().build())
    }

    pub fn table_name_prefix(&self) -> Option<&str> {
        self.table_name_prefix.as_deref()
    }

    pub fn resolver(&self) -> &dyn NameResolver {
        &*self.resolver
    }

    /// Returns the object map for `M`, building it on first use.
    ///
    /// Concurrent first calls for the same type build exactly one map; every
    /// caller receives the same instance.
    pub fn map_for<M: Model>(&self) -> Result<Arc<ObjectMap>> {
        self.maps.get_or_try_insert_with(TypeId::of::<M>(), || {
            let map = ObjectMap::build::<M>(self)?;

            tracing::debug!(
                model = %map.name,
                table = %map.table,
                properties = map.properties.len(),
                "built object map"
            );

            Ok(Arc::new(map))
        })
    }

    /// Returns the cached statement text for `key`, rendering it with `build`
    /// on first use.
    pub fn statement(
        &self,
        key: StatementKey,
        build: impl FnOnce() -> Result<String>,
    ) -> Result<Arc<str>> {
        self.statements.get_or_try_insert_with(key.clone(), || {
            let sql = build()?;
            tracing::debug!(kind = ?key.kind, dialect = %key.dialect, %sql, "cached statement text");
            Ok(Arc::from(sql))
        })
    }

    /// Number of object maps built so far.
    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    /// Number of statement texts cached so far.
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("table_name_prefix", &self.table_name_prefix)
            .field("resolver", &self.resolver)
            .field("maps", &self.maps.len())
            .field("statements", &self.statements.len())
            .finish()
    }
}
