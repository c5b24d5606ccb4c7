use super::ValueMap;
use crate::stmt::{Type, Value};
use crate::{Error, Result};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Reads one field from a type-erased model reference.
pub(super) type Getter = Arc<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;

/// Mapping of one model field to a column.
#[derive(Clone)]
pub struct PropertyMap {
    /// Field name as declared by the model
    pub name: String,

    /// Column name, unescaped
    pub column: String,

    pub ty: Type,

    pub is_primary_key: bool,

    /// The database assigns the value on insert
    pub is_database_generated: bool,

    pub is_identity: bool,

    pub is_computed: bool,

    pub is_nullable: bool,

    pub is_read_only: bool,

    /// Translates field values to SQL literals
    pub value_map: Option<ValueMap>,

    pub(super) selectable: bool,

    getter: Getter,
}

impl PropertyMap {
    pub(super) fn new(
        name: String,
        column: String,
        ty: Type,
        value_map: Option<ValueMap>,
        getter: Getter,
    ) -> Self {
        Self {
            name,
            column,
            ty,
            is_primary_key: false,
            is_database_generated: false,
            is_identity: false,
            is_computed: false,
            is_nullable: false,
            is_read_only: false,
            value_map,
            selectable: true,
            getter,
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn is_insertable(&self) -> bool {
        !self.is_database_generated && !self.is_identity && !self.is_computed
    }

    pub fn is_updatable(&self) -> bool {
        self.is_insertable() && !self.is_primary_key
    }

    /// Reads the field from `model`.
    pub fn value_of<M: 'static>(&self, model: &M) -> Result<Value> {
        (self.getter)(model as &dyn Any).ok_or_else(|| {
            Error::invalid_statement(format!(
                "field `{}` cannot be read from `{}`",
                self.name,
                type_name::<M>()
            ))
        })
    }

    /// Translates a field value to the form bound as a parameter.
    pub fn to_sql(&self, value: Value) -> Result<Value> {
        match &self.value_map {
            Some(map) => map.to_sql(&value),
            None => Ok(value),
        }
    }

    /// Reads the field from `model` and translates it for binding.
    pub fn sql_value_of<M: 'static>(&self, model: &M) -> Result<Value> {
        self.to_sql(self.value_of(model)?)
    }
}

impl fmt::Debug for PropertyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMap")
            .field("name", &self.name)
            .field("column", &self.column)
            .field("ty", &self.ty)
            .field("is_primary_key", &self.is_primary_key)
            .field("is_database_generated", &self.is_database_generated)
            .field("is_identity", &self.is_identity)
            .field("is_computed", &self.is_computed)
            .field("is_nullable", &self.is_nullable)
            .field("is_read_only", &self.is_read_only)
            .field("is_selectable", &self.selectable)
            .field("value_map", &self.value_map)
            .finish()
    }
}
