use super::{Model, ModelBuilder, PropertyMap, Schema};
use crate::{Error, Result};
use std::any::{type_name, TypeId};

/// Mapping of a model type to a table.
///
/// Built once per type by [`Schema::map_for`] and immutable afterwards.
#[derive(Debug)]
pub struct ObjectMap {
    pub type_id: TypeId,

    /// Short name of the model type
    pub name: String,

    /// Table name, unescaped and including any configured prefix
    pub table: String,

    /// Mapped fields in declaration order
    pub properties: Vec<PropertyMap>,

    /// Index of the identity property, if any
    identity: Option<usize>,
}

impl ObjectMap {
    pub(super) fn build<M: Model>(schema: &Schema) -> Result<Self> {
        let mut model = ModelBuilder::<M>::new();
        M::describe(&mut model);

        let name = short_type_name::<M>();
        let opt_in = model.table.is_some();
        let resolver = schema.resolver();

        let mut table = model
            .table
            .take()
            .unwrap_or_else(|| resolver.table_name(&name));
        if let Some(prefix) = schema.table_name_prefix() {
            table.insert_str(0, prefix);
        }

        let mut properties = vec![];

        for field in model.fields {
            if field.ignore || (opt_in && !field.opt_in) {
                continue;
            }

            let column = field
                .column
                .unwrap_or_else(|| resolver.column_name(&name, &field.name));

            let mut property =
                PropertyMap::new(field.name, column, field.ty, field.value_map, field.getter);
            property.is_primary_key = field.primary_key;
            property.is_identity = field.identity;
            property.is_database_generated = field.generated || field.identity;
            property.is_computed = field.computed;
            property.is_nullable = field.nullable;
            property.is_read_only = field.read_only;
            property.selectable = !field.write_only;

            properties.push(property);
        }

        let map = ObjectMap {
            type_id: TypeId::of::<M>(),
            identity: properties.iter().position(|property| property.is_identity),
            name,
            table,
            properties,
        };

        map.verify()?;
        Ok(map)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyMap> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// Looks up a property by name, failing when the model has no such
    /// mapped field.
    pub fn expect_property(&self, name: &str) -> Result<&PropertyMap> {
        self.property(name).ok_or_else(|| {
            Error::invalid_statement(format!("`{}` has no mapped field `{name}`", self.name))
        })
    }

    pub fn identity(&self) -> Option<&PropertyMap> {
        self.identity.map(|index| &self.properties[index])
    }

    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }

    pub fn has_primary_key(&self) -> bool {
        self.properties.iter().any(|property| property.is_primary_key)
    }

    /// Fails unless the model declares a primary key. `operation` names what
    /// needed it.
    pub fn require_primary_key(&self, operation: &str) -> Result<()> {
        if self.has_primary_key() {
            Ok(())
        } else {
            Err(Error::invalid_schema(format!(
                "`{}` has no primary key, required by {operation}",
                self.name
            )))
        }
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &PropertyMap> + '_ {
        self.properties.iter().filter(|property| property.is_primary_key)
    }

    pub fn insertable(&self) -> impl Iterator<Item = &PropertyMap> + '_ {
        self.properties.iter().filter(|property| property.is_insertable())
    }

    pub fn updatable(&self) -> impl Iterator<Item = &PropertyMap> + '_ {
        self.properties.iter().filter(|property| property.is_updatable())
    }

    pub fn selectable(&self) -> impl Iterator<Item = &PropertyMap> + '_ {
        self.properties.iter().filter(|property| property.is_selectable())
    }
}

/// `my_app::models::Person<T>` becomes `Person`.
fn short_type_name<M>() -> String {
    let full = type_name::<M>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path).to_string()
}
