use quill_core::schema::ObjectMap;
use quill_core::stmt::{Record, Value};
use quill_core::{Error, Model, Result};

/// Sources of named field values: a model instance, or a [`Record`] of some
/// of its fields.
///
/// Values are returned in their host form, keyed by field name. Builders
/// apply value maps when binding them.
pub trait IntoValues<M> {
    fn into_values(self, map: &ObjectMap) -> Result<Vec<(String, Value)>>;
}

impl<M: Model> IntoValues<M> for &M {
    fn into_values(self, map: &ObjectMap) -> Result<Vec<(String, Value)>> {
        map.properties
            .iter()
            .map(|property| Ok((property.name.clone(), property.value_of(self)?)))
            .collect()
    }
}

impl<M: Model> IntoValues<M> for Record {
    fn into_values(self, map: &ObjectMap) -> Result<Vec<(String, Value)>> {
        self.into_iter()
            .map(|(name, value)| {
                if map.property(&name).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "`{}` has no mapped field `{name}`",
                        map.name
                    )));
                }
                Ok((name, value))
            })
            .collect()
    }
}
