use super::{property_map::Getter, ValueMap};
use crate::stmt::{Primitive, Type};
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// Collects the mapping declared by [`Model::describe`](super::Model::describe).
///
/// Without a [`table`](Self::table) marker every declared field is mapped
/// unless it is [ignored](FieldBuilder::ignore). With the marker, mapping is
/// opt-in: only fields marked [`column`](FieldBuilder::column) or
/// [`mapped`](FieldBuilder::mapped) are included.
pub struct ModelBuilder<M> {
    pub(super) table: Option<String>,
    pub(super) fields: Vec<FieldDef>,
    _model: PhantomData<fn(&M)>,
}

/// Declares the attributes of one mapped field.
pub struct FieldBuilder<'a> {
    field: &'a mut FieldDef,
}

pub(super) struct FieldDef {
    pub(super) name: String,
    pub(super) ty: Type,
    pub(super) column: Option<String>,
    pub(super) opt_in: bool,
    pub(super) ignore: bool,
    pub(super) primary_key: bool,
    pub(super) identity: bool,
    pub(super) generated: bool,
    pub(super) computed: bool,
    pub(super) nullable: bool,
    pub(super) read_only: bool,
    pub(super) write_only: bool,
    pub(super) value_map: Option<ValueMap>,
    pub(super) getter: Getter,
}

impl<M: 'static> ModelBuilder<M> {
    pub(super) fn new() -> Self {
        Self {
            table: None,
            fields: vec![],
            _model: PhantomData,
        }
    }

    /// Maps the type to `name` and switches the type to opt-in field mapping.
    pub fn table(&mut self, name: &str) -> &mut Self {
        self.table = Some(name.to_string());
        self
    }

    /// Declares a field read through `getter`.
    ///
    /// The field's type, nullability and value map default to those of the
    /// getter's return type.
    pub fn field<V, F>(&mut self, name: &str, getter: F) -> FieldBuilder<'_>
    where
        V: Primitive,
        F: Fn(&M) -> V + Send + Sync + 'static,
    {
        let getter: Getter = Arc::new(move |model: &dyn Any| {
            model
                .downcast_ref::<M>()
                .map(|model| getter(model).into_value())
        });

        self.fields.push(FieldDef {
            name: name.to_string(),
            ty: V::TYPE,
            column: None,
            opt_in: false,
            ignore: false,
            primary_key: false,
            identity: false,
            generated: false,
            computed: false,
            nullable: V::NULLABLE,
            read_only: false,
            write_only: false,
            value_map: V::value_map(),
            getter,
        });

        let field = self.fields.len() - 1;
        FieldBuilder {
            field: &mut self.fields[field],
        }
    }
}

impl FieldBuilder<'_> {
    /// Maps the field to an explicitly named column.
    pub fn column(self, name: &str) -> Self {
        self.field.column = Some(name.to_string());
        self.field.opt_in = true;
        self
    }

    /// Opts the field in under its resolved column name.
    pub fn mapped(self) -> Self {
        self.field.opt_in = true;
        self
    }

    /// Excludes the field from the mapping.
    pub fn ignore(self) -> Self {
        self.field.ignore = true;
        self
    }

    pub fn primary_key(self) -> Self {
        self.field.primary_key = true;
        self
    }

    /// The database assigns the value on insert and it is read back
    /// afterwards. Must be combined with [`primary_key`](Self::primary_key).
    pub fn identity(self) -> Self {
        self.field.identity = true;
        self
    }

    /// The database assigns the value on insert.
    pub fn generated(self) -> Self {
        self.field.generated = true;
        self
    }

    pub fn computed(self) -> Self {
        self.field.computed = true;
        self
    }

    pub fn nullable(self, nullable: bool) -> Self {
        self.field.nullable = nullable;
        self
    }

    pub fn read_only(self) -> Self {
        self.field.read_only = true;
        self
    }

    /// The field is written but never selected.
    pub fn write_only(self) -> Self {
        self.field.write_only = true;
        self
    }

    /// Overrides the value map of the field's type.
    pub fn value_map(self, map: ValueMap) -> Self {
        self.field.value_map = Some(map);
        self
    }
}
