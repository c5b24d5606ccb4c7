use super::{Type, Value};
use crate::schema::ValueMap;

/// A Rust type that can be stored in a mapped column.
pub trait Primitive: Sized {
    const TYPE: Type;

    /// Whether the type admits a missing value. Strings and `Option` do.
    const NULLABLE: bool = false;

    fn into_value(self) -> Value;

    /// Value map applied to the type whenever it is bound or compared.
    /// Enumerations return their member map.
    fn value_map() -> Option<ValueMap> {
        None
    }
}

macro_rules! impl_primitive {
    ( $( $ty:ty => $variant:ident ;)* ) => {
        $(
            impl Primitive for $ty {
                const TYPE: Type = Type::$variant;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool;
    i32 => I32;
    i64 => I64;
    f64 => F64;
}

impl Primitive for String {
    const TYPE: Type = Type::String;
    const NULLABLE: bool = true;

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE: Type = T::TYPE;
    const NULLABLE: bool = true;

    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }

    fn value_map() -> Option<ValueMap> {
        T::value_map()
    }
}
