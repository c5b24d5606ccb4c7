use super::{Value, ValueEnum};

/// An enumerated type whose members map to SQL literals.
///
/// Each member maps to its explicit [`sql_value`](Enumeration::sql_value)
/// when one is declared and to its integer ordinal otherwise. Pair an
/// implementation with [`enum_primitive!`](crate::enum_primitive) so the type
/// can be used as a mapped field.
pub trait Enumeration: Copy + PartialEq + 'static {
    /// Name of the enum type, used in error messages.
    const NAME: &'static str;

    /// Every member, in declaration order.
    fn variants() -> &'static [Self];

    fn variant_name(self) -> &'static str;

    fn ordinal(self) -> i64;

    /// Explicit SQL literal for the member.
    fn sql_value(self) -> Option<Value> {
        None
    }

    fn to_value_enum(self) -> ValueEnum {
        ValueEnum {
            ty: Self::NAME,
            variant: self.variant_name(),
            ordinal: self.ordinal(),
        }
    }

    fn from_value_enum(value: &ValueEnum) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|variant| variant.to_value_enum() == *value)
    }
}

/// Implements `Primitive` for a type implementing [`Enumeration`].
#[macro_export]
macro_rules! enum_primitive {
    ($ty:ty) => {
        impl $crate::stmt::Primitive for $ty {
            const TYPE: $crate::stmt::Type = $crate::stmt::Type::Enum;

            fn into_value(self) -> $crate::stmt::Value {
                $crate::stmt::Value::Enum($crate::stmt::Enumeration::to_value_enum(self))
            }

            fn value_map() -> Option<$crate::schema::ValueMap> {
                Some($crate::schema::ValueMap::of_enum::<$ty>())
            }
        }
    };
}
