use super::Error;
use crate::stmt::Value;

/// Error when a value has no entry in a value map.
#[derive(Debug)]
pub(super) struct ValueNotMapped {
    value: Value,
    ty: Box<str>,
}

impl std::error::Error for ValueNotMapped {}

impl core::fmt::Display for ValueNotMapped {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "value {} is not mapped for type `{}`", self.value, self.ty)
    }
}

impl Error {
    /// Creates a value-not-mapped error for `value` of the declared type `ty`.
    pub fn value_not_mapped(value: Value, ty: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ValueNotMapped(ValueNotMapped {
            value,
            ty: ty.into().into(),
        }))
    }

    /// Returns `true` if this error is a value-not-mapped error.
    pub fn is_value_not_mapped(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ValueNotMapped(_))
    }
}
