use super::Value;
use std::fmt;

/// A member of an enumerated type, as seen by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueEnum {
    /// Name of the enum type
    pub ty: &'static str,

    /// Name of the member
    pub variant: &'static str,

    /// Integer ordinal of the member
    pub ordinal: i64,
}

impl fmt::Display for ValueEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.ty, self.variant)
    }
}

impl From<ValueEnum> for Value {
    fn from(value: ValueEnum) -> Self {
        Self::Enum(value)
    }
}
