use std::fmt;

/// The runtime type of a [`Value`](super::Value).
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Enum,
    F64,
    I32,
    I64,
    List,
    Null,
    Record,
    String,
}

impl Type {
    pub fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_enum(self) -> bool {
        matches!(self, Self::Enum)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::I32 | Self::I64 | Self::F64)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "bool",
            Self::Enum => "enum",
            Self::F64 => "f64",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::List => "list",
            Self::Null => "null",
            Self::Record => "record",
            Self::String => "string",
        })
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
