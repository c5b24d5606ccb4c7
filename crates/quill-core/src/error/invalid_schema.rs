use super::Error;

/// Error when a mapping descriptor is invalid.
///
/// This occurs when:
/// - An operation needs a primary key and the mapped type declares none
/// - A property is declared identity without also being a primary key
/// - More than one identity property is declared
/// - A value map's SQL literals disagree on their type, or repeat
///
/// These errors are raised while an `ObjectMap` is built, the first time a
/// type is referenced, and are never cached as a successful mapping.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
