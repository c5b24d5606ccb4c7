use super::Error;

/// Error when the expression compiler meets a node it has no rule for.
///
/// The message carries the offending sub-expression, rendered through its
/// `Display` implementation.
#[derive(Debug)]
pub(super) struct UnsupportedExpression {
    expr: Box<str>,
}

impl std::error::Error for UnsupportedExpression {}

impl core::fmt::Display for UnsupportedExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "expression not supported: {}", self.expr)
    }
}

impl Error {
    /// Creates an unsupported expression error naming `expr`.
    pub fn unsupported_expression(expr: impl core::fmt::Display) -> Error {
        Error::from(super::ErrorKind::UnsupportedExpression(
            UnsupportedExpression {
                expr: expr.to_string().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported expression error.
    pub fn is_unsupported_expression(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedExpression(_))
    }
}
