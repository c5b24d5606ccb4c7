use super::Expr;

/// Access to a named member of an expression.
///
/// When `target` is [`Expr::Param`], the member names a property of the
/// mapped type.
#[derive(Debug, Clone)]
pub struct ExprMember {
    pub target: Box<Expr>,
    pub member: String,
}

impl Expr {
    /// A property of the mapped row
    pub fn field(name: impl Into<String>) -> Self {
        Expr::member(Expr::Param, name)
    }

    pub fn member(target: impl Into<Self>, member: impl Into<String>) -> Self {
        ExprMember {
            target: Box::new(target.into()),
            member: member.into(),
        }
        .into()
    }

    /// Returns the property name when the expression is a direct member of
    /// the mapped row.
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Self::Member(ExprMember { target, member }) if target.is_param() => Some(member),
            _ => None,
        }
    }
}

impl From<ExprMember> for Expr {
    fn from(value: ExprMember) -> Self {
        Self::Member(value)
    }
}
