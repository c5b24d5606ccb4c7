use super::*;

use std::fmt;

/// An untyped predicate or assignment expression over a mapped row.
///
/// Expressions are built through the constructors on this type (or the typed
/// wrappers in `quill`) and compiled to SQL by `quill-sql`. Any subtree that
/// does not reference [`Expr::Param`] can also be evaluated to a constant.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// A host value produced on evaluation
    Lazy(ExprLazy),

    /// Member access
    Member(ExprMember),

    /// Method or function call
    MethodCall(ExprMethodCall),

    /// Record construction
    New(ExprNew),

    /// List construction
    NewArray(ExprNewArray),

    /// The mapped row the expression is evaluated against
    Param,

    /// Unary expression
    UnaryOp(ExprUnaryOp),

    /// Evaluates to a constant value
    Value(Value),
}

impl Expr {
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub fn is_param(&self) -> bool {
        matches!(self, Self::Param)
    }

    /// Is a value that evaluates to null
    pub fn is_value_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    /// Returns true if the expression is a constant value.
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(..))
    }

    /// Returns `true` if any node of the expression refers to the mapped row.
    pub fn references_param(&self) -> bool {
        match self {
            Self::Param => true,
            Self::Value(_) | Self::Lazy(_) => false,
            Self::Member(expr) => expr.target.references_param(),
            Self::BinaryOp(expr) => expr.lhs.references_param() || expr.rhs.references_param(),
            Self::UnaryOp(expr) => expr.expr.references_param(),
            Self::MethodCall(expr) => {
                expr.target
                    .as_deref()
                    .is_some_and(Expr::references_param)
                    || expr.args.iter().any(Expr::references_param)
            }
            Self::New(expr) => expr.fields.iter().any(|(_, expr)| expr.references_param()),
            Self::NewArray(expr) => expr.items.iter().any(Expr::references_param),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BinaryOp(expr) => write!(f, "({} {} {})", expr.lhs, expr.op, expr.rhs),
            Self::Lazy(expr) => write!(f, "{}", expr.name),
            Self::Member(expr) => write!(f, "{}.{}", expr.target, expr.member),
            Self::MethodCall(expr) => {
                if let Some(target) = &expr.target {
                    write!(f, "{target}.")?;
                }
                write!(f, "{}(", expr.method)?;
                for (i, arg) in expr.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::New(expr) => {
                f.write_str("new ")?;
                if let Some(ty) = &expr.ty {
                    write!(f, "{ty} ")?;
                }
                f.write_str("{ ")?;
                for (i, (name, field)) in expr.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {field}")?;
                }
                f.write_str(" }")
            }
            Self::NewArray(expr) => {
                f.write_str("[")?;
                for (i, item) in expr.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Param => f.write_str("p"),
            Self::UnaryOp(expr) => write!(f, "{}{}", expr.op, expr.expr),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

macro_rules! impl_from_for_expr {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_from_for_expr!(bool, i32, i64, f64, String, &str, ValueEnum, Record);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_source_like_text() {
        let expr = Expr::and(
            Expr::gt(Expr::field("Age"), 18i64),
            Expr::not(Expr::method_call(
                Expr::field("Name"),
                "starts_with",
                [Expr::from("x")],
            )),
        );

        assert_eq!(
            expr.to_string(),
            "((p.Age > 18) && !p.Name.starts_with(\"x\"))"
        );
    }

    #[test]
    fn references_param_sees_through_calls() {
        assert!(Expr::method_call(Expr::from("a"), "contains", [Expr::field("Name")])
            .references_param());
        assert!(!Expr::new_array([Expr::from(1i64), Expr::lazy("now", || 3i64)])
            .references_param());
        assert!(Expr::new_record([("a", Expr::field("Id"))]).references_param());
    }
}
