use super::Expr;

/// A method call, or a free function call when `target` is `None`.
#[derive(Debug, Clone)]
pub struct ExprMethodCall {
    pub target: Option<Box<Expr>>,
    pub method: String,
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn method_call(
        target: impl Into<Self>,
        method: impl Into<String>,
        args: impl IntoIterator<Item = Expr>,
    ) -> Self {
        ExprMethodCall {
            target: Some(Box::new(target.into())),
            method: method.into(),
            args: args.into_iter().collect(),
        }
        .into()
    }

    pub fn call(method: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        ExprMethodCall {
            target: None,
            method: method.into(),
            args: args.into_iter().collect(),
        }
        .into()
    }
}

impl From<ExprMethodCall> for Expr {
    fn from(value: ExprMethodCall) -> Self {
        Self::MethodCall(value)
    }
}
