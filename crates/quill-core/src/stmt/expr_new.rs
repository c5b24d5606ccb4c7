use super::Expr;

/// Construction of a record from named field expressions.
#[derive(Debug, Clone)]
pub struct ExprNew {
    /// Optional type name, only used when displaying the expression.
    pub ty: Option<String>,
    pub fields: Vec<(String, Expr)>,
}

/// Construction of a list.
#[derive(Debug, Clone)]
pub struct ExprNewArray {
    pub items: Vec<Expr>,
}

impl Expr {
    pub fn new_record<N: Into<String>>(fields: impl IntoIterator<Item = (N, Expr)>) -> Self {
        ExprNew {
            ty: None,
            fields: fields
                .into_iter()
                .map(|(name, expr)| (name.into(), expr))
                .collect(),
        }
        .into()
    }

    pub fn new_array(items: impl IntoIterator<Item = Expr>) -> Self {
        ExprNewArray {
            items: items.into_iter().collect(),
        }
        .into()
    }
}

impl From<ExprNew> for Expr {
    fn from(value: ExprNew) -> Self {
        Self::New(value)
    }
}

impl From<ExprNewArray> for Expr {
    fn from(value: ExprNewArray) -> Self {
        Self::NewArray(value)
    }
}
