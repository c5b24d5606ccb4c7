use super::{Expr, Value};
use std::{fmt, sync::Arc};

/// A value owned by the host program, produced only when the expression is
/// evaluated. Stands in for captured variables and calls like "now".
#[derive(Clone)]
pub struct ExprLazy {
    pub name: Arc<str>,
    f: Arc<dyn Fn() -> Value + Send + Sync>,
}

impl ExprLazy {
    pub fn call(&self) -> Value {
        (self.f)()
    }
}

impl Expr {
    pub fn lazy<V: Into<Value>>(
        name: impl Into<Arc<str>>,
        f: impl Fn() -> V + Send + Sync + 'static,
    ) -> Self {
        ExprLazy {
            name: name.into(),
            f: Arc::new(move || f().into()),
        }
        .into()
    }
}

impl fmt::Debug for ExprLazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprLazy").field("name", &self.name).finish()
    }
}

impl From<ExprLazy> for Expr {
    fn from(value: ExprLazy) -> Self {
        Self::Lazy(value)
    }
}
