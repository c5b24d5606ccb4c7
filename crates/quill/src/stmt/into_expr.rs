use super::{Expr, Path};
use quill_core::stmt::Value;

/// Values and expressions usable where an `Expr<T>` is expected.
pub trait IntoExpr<T> {
    fn into_expr(self) -> Expr<T>;
}

macro_rules! impl_into_expr_for_primitive {
    ( $( $ty:ty ),* ) => {
        $(
            impl IntoExpr<$ty> for $ty {
                fn into_expr(self) -> Expr<$ty> {
                    Expr::from_value(Value::from(self))
                }
            }
        )*
    };
}

impl_into_expr_for_primitive!(bool, i32, i64, f64, String);

impl<T> IntoExpr<T> for Expr<T> {
    fn into_expr(self) -> Self {
        self
    }
}

impl<T> IntoExpr<T> for Path<T> {
    fn into_expr(self) -> Expr<T> {
        self.expr()
    }
}

impl<T: IntoExpr<T>> IntoExpr<Self> for Option<T> {
    fn into_expr(self) -> Expr<Self> {
        match self {
            Some(value) => value.into_expr().cast(),
            None => Expr::from_value(Value::Null),
        }
    }
}

impl<T: IntoExpr<T>> IntoExpr<Option<T>> for T {
    fn into_expr(self) -> Expr<Option<T>> {
        self.into_expr().cast()
    }
}

impl IntoExpr<String> for &str {
    fn into_expr(self) -> Expr<String> {
        Expr::from_value(Value::from(self))
    }
}

impl IntoExpr<Option<String>> for &str {
    fn into_expr(self) -> Expr<Option<String>> {
        Expr::from_value(Value::from(self))
    }
}

impl IntoExpr<String> for &String {
    fn into_expr(self) -> Expr<String> {
        Expr::from_value(Value::from(self))
    }
}

/// Implements `Primitive` for an [`Enumeration`](quill_core::stmt::Enumeration)
/// and lets its members appear in typed expressions.
#[macro_export]
macro_rules! enum_primitive {
    ($ty:ty) => {
        $crate::__core::enum_primitive!($ty);

        impl $crate::IntoExpr<$ty> for $ty {
            fn into_expr(self) -> $crate::Expr<$ty> {
                $crate::Expr::from_untyped($crate::Value::from(
                    $crate::__core::stmt::Enumeration::to_value_enum(self),
                ))
            }
        }
    };
}
