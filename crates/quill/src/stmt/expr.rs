use super::{IntoExpr, Path};
use quill_core::stmt::{self, Primitive, Value};
use std::marker::PhantomData;
use std::ops;

/// A typed expression over a mapped row, evaluating to `T`.
#[derive(Debug)]
pub struct Expr<T> {
    /// The un-typed expression
    pub(crate) untyped: stmt::Expr,

    /// `T` is the type of the expression
    _p: PhantomData<fn() -> T>,
}

/// Types that support arithmetic in expressions.
pub trait Numeric: Primitive {}

impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for f64 {}
impl<T: Numeric> Numeric for Option<T> {}

impl<T> Expr<T> {
    /// Create an expression from the given value.
    pub(crate) fn from_value(value: Value) -> Self {
        Self::from_untyped(stmt::Expr::Value(value))
    }

    pub fn from_untyped(untyped: impl Into<stmt::Expr>) -> Self {
        Self {
            untyped: untyped.into(),
            _p: PhantomData,
        }
    }

    pub fn into_untyped(self) -> stmt::Expr {
        self.untyped
    }

    pub fn cast<U>(self) -> Expr<U> {
        Expr::from_untyped(self.untyped)
    }

    /// A value produced by `f` when the expression is compiled.
    pub fn lazy(name: &str, f: impl Fn() -> T + Send + Sync + 'static) -> Self
    where
        T: Primitive,
    {
        Self::from_untyped(stmt::Expr::lazy(name, move || f().into_value()))
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::eq(self.untyped, rhs.into_expr().untyped))
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::ne(self.untyped, rhs.into_expr().untyped))
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::gt(self.untyped, rhs.into_expr().untyped))
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::ge(self.untyped, rhs.into_expr().untyped))
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::lt(self.untyped, rhs.into_expr().untyped))
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::le(self.untyped, rhs.into_expr().untyped))
    }

    pub fn is_null(self) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::eq(self.untyped, Value::Null))
    }

    pub fn is_not_null(self) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::ne(self.untyped, Value::Null))
    }
}

impl Expr<bool> {
    pub fn and(self, rhs: impl IntoExpr<bool>) -> Self {
        Self::from_untyped(stmt::Expr::and(self.untyped, rhs.into_expr().untyped))
    }

    /// Conjunction of every expression; `true` when there are none.
    pub fn and_all<E>(exprs: impl IntoIterator<Item = E>) -> Self
    where
        E: IntoExpr<bool>,
    {
        exprs
            .into_iter()
            .map(|expr| expr.into_expr().untyped)
            .reduce(stmt::Expr::and)
            .map(Self::from_untyped)
            .unwrap_or_else(|| Self::from_value(Value::Bool(true)))
    }

    pub fn or(self, rhs: impl IntoExpr<bool>) -> Self {
        Self::from_untyped(stmt::Expr::or(self.untyped, rhs.into_expr().untyped))
    }
}

impl Expr<String> {
    fn call(self, method: &str, args: impl IntoIterator<Item = stmt::Expr>) -> Self {
        Self::from_untyped(stmt::Expr::method_call(self.untyped, method, args))
    }

    fn test(self, method: &str, pattern: impl IntoExpr<String>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::method_call(
            self.untyped,
            method,
            [pattern.into_expr().untyped],
        ))
    }

    pub fn trim(self) -> Self {
        self.call("trim", [])
    }

    pub fn trim_start(self) -> Self {
        self.call("trim_start", [])
    }

    pub fn trim_end(self) -> Self {
        self.call("trim_end", [])
    }

    pub fn to_upper(self) -> Self {
        self.call("to_upper", [])
    }

    pub fn to_lower(self) -> Self {
        self.call("to_lower", [])
    }

    pub fn replace(self, from: impl IntoExpr<String>, to: impl IntoExpr<String>) -> Self {
        self.call(
            "replace",
            [from.into_expr().untyped, to.into_expr().untyped],
        )
    }

    /// Characters from the zero-based `start` to the end.
    pub fn substring(self, start: impl IntoExpr<i64>) -> Self {
        self.call("substring", [start.into_expr().untyped])
    }

    /// `len` characters from the zero-based `start`.
    pub fn substring_len(self, start: impl IntoExpr<i64>, len: impl IntoExpr<i64>) -> Self {
        self.call(
            "substring",
            [start.into_expr().untyped, len.into_expr().untyped],
        )
    }

    pub fn starts_with(self, pattern: impl IntoExpr<String>) -> Expr<bool> {
        self.test("starts_with", pattern)
    }

    pub fn ends_with(self, pattern: impl IntoExpr<String>) -> Expr<bool> {
        self.test("ends_with", pattern)
    }

    pub fn contains(self, pattern: impl IntoExpr<String>) -> Expr<bool> {
        self.test("contains", pattern)
    }
}

impl ops::Not for Expr<bool> {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_untyped(stmt::Expr::not(self.untyped))
    }
}

impl ops::Not for Path<bool> {
    type Output = Expr<bool>;

    fn not(self) -> Expr<bool> {
        !self.expr()
    }
}

macro_rules! impl_arithmetic {
    ( $( $trait:ident :: $method:ident ;)* ) => {
        $(
            impl<T: Numeric, R: IntoExpr<T>> ops::$trait<R> for Expr<T> {
                type Output = Expr<T>;

                fn $method(self, rhs: R) -> Expr<T> {
                    Expr::from_untyped(stmt::Expr::$method(self.untyped, rhs.into_expr().untyped))
                }
            }

            impl<T: Numeric, R: IntoExpr<T>> ops::$trait<R> for Path<T> {
                type Output = Expr<T>;

                fn $method(self, rhs: R) -> Expr<T> {
                    ops::$trait::$method(self.expr(), rhs)
                }
            }
        )*
    };
}

impl_arithmetic! {
    Add::add;
    Sub::sub;
    Mul::mul;
    Div::div;
    Rem::rem;
}

impl<T: Numeric> ops::Neg for Expr<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_untyped(stmt::Expr::neg(self.untyped))
    }
}

impl<T: Numeric> ops::Neg for Path<T> {
    type Output = Expr<T>;

    fn neg(self) -> Expr<T> {
        -self.expr()
    }
}

impl<T> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self::from_untyped(self.untyped.clone())
    }
}

impl<T> From<Expr<T>> for stmt::Expr {
    fn from(value: Expr<T>) -> Self {
        value.untyped
    }
}
