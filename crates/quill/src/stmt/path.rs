use super::{Direction, Expr, IntoExpr, OrderBy};
use std::{fmt, marker::PhantomData};

/// A mapped field of type `T`, named as declared in
/// [`Model::describe`](quill_core::Model::describe).
///
/// Paths are the leaves of typed predicates:
///
/// ```
/// use quill::Path;
///
/// const AGE: Path<i32> = Path::new("Age");
/// const NAME: Path<String> = Path::new("Name");
///
/// let adults_named_a = AGE.ge(18).and(NAME.starts_with("A"));
/// ```
pub struct Path<T> {
    name: &'static str,
    _p: PhantomData<fn() -> T>,
}

impl<T> Path<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _p: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn expr(self) -> Expr<T> {
        Expr::from_untyped(quill_core::stmt::Expr::field(self.name))
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().eq(rhs)
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().ne(rhs)
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().gt(rhs)
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().ge(rhs)
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().lt(rhs)
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().le(rhs)
    }

    pub fn is_null(self) -> Expr<bool> {
        self.expr().is_null()
    }

    pub fn is_not_null(self) -> Expr<bool> {
        self.expr().is_not_null()
    }

    pub fn asc(self) -> OrderBy {
        OrderBy::new(self.name, Direction::Asc)
    }

    pub fn desc(self) -> OrderBy {
        OrderBy::new(self.name, Direction::Desc)
    }
}

macro_rules! forward_to_expr {
    ( $( $name:ident ( $( $arg:ident : $ty:ty ),* ) -> $ret:ty ;)* ) => {
        $(
            pub fn $name(self, $( $arg: $ty ),*) -> $ret {
                self.expr().$name($( $arg ),*)
            }
        )*
    };
}

impl Path<String> {
    forward_to_expr! {
        trim() -> Expr<String>;
        trim_start() -> Expr<String>;
        trim_end() -> Expr<String>;
        to_upper() -> Expr<String>;
        to_lower() -> Expr<String>;
        replace(from: impl IntoExpr<String>, to: impl IntoExpr<String>) -> Expr<String>;
        substring(start: impl IntoExpr<i64>) -> Expr<String>;
        substring_len(start: impl IntoExpr<i64>, len: impl IntoExpr<i64>) -> Expr<String>;
        starts_with(pattern: impl IntoExpr<String>) -> Expr<bool>;
        ends_with(pattern: impl IntoExpr<String>) -> Expr<bool>;
        contains(pattern: impl IntoExpr<String>) -> Expr<bool>;
    }
}

impl<T> Clone for Path<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Path<T> {}

impl<T> fmt::Debug for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.name).finish()
    }
}

impl<T> From<Path<T>> for Expr<T> {
    fn from(value: Path<T>) -> Self {
        value.expr()
    }
}
