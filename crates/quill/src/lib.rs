mod batch;
pub use batch::Batch;

pub mod stmt;
pub use stmt::{Delete, Expr, Insert, IntoExpr, IntoValues, OrderBy, Path, Select, Update};

pub use quill_core::schema::{self, Model, ModelBuilder, Schema, ValueMap};
pub use quill_core::stmt::{Enumeration, Record, Value};
pub use quill_core::{bail, err, Error, Result};

#[doc(hidden)]
pub use quill_core as __core;
pub use quill_sql::{dialect, CompiledQuery, Dialect, DialectRegistry, Params};

/// Compiles an insert of `model`, reading back its identity when the model
/// declares one.
pub fn compile_insert<M: Model>(model: &M, dialect: &dyn Dialect) -> Result<CompiledQuery> {
    Insert::new(dialect).values(model).compile()
}

/// Compiles an update of every updatable field of `model`, matched by its
/// primary key.
pub fn compile_update<M: Model>(model: &M, dialect: &dyn Dialect) -> Result<CompiledQuery> {
    Update::new(dialect).by_key(model)
}

/// Compiles a delete of the row whose primary key is taken from `key`.
pub fn compile_delete<M: Model>(
    key: impl IntoValues<M>,
    dialect: &dyn Dialect,
) -> Result<CompiledQuery> {
    Delete::new(dialect).by_key(key)
}

/// Compiles a select of the row whose primary key is taken from `key`.
pub fn compile_get<M: Model>(
    key: impl IntoValues<M>,
    dialect: &dyn Dialect,
) -> Result<CompiledQuery> {
    Select::new(dialect).by_key(key)
}

/// Compiles a select of every row matching `filter`.
pub fn compile_select<M: Model>(
    filter: Expr<bool>,
    dialect: &dyn Dialect,
) -> Result<CompiledQuery> {
    Select::<M>::new(dialect).filter(filter).compile()
}

/// Compiles `select count(*)` over the rows matching `filter`, or over every
/// row.
pub fn compile_count<M: Model>(
    filter: Option<Expr<bool>>,
    dialect: &dyn Dialect,
) -> Result<CompiledQuery> {
    let select = Select::<M>::new(dialect);

    match filter {
        Some(filter) => select.filter(filter).count(),
        None => select.count(),
    }
}
