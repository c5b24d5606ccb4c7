use super::{apply, Expr, IntoValues, State};
use quill_core::schema::StatementKind;
use quill_core::stmt::Evaluate;
use quill_core::{Error, Model, Result, Schema};
use quill_sql::{CompiledQuery, Dialect};
use std::marker::PhantomData;

/// Builds a `delete` statement. Without a filter every row is deleted.
pub struct Delete<'a, M> {
    state: Result<State<'a>>,
    _p: PhantomData<fn(&M)>,
}

impl<'a, M: Model> Delete<'a, M> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self::with_schema(Schema::global(), dialect)
    }

    pub fn with_schema(schema: &'a Schema, dialect: &'a dyn Dialect) -> Self {
        Self {
            state: State::new::<M>(schema, dialect),
            _p: PhantomData,
        }
    }

    pub fn with_evaluator(mut self, eval: &'a dyn Evaluate) -> Self {
        if let Ok(state) = &mut self.state {
            state.eval = eval;
        }
        self
    }

    pub fn filter(mut self, filter: Expr<bool>) -> Self {
        apply(&mut self.state, |state| state.filter_expr(&filter.untyped));
        self
    }

    pub fn filter_by(mut self, values: impl IntoValues<M>) -> Self {
        apply(&mut self.state, |state| {
            let values = values.into_values(&state.map)?;
            state.filter_values(values, false)
        });
        self
    }

    pub fn filter_by_key(mut self, values: impl IntoValues<M>) -> Self {
        apply(&mut self.state, |state| {
            let values = values.into_values(&state.map)?;
            state.filter_values(values, true)
        });
        self
    }

    pub fn compile(self) -> Result<CompiledQuery> {
        let state = self.state?;

        let mut sql = format!("delete from {}", state.table());
        if let Some(conditions) = state.where_clause() {
            sql.push_str(" where ");
            sql.push_str(&conditions);
        }

        Ok(state.finish(sql))
    }

    /// Deletes the row whose primary key equals the key fields of `key`.
    pub fn by_key(self, key: impl IntoValues<M>) -> Result<CompiledQuery> {
        let mut state = self.state?;

        if !state.is_pristine() {
            return Err(Error::invalid_statement(
                "a delete by primary key cannot be combined with other clauses",
            ));
        }

        let sql = state.cached(StatementKind::DeleteByKey, || {
            state.map.require_primary_key("a delete by primary key")?;
            Ok(format!(
                "delete from {} where {}",
                state.table(),
                state.key_predicate(0)
            ))
        })?;

        let values = key.into_values(&state.map)?;
        state.bind_key(values)?;

        Ok(state.finish(&*sql))
    }
}
