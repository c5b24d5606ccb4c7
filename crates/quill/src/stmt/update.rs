use super::{apply, Expr, IntoExpr, IntoValues, Path, State};
use quill_core::schema::StatementKind;
use quill_core::stmt::Evaluate;
use quill_core::{Error, Model, Result, Schema};
use quill_sql::{CompiledQuery, Comma, Dialect};
use std::marker::PhantomData;

/// Builds an `update` statement.
///
/// Assignments come from [`set`](Self::set) (values compared to nothing,
/// written as they are) or [`set_field`](Self::set_field) (an expression that
/// may read the row's current values, as in `counter = counter + 1`).
/// [`by_key`](Self::by_key) produces the canonical cached shape that writes
/// every updatable field of a model, matched by its primary key.
pub struct Update<'a, M> {
    inner: Result<Inner<'a>>,
    _p: PhantomData<fn(&M)>,
}

struct Inner<'a> {
    state: State<'a>,
    assignments: Vec<String>,
}

impl<'a, M: Model> Update<'a, M> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self::with_schema(Schema::global(), dialect)
    }

    pub fn with_schema(schema: &'a Schema, dialect: &'a dyn Dialect) -> Self {
        Self {
            inner: State::new::<M>(schema, dialect).map(|state| Inner {
                state,
                assignments: vec![],
            }),
            _p: PhantomData,
        }
    }

    /// Folds constant subtrees with `eval`.
    pub fn with_evaluator(mut self, eval: &'a dyn Evaluate) -> Self {
        if let Ok(inner) = &mut self.inner {
            inner.state.eval = eval;
        }
        self
    }

    /// Assigns every updatable field present in `values`. Primary key and
    /// database generated fields are left untouched.
    pub fn set(mut self, values: impl IntoValues<M>) -> Self {
        apply(&mut self.inner, |inner| {
            let map = inner.state.map.clone();

            for (name, value) in values.into_values(&map)? {
                let property = map.expect_property(&name)?;
                if !property.is_updatable() {
                    continue;
                }

                let column = inner.state.column(property);
                let param = inner.state.bind(property.to_sql(value)?);
                inner.assignments.push(format!("{column} = {param}"));
            }

            Ok(())
        });
        self
    }

    /// Assigns the result of `expr` to the field at `path`.
    pub fn set_field<T>(mut self, path: Path<T>, expr: impl IntoExpr<T>) -> Self {
        let expr = expr.into_expr().into_untyped();

        apply(&mut self.inner, |inner| {
            let map = inner.state.map.clone();
            let property = map.expect_property(path.name())?;
            if !property.is_updatable() {
                return Err(Error::invalid_statement(format!(
                    "`{}.{}` cannot be updated",
                    map.name, property.name
                )));
            }

            let column = inner.state.column(property);
            let value = inner.state.compiler().assignment(property, &expr)?;
            inner.assignments.push(format!("{column} = {value}"));
            Ok(())
        });
        self
    }

    pub fn filter(mut self, filter: Expr<bool>) -> Self {
        apply(&mut self.inner, |inner| inner.state.filter_expr(&filter.untyped));
        self
    }

    /// Matches rows whose columns equal every value in `values`.
    pub fn filter_by(mut self, values: impl IntoValues<M>) -> Self {
        apply(&mut self.inner, |inner| {
            let values = values.into_values(&inner.state.map)?;
            inner.state.filter_values(values, false)
        });
        self
    }

    /// Matches the row whose primary key equals the key fields of `values`.
    pub fn filter_by_key(mut self, values: impl IntoValues<M>) -> Self {
        apply(&mut self.inner, |inner| {
            let values = values.into_values(&inner.state.map)?;
            inner.state.filter_values(values, true)
        });
        self
    }

    pub fn compile(self) -> Result<CompiledQuery> {
        let Inner { state, assignments } = self.inner?;

        if assignments.is_empty() {
            return Err(Error::invalid_statement(format!(
                "update of `{}` assigns no fields",
                state.map.name
            )));
        }

        let mut sql = format!("update {} set {}", state.table(), Comma(&assignments));
        if let Some(conditions) = state.where_clause() {
            sql.push_str(" where ");
            sql.push_str(&conditions);
        }

        Ok(state.finish(sql))
    }

    /// Writes every updatable field of `model` to the row with the same
    /// primary key.
    pub fn by_key(self, model: &M) -> Result<CompiledQuery> {
        let Inner {
            mut state,
            assignments,
        } = self.inner?;

        if !assignments.is_empty() || !state.is_pristine() {
            return Err(Error::invalid_statement(
                "an update by primary key cannot be combined with other clauses",
            ));
        }

        let sql = state.cached(StatementKind::UpdateByKey, || {
            state.map.require_primary_key("an update by primary key")?;

            let assignments = state
                .map
                .updatable()
                .enumerate()
                .map(|(i, property)| {
                    let param = state.dialect.parameter(&format!("p{i}"));
                    format!("{} = {param}", state.column(property))
                })
                .collect::<Vec<_>>();

            if assignments.is_empty() {
                return Err(Error::invalid_statement(format!(
                    "`{}` has no updatable fields",
                    state.map.name
                )));
            }

            Ok(format!(
                "update {} set {} where {}",
                state.table(),
                Comma(&assignments),
                state.key_predicate(assignments.len())
            ))
        })?;

        let map = state.map.clone();
        for property in map.updatable() {
            state.params.push(property.sql_value_of(model)?);
        }
        state.bind_key(IntoValues::<M>::into_values(model, &map)?)?;

        Ok(state.finish(&*sql))
    }
}
