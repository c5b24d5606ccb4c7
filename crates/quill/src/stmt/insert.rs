use super::State;
use quill_core::schema::StatementKind;
use quill_core::{Error, Model, Result, Schema};
use quill_sql::{CompiledQuery, Comma, Dialect};
use std::fmt;

/// Builds an `insert` of one model instance.
///
/// Every insertable field is written. When the model has an identity column
/// the dialect's identity clause is appended so the new key is returned. The
/// statement text depends only on the model and the dialect and is cached in
/// the [`Schema`].
pub struct Insert<'a, M> {
    state: Result<State<'a>>,
    model: Option<&'a M>,
}

impl<'a, M: Model> Insert<'a, M> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self::with_schema(Schema::global(), dialect)
    }

    pub fn with_schema(schema: &'a Schema, dialect: &'a dyn Dialect) -> Self {
        Self {
            state: State::new::<M>(schema, dialect),
            model: None,
        }
    }

    pub fn values(mut self, model: &'a M) -> Self {
        self.model = Some(model);
        self
    }

    pub fn compile(self) -> Result<CompiledQuery> {
        let mut state = self.state?;
        let model = self.model.ok_or_else(|| {
            Error::invalid_statement(format!("insert into `{}` has no values", state.map.name))
        })?;

        let sql = state.cached(StatementKind::Insert, || render(&state))?;

        let map = state.map.clone();
        for property in map.insertable() {
            state.params.push(property.sql_value_of(model)?);
        }

        Ok(state.finish(&*sql))
    }
}

fn render(state: &State<'_>) -> Result<String> {
    let table = state.table();
    let columns = state
        .map
        .insertable()
        .map(|property| state.column(property))
        .collect::<Vec<_>>();

    let mut sql = if columns.is_empty() {
        format!("insert into {table} default values")
    } else {
        let params = (0..columns.len())
            .map(|i| state.dialect.parameter(&format!("p{i}")))
            .collect::<Vec<_>>();
        format!(
            "insert into {table} ({}) values ({})",
            Comma(&columns),
            Comma(&params)
        )
    };

    if let Some(identity) = state.map.identity() {
        sql.push_str(&state.dialect.identity_clause(&state.column(identity))?);
    }

    Ok(sql)
}

impl<M> fmt::Debug for Insert<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Ok(state) => f
                .debug_struct("Insert")
                .field("model", &state.map.name)
                .field("dialect", &state.dialect.name())
                .field("has_values", &self.model.is_some())
                .finish(),
            Err(err) => f.debug_tuple("Insert").field(err).finish(),
        }
    }
}
