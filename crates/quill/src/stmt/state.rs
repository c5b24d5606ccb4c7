use quill_core::schema::{ObjectMap, PropertyMap, StatementKey, StatementKind};
use quill_core::stmt::{ConstEval, Evaluate, Expr, Value};
use quill_core::{Error, Model, Result, Schema};
use quill_sql::{CompiledQuery, Compiler, Dialect, Params};
use std::sync::Arc;

/// What every statement builder carries: the mapped type, the target dialect,
/// the conditions accumulated so far and the parameters they bound.
pub(super) struct State<'a> {
    pub(super) schema: &'a Schema,
    pub(super) dialect: &'a dyn Dialect,
    pub(super) eval: &'a dyn Evaluate,
    pub(super) map: Arc<ObjectMap>,
    pub(super) params: Params,
    conditions: Vec<String>,
}

impl<'a> State<'a> {
    pub(super) fn new<M: Model>(schema: &'a Schema, dialect: &'a dyn Dialect) -> Result<Self> {
        Ok(Self {
            schema,
            dialect,
            eval: &ConstEval,
            map: schema.map_for::<M>()?,
            params: Params::new(),
            conditions: vec![],
        })
    }

    pub(super) fn compiler(&mut self) -> Compiler<'_> {
        Compiler::new(&self.map, self.dialect, &mut self.params).with_evaluator(self.eval)
    }

    /// True until a condition or parameter has been added.
    pub(super) fn is_pristine(&self) -> bool {
        self.conditions.is_empty() && self.params.is_empty()
    }

    pub(super) fn filter_expr(&mut self, expr: &Expr) -> Result<()> {
        let condition = self.compiler().predicate(expr)?;
        self.conditions.push(condition);
        Ok(())
    }

    /// Compares each value with its column. With `key_only`, fields outside
    /// the primary key are skipped.
    pub(super) fn filter_values(
        &mut self,
        values: Vec<(String, Value)>,
        key_only: bool,
    ) -> Result<()> {
        let map = self.map.clone();

        if key_only {
            map.require_primary_key("a filter by primary key")?;
        }

        for (name, value) in values {
            let property = map.expect_property(&name)?;
            if key_only && !property.is_primary_key {
                continue;
            }

            let column = self.column(property);
            let condition = match property.to_sql(value)? {
                Value::Null => format!("({column} is null)"),
                value => format!("({column} = {})", self.bind(value)),
            };
            self.conditions.push(condition);
        }

        Ok(())
    }

    /// Binds the primary key of `values` in key order, for the cached
    /// by-key shapes. Null keys are bound like any other value.
    pub(super) fn bind_key(&mut self, values: Vec<(String, Value)>) -> Result<()> {
        let map = self.map.clone();

        for property in map.primary_key() {
            let value = values
                .iter()
                .find(|(name, _)| *name == property.name)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| {
                    Error::invalid_statement(format!(
                        "missing primary key field `{}.{}`",
                        map.name, property.name
                    ))
                })?;

            self.bind(property.to_sql(value)?);
        }

        Ok(())
    }

    /// Binds `value` under a generated name and returns its placeholder.
    pub(super) fn bind(&mut self, value: Value) -> String {
        let name = self.params.push(value);
        self.dialect.parameter(&name)
    }

    pub(super) fn where_clause(&self) -> Option<String> {
        if self.conditions.is_empty() {
            None
        } else {
            Some(self.conditions.join(" and "))
        }
    }

    pub(super) fn table(&self) -> String {
        self.dialect.escape_identifier(&self.map.table)
    }

    pub(super) fn column(&self, property: &PropertyMap) -> String {
        self.dialect.escape_identifier(&property.column)
    }

    /// Every selectable column, aliased to its field name where the two
    /// differ.
    pub(super) fn default_selection(&self) -> String {
        self.map
            .selectable()
            .map(|property| {
                let column = self.column(property);
                if property.column == property.name {
                    column
                } else {
                    let alias = self.dialect.escape_identifier(&property.name);
                    format!("{column} as {alias}")
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `(<key column> = <placeholder>)` for each primary key column, with
    /// placeholders numbered from `first`.
    pub(super) fn key_predicate(&self, first: usize) -> String {
        self.map
            .primary_key()
            .enumerate()
            .map(|(i, property)| {
                let param = self.dialect.parameter(&format!("p{}", first + i));
                format!("({} = {param})", self.column(property))
            })
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Cached text of one canonical statement shape for this type and
    /// dialect.
    pub(super) fn cached(
        &self,
        kind: StatementKind,
        build: impl FnOnce() -> Result<String>,
    ) -> Result<Arc<str>> {
        let key = StatementKey {
            kind,
            dialect: self.dialect.name().to_string(),
            model: self.map.type_id,
        };
        self.schema.statement(key, build)
    }

    pub(super) fn finish(self, sql: impl Into<String>) -> CompiledQuery {
        let sql = sql.into();
        tracing::trace!(
            model = %self.map.name,
            dialect = self.dialect.name(),
            %sql,
            params = self.params.len(),
            "compiled statement"
        );

        CompiledQuery {
            sql,
            params: self.params,
        }
    }
}

/// Runs `f` against the builder state unless an earlier call already failed.
pub(super) fn apply<T>(state: &mut Result<T>, f: impl FnOnce(&mut T) -> Result<()>) {
    if let Ok(inner) = state {
        if let Err(err) = f(inner) {
            *state = Err(err);
        }
    }
}
