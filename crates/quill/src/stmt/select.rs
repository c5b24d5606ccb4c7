use super::{apply, Direction, Expr, IntoValues, OrderBy, Path, State};
use quill_core::schema::StatementKind;
use quill_core::stmt::Evaluate;
use quill_core::{Error, Model, Result, Schema};
use quill_sql::{CompiledQuery, Comma, Dialect, SelectParts};
use std::marker::PhantomData;

/// Builds a `select` statement.
///
/// Unless overridden, the selection is every selectable column aliased to
/// its field name and the source is the mapped table. [`limit`](Self::limit)
/// and [`page`](Self::page) are exclusive: setting one clears the other.
/// Paging without an explicit order sorts by the primary key.
pub struct Select<'a, M> {
    inner: Result<Inner<'a>>,
    _p: PhantomData<fn(&M)>,
}

struct Inner<'a> {
    state: State<'a>,
    selection: Option<String>,
    source: Option<String>,
    order: Vec<OrderBy>,
    grouping: Vec<&'static str>,
    limit: usize,

    /// One-based page number and page size
    page: Option<(usize, usize)>,
}

impl<'a, M: Model> Select<'a, M> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self::with_schema(Schema::global(), dialect)
    }

    pub fn with_schema(schema: &'a Schema, dialect: &'a dyn Dialect) -> Self {
        Self {
            inner: State::new::<M>(schema, dialect).map(|state| Inner {
                state,
                selection: None,
                source: None,
                order: vec![],
                grouping: vec![],
                limit: 0,
                page: None,
            }),
            _p: PhantomData,
        }
    }

    pub fn with_evaluator(mut self, eval: &'a dyn Evaluate) -> Self {
        if let Ok(inner) = &mut self.inner {
            inner.state.eval = eval;
        }
        self
    }

    pub fn filter(mut self, filter: Expr<bool>) -> Self {
        apply(&mut self.inner, |inner| inner.state.filter_expr(&filter.untyped));
        self
    }

    pub fn filter_by(mut self, values: impl IntoValues<M>) -> Self {
        apply(&mut self.inner, |inner| {
            let values = values.into_values(&inner.state.map)?;
            inner.state.filter_values(values, false)
        });
        self
    }

    pub fn filter_by_key(mut self, values: impl IntoValues<M>) -> Self {
        apply(&mut self.inner, |inner| {
            let values = values.into_values(&inner.state.map)?;
            inner.state.filter_values(values, true)
        });
        self
    }

    /// Replaces the default selection with raw SQL.
    pub fn select(mut self, selection: impl Into<String>) -> Self {
        if let Ok(inner) = &mut self.inner {
            inner.selection = Some(selection.into());
        }
        self
    }

    /// Replaces the mapped table with a raw SQL source.
    pub fn from(mut self, source: impl Into<String>) -> Self {
        if let Ok(inner) = &mut self.inner {
            inner.source = Some(source.into());
        }
        self
    }

    pub fn order_by(mut self, order_by: impl Into<OrderBy>) -> Self {
        if let Ok(inner) = &mut self.inner {
            inner.order.push(order_by.into());
        }
        self
    }

    pub fn group_by<T>(mut self, path: Path<T>) -> Self {
        if let Ok(inner) = &mut self.inner {
            inner.grouping.push(path.name());
        }
        self
    }

    /// Returns at most `limit` rows. Clears any paging.
    pub fn limit(mut self, limit: usize) -> Self {
        if let Ok(inner) = &mut self.inner {
            inner.limit = limit;
            inner.page = None;
        }
        self
    }

    /// Returns page `page`, counted from one, of `per_page` rows. Clears any
    /// limit.
    pub fn page(mut self, page: usize, per_page: usize) -> Self {
        apply(&mut self.inner, |inner| {
            if page == 0 || per_page == 0 {
                return Err(Error::invalid_statement(format!(
                    "invalid page {page} of {per_page} rows; pages and page sizes start at 1"
                )));
            }

            inner.page = Some((page, per_page));
            inner.limit = 0;
            Ok(())
        });
        self
    }

    pub fn compile(self) -> Result<CompiledQuery> {
        let inner = self.inner?;
        let state = &inner.state;

        let selection = match &inner.selection {
            Some(selection) => selection.clone(),
            None => state.default_selection(),
        };
        let source = inner.source.clone().unwrap_or_else(|| state.table());
        let conditions = state.where_clause();
        let grouping = inner.grouping()?;
        let order = inner.order()?;

        let (offset, fetch) = match inner.page {
            Some((page, per_page)) => {
                let offset = (page - 1)
                    .checked_mul(per_page)
                    .and_then(|skipped| skipped.checked_add(1))
                    .ok_or_else(|| {
                        Error::invalid_statement(format!("page {page} is out of range"))
                    })?;
                (offset, per_page)
            }
            None => (0, 0),
        };

        let sql = state.dialect.select_statement(&SelectParts {
            selection: &selection,
            source: &source,
            conditions: conditions.as_deref(),
            order: order.as_deref(),
            grouping: grouping.as_deref(),
            limit: inner.limit,
            offset,
            fetch,
        })?;

        Ok(inner.state.finish(sql))
    }

    /// `select count(*)` over the filtered source. Order, limit and paging
    /// are ignored.
    pub fn count(self) -> Result<CompiledQuery> {
        let inner = self.inner?;
        let state = &inner.state;

        let source = inner.source.clone().unwrap_or_else(|| state.table());
        let conditions = state.where_clause();

        let sql = state.dialect.select_statement(&SelectParts {
            selection: "count(*)",
            source: &source,
            conditions: conditions.as_deref(),
            ..SelectParts::default()
        })?;

        Ok(inner.state.finish(sql))
    }

    /// Selects the row whose primary key equals the key fields of `key`.
    pub fn by_key(self, key: impl IntoValues<M>) -> Result<CompiledQuery> {
        let mut inner = self.inner?;

        if !inner.is_pristine() {
            return Err(Error::invalid_statement(
                "a select by primary key cannot be combined with other clauses",
            ));
        }

        let state = &inner.state;
        let sql = state.cached(StatementKind::SelectByKey, || {
            state.map.require_primary_key("a select by primary key")?;
            let conditions = state.key_predicate(0);

            state.dialect.select_statement(&SelectParts {
                selection: &state.default_selection(),
                source: &state.table(),
                conditions: Some(&conditions),
                ..SelectParts::default()
            })
        })?;

        let values = key.into_values(&inner.state.map)?;
        inner.state.bind_key(values)?;

        Ok(inner.state.finish(&*sql))
    }
}

impl Inner<'_> {
    fn is_pristine(&self) -> bool {
        self.state.is_pristine()
            && self.selection.is_none()
            && self.source.is_none()
            && self.order.is_empty()
            && self.grouping.is_empty()
            && self.limit == 0
            && self.page.is_none()
    }

    fn grouping(&self) -> Result<Option<String>> {
        if self.grouping.is_empty() {
            return Ok(None);
        }

        let columns = self
            .grouping
            .iter()
            .map(|name| {
                let property = self.state.map.expect_property(name)?;
                Ok(self.state.column(property))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Comma(&columns).to_string()))
    }

    /// Explicit order terms, or the primary key when paging without one.
    fn order(&self) -> Result<Option<String>> {
        let map = &self.state.map;

        let terms = if !self.order.is_empty() {
            self.order
                .iter()
                .map(|order_by| {
                    let column = self.state.column(map.expect_property(order_by.field)?);
                    Ok(match order_by.direction {
                        Direction::Asc => column,
                        Direction::Desc => format!("{column} desc"),
                    })
                })
                .collect::<Result<Vec<_>>>()?
        } else if self.page.is_some() {
            map.require_primary_key("paging without an explicit order")?;
            map.primary_key()
                .map(|property| self.state.column(property))
                .collect()
        } else {
            return Ok(None);
        };

        Ok(Some(Comma(&terms).to_string()))
    }
}
