mod method;

use crate::{CompiledQuery, Dialect, Params};
use quill_core::schema::{ObjectMap, PropertyMap};
use quill_core::stmt::{BinaryOp, ConstEval, Evaluate, Expr, ExprBinaryOp, ExprUnaryOp, UnaryOp, Value};
use quill_core::{Error, Result};

/// Translates predicate and assignment expressions over one mapped type into
/// SQL fragments.
///
/// Column references become escaped identifiers. Every constant becomes a
/// freshly numbered parameter in the shared [`Params`]; constants are never
/// inlined, with the single exception of the literals a value map supplies
/// when a bare boolean column is used as a predicate. Subtrees that do not
/// reference the mapped row are evaluated eagerly with the configured
/// [`Evaluate`] implementation.
pub struct Compiler<'a> {
    map: &'a ObjectMap,
    dialect: &'a dyn Dialect,
    eval: &'a dyn Evaluate,
    params: &'a mut Params,
}

/// Intermediate result of compiling one node.
enum Compiled<'a> {
    /// A mapped column, not yet rendered
    Column(&'a PropertyMap),

    /// A value not yet bound
    Constant(Value),

    /// A rendered fragment
    Sql(String),
}

/// Compiles `expr` as a predicate, numbering parameters from `offset`.
pub fn compile_predicate(
    expr: &Expr,
    map: &ObjectMap,
    dialect: &dyn Dialect,
    offset: usize,
) -> Result<CompiledQuery> {
    let mut params = Params::with_offset(offset);
    let sql = Compiler::new(map, dialect, &mut params).predicate(expr)?;
    Ok(CompiledQuery { sql, params })
}

impl<'a> Compiler<'a> {
    pub fn new(map: &'a ObjectMap, dialect: &'a dyn Dialect, params: &'a mut Params) -> Self {
        Self {
            map,
            dialect,
            eval: &ConstEval,
            params,
        }
    }

    /// Uses `eval` for constant subtrees instead of [`ConstEval`].
    pub fn with_evaluator(mut self, eval: &'a dyn Evaluate) -> Self {
        self.eval = eval;
        self
    }

    /// Compiles a boolean expression to a condition.
    pub fn predicate(&mut self, expr: &Expr) -> Result<String> {
        let compiled = self.compile(expr)?;
        self.to_predicate(compiled, expr)
    }

    /// Compiles an expression to a value.
    pub fn value(&mut self, expr: &Expr) -> Result<String> {
        let compiled = self.compile(expr)?;
        self.render(compiled)
    }

    /// Compiles the value assigned to `property`, translating a constant
    /// result through the property's value map.
    pub fn assignment(&mut self, property: &PropertyMap, expr: &Expr) -> Result<String> {
        match self.compile(expr)? {
            Compiled::Constant(value) => {
                let value = property.to_sql(value)?;
                Ok(self.bind(value))
            }
            compiled => self.render(compiled),
        }
    }

    fn compile(&mut self, expr: &Expr) -> Result<Compiled<'a>> {
        let map = self.map;

        match expr {
            Expr::Value(value) => Ok(Compiled::Constant(value.clone())),
            Expr::Member(member) if member.target.is_param() => {
                Ok(Compiled::Column(map.expect_property(&member.member)?))
            }
            _ if !expr.references_param() => self.fold(expr),
            Expr::BinaryOp(binary) if binary.op.is_logical() => self.logical(binary),
            Expr::BinaryOp(binary) => self.binary(binary),
            Expr::UnaryOp(unary) => self.unary(unary),
            Expr::MethodCall(call) => self.method_call(expr, call),
            _ => Err(Error::unsupported_expression(expr)),
        }
    }

    fn fold(&mut self, expr: &Expr) -> Result<Compiled<'a>> {
        let value = self
            .eval
            .evaluate(expr)
            .map_err(|err| err.context(Error::unsupported_expression(expr)))?;

        tracing::trace!(%expr, %value, "folded constant subtree");
        Ok(Compiled::Constant(value))
    }

    fn logical(&mut self, expr: &ExprBinaryOp) -> Result<Compiled<'a>> {
        let lhs = self.predicate(&expr.lhs)?;
        let rhs = self.predicate(&expr.rhs)?;
        let op = match expr.op {
            BinaryOp::And => "and",
            _ => "or",
        };

        Ok(Compiled::Sql(format!("({lhs} {op} {rhs})")))
    }

    fn binary(&mut self, expr: &ExprBinaryOp) -> Result<Compiled<'a>> {
        let mut lhs = self.compile(&expr.lhs)?;
        let mut rhs = self.compile(&expr.rhs)?;

        // A constant compared with a mapped column takes the column's SQL form.
        if let (Compiled::Column(column), Compiled::Constant(value)) = (&lhs, &mut rhs) {
            coerce(column, value)?;
        }
        if let (Compiled::Constant(value), Compiled::Column(column)) = (&mut lhs, &rhs) {
            coerce(column, value)?;
        }

        let null_test = match expr.op {
            BinaryOp::Eq => Some("is null"),
            BinaryOp::Ne => Some("is not null"),
            _ => None,
        };

        if let Some(test) = null_test {
            match (lhs, rhs) {
                (operand, Compiled::Constant(Value::Null))
                | (Compiled::Constant(Value::Null), operand) => {
                    let operand = self.render(operand)?;
                    return Ok(Compiled::Sql(format!("({operand} {test})")));
                }
                (l, r) => {
                    lhs = l;
                    rhs = r;
                }
            }
        }

        let lhs = self.render(lhs)?;
        let rhs = self.render(rhs)?;
        Ok(Compiled::Sql(format!("({lhs} {} {rhs})", sql_op(expr.op))))
    }

    fn unary(&mut self, expr: &ExprUnaryOp) -> Result<Compiled<'a>> {
        match (expr.op, self.compile(&expr.expr)?) {
            (UnaryOp::Not, Compiled::Column(column)) if column.ty.is_bool() => {
                Ok(Compiled::Sql(self.bool_column(column, false)?))
            }
            (UnaryOp::Not, operand) => {
                let operand = self.to_predicate(operand, &expr.expr)?;
                Ok(Compiled::Sql(format!("not {operand}")))
            }
            (UnaryOp::Neg, operand) => {
                let operand = self.render(operand)?;
                Ok(Compiled::Sql(format!("(-{operand})")))
            }
        }
    }

    fn to_predicate(&mut self, compiled: Compiled<'_>, expr: &Expr) -> Result<String> {
        match compiled {
            Compiled::Column(column) if column.ty.is_bool() => self.bool_column(column, true),
            // A constant truth value is not a predicate in every dialect, so it
            // renders as an always true or always false comparison.
            Compiled::Constant(Value::Bool(true)) => Ok("(1 = 1)".to_string()),
            Compiled::Constant(Value::Bool(false)) => Ok("(1 = 0)".to_string()),
            Compiled::Sql(sql) => Ok(sql),
            _ => Err(Error::invalid_statement(format!(
                "`{expr}` is not a boolean predicate"
            ))),
        }
    }

    /// `(col = <literal>)` for a bare boolean column, using the column's
    /// value map when it has one.
    fn bool_column(&self, column: &PropertyMap, value: bool) -> Result<String> {
        let literal = column.to_sql(Value::Bool(value))?;

        Ok(format!(
            "({} = {})",
            self.dialect.escape_identifier(&column.column),
            self.dialect.format_literal(&literal)?
        ))
    }

    fn render(&mut self, compiled: Compiled<'_>) -> Result<String> {
        Ok(match compiled {
            Compiled::Column(column) => self.dialect.escape_identifier(&column.column),
            Compiled::Constant(value) => self.bind(value),
            Compiled::Sql(sql) => sql,
        })
    }

    fn bind(&mut self, value: Value) -> String {
        let name = self.params.push(value);
        self.dialect.parameter(&name)
    }
}

fn coerce(column: &PropertyMap, value: &mut Value) -> Result<()> {
    if let Some(value_map) = &column.value_map {
        *value = value_map.to_sql(value)?;
    }

    Ok(())
}

fn sql_op(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Eq => "=",
        BinaryOp::Ne => "<>",
        BinaryOp::Ge => ">=",
        BinaryOp::Gt => ">",
        BinaryOp::Le => "<=",
        BinaryOp::Lt => "<",
        BinaryOp::And => "and",
        BinaryOp::Or => "or",
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Rem => "%",
    }
}
