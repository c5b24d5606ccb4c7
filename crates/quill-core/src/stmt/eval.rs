use crate::{
    stmt::{BinaryOp, Expr, ExprMethodCall, Record, UnaryOp, Value},
    Error, Result,
};
use std::cmp::Ordering;

/// Evaluates an expression that does not reference the mapped row.
///
/// The expression compiler hands every subtree it cannot translate, but that
/// is free of column references, to an `Evaluate` implementation and binds
/// the result as a parameter.
pub trait Evaluate {
    fn evaluate(&self, expr: &Expr) -> Result<Value>;
}

/// The built-in evaluator, backed by [`Expr::eval_const`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstEval;

impl Evaluate for ConstEval {
    fn evaluate(&self, expr: &Expr) -> Result<Value> {
        expr.eval_const()
    }
}

impl<F> Evaluate for F
where
    F: Fn(&Expr) -> Result<Value>,
{
    fn evaluate(&self, expr: &Expr) -> Result<Value> {
        self(expr)
    }
}

impl Expr {
    /// Evaluate the expression to a constant value.
    pub fn eval_const(&self) -> Result<Value> {
        match self {
            Expr::BinaryOp(expr) => match expr.op {
                BinaryOp::And => {
                    if !expr.lhs.eval_const_bool()? {
                        return Ok(false.into());
                    }
                    Ok(expr.rhs.eval_const_bool()?.into())
                }
                BinaryOp::Or => {
                    if expr.lhs.eval_const_bool()? {
                        return Ok(true.into());
                    }
                    Ok(expr.rhs.eval_const_bool()?.into())
                }
                op => {
                    let lhs = expr.lhs.eval_const()?;
                    let rhs = expr.rhs.eval_const()?;
                    eval_binary_op(op, lhs, rhs)
                }
            },
            Expr::Lazy(expr) => Ok(expr.call()),
            Expr::Member(expr) => {
                let record = match expr.target.eval_const()? {
                    Value::Record(record) => record,
                    target => {
                        return Err(Error::expression_evaluation_failed(format!(
                            "cannot access member `{}` of {target}",
                            expr.member
                        )))
                    }
                };
                record.get(&expr.member).cloned().ok_or_else(|| {
                    Error::expression_evaluation_failed(format!(
                        "record has no field `{}`",
                        expr.member
                    ))
                })
            }
            Expr::MethodCall(expr) => eval_method_call(expr),
            Expr::New(expr) => {
                let mut record = Record::new();
                for (name, field) in &expr.fields {
                    record.insert(name.clone(), field.eval_const()?);
                }
                Ok(Value::Record(record))
            }
            Expr::NewArray(expr) => Ok(Value::List(
                expr.items
                    .iter()
                    .map(Expr::eval_const)
                    .collect::<Result<_>>()?,
            )),
            Expr::Param => Err(Error::expression_evaluation_failed(
                "the mapped row has no constant value",
            )),
            Expr::UnaryOp(expr) => {
                let value = expr.expr.eval_const()?;
                match (expr.op, value) {
                    (UnaryOp::Not, Value::Bool(v)) => Ok((!v).into()),
                    (UnaryOp::Neg, Value::I32(v)) => {
                        v.checked_neg().map(Value::I32).ok_or_else(neg_overflow)
                    }
                    (UnaryOp::Neg, Value::I64(v)) => {
                        v.checked_neg().map(Value::I64).ok_or_else(neg_overflow)
                    }
                    (UnaryOp::Neg, Value::F64(v)) => Ok(Value::F64(-v)),
                    (_, Value::Null) => Ok(Value::Null),
                    (op, value) => Err(Error::expression_evaluation_failed(format!(
                        "cannot apply `{op}` to {value}"
                    ))),
                }
            }
            Expr::Value(value) => Ok(value.clone()),
        }
    }

    pub fn eval_const_bool(&self) -> Result<bool> {
        self.eval_const()?.to_bool()
    }
}

fn neg_overflow() -> Error {
    Error::expression_evaluation_failed("arithmetic overflow in `-`")
}

fn eval_binary_op(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    match op {
        BinaryOp::Eq => Ok((cmp_values(&lhs, &rhs) == Some(Ordering::Equal)).into()),
        BinaryOp::Ne => Ok((cmp_values(&lhs, &rhs) != Some(Ordering::Equal)).into()),
        BinaryOp::Ge => Ok((cmp_ordered(&lhs, &rhs)? != Ordering::Less).into()),
        BinaryOp::Gt => Ok((cmp_ordered(&lhs, &rhs)? == Ordering::Greater).into()),
        BinaryOp::Le => Ok((cmp_ordered(&lhs, &rhs)? != Ordering::Greater).into()),
        BinaryOp::Lt => Ok((cmp_ordered(&lhs, &rhs)? == Ordering::Less).into()),
        BinaryOp::And | BinaryOp::Or => Ok(match op {
            BinaryOp::And => lhs.to_bool()? && rhs.to_bool()?,
            _ => lhs.to_bool()? || rhs.to_bool()?,
        }
        .into()),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            eval_arithmetic(op, lhs, rhs)
        }
    }
}

fn eval_arithmetic(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    let overflow = || Error::expression_evaluation_failed(format!("arithmetic overflow in `{op}`"));

    match (lhs, rhs) {
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        (Value::String(lhs), Value::String(rhs)) if op == BinaryOp::Add => {
            Ok(Value::String(lhs + &rhs))
        }
        (Value::I32(lhs), Value::I32(rhs)) => {
            let ret = match op {
                BinaryOp::Add => lhs.checked_add(rhs),
                BinaryOp::Sub => lhs.checked_sub(rhs),
                BinaryOp::Mul => lhs.checked_mul(rhs),
                BinaryOp::Div => lhs.checked_div(rhs),
                _ => lhs.checked_rem(rhs),
            };
            ret.map(Value::I32).ok_or_else(overflow)
        }
        (lhs, rhs) => {
            if let (Some(lhs), Some(rhs)) = (lhs.as_i64(), rhs.as_i64()) {
                let ret = match op {
                    BinaryOp::Add => lhs.checked_add(rhs),
                    BinaryOp::Sub => lhs.checked_sub(rhs),
                    BinaryOp::Mul => lhs.checked_mul(rhs),
                    BinaryOp::Div => lhs.checked_div(rhs),
                    _ => lhs.checked_rem(rhs),
                };
                return ret.map(Value::I64).ok_or_else(overflow);
            }

            let (Some(lhs), Some(rhs)) = (as_f64(&lhs), as_f64(&rhs)) else {
                return Err(Error::expression_evaluation_failed(format!(
                    "cannot apply `{op}` to {lhs} and {rhs}"
                )));
            };
            Ok(Value::F64(match op {
                BinaryOp::Add => lhs + rhs,
                BinaryOp::Sub => lhs - rhs,
                BinaryOp::Mul => lhs * rhs,
                BinaryOp::Div => lhs / rhs,
                _ => lhs % rhs,
            }))
        }
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::F64(v) => Some(*v),
        other => other.as_i64().map(|v| v as f64),
    }
}

/// Compare two values, treating integers of different widths and floats as
/// numbers. Returns `None` when the values are not comparable.
fn cmp_values(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(lhs), Value::Bool(rhs)) => Some(lhs.cmp(rhs)),
        (Value::String(lhs), Value::String(rhs)) => Some(lhs.cmp(rhs)),
        (Value::Enum(lhs), Value::Enum(rhs)) if lhs.ty == rhs.ty => {
            Some(lhs.ordinal.cmp(&rhs.ordinal))
        }
        (lhs, rhs) if lhs.ty().is_numeric() && rhs.ty().is_numeric() => {
            match (lhs.as_i64(), rhs.as_i64()) {
                (Some(lhs), Some(rhs)) => Some(lhs.cmp(&rhs)),
                _ => as_f64(lhs)?.partial_cmp(&as_f64(rhs)?),
            }
        }
        (lhs, rhs) => (lhs == rhs).then_some(Ordering::Equal),
    }
}

fn cmp_ordered(lhs: &Value, rhs: &Value) -> Result<Ordering> {
    if lhs.is_null() || rhs.is_null() {
        return Err(Error::expression_evaluation_failed(
            "cannot order a null value",
        ));
    }

    cmp_values(lhs, rhs).ok_or_else(|| {
        Error::expression_evaluation_failed(format!("cannot compare {lhs} with {rhs}"))
    })
}

fn eval_method_call(expr: &ExprMethodCall) -> Result<Value> {
    let target = expr
        .target
        .as_deref()
        .map(Expr::eval_const)
        .transpose()?;
    let args = expr
        .args
        .iter()
        .map(Expr::eval_const)
        .collect::<Result<Vec<_>>>()?;

    let unknown = || {
        Error::expression_evaluation_failed(format!(
            "cannot evaluate `{}` with arguments {}",
            expr.method,
            Value::List(args.clone())
        ))
    };

    let Some(target) = target else {
        return Err(unknown());
    };

    if let Value::List(items) = &target {
        return match (expr.method.as_str(), &args[..]) {
            ("contains", [item]) => Ok(items
                .iter()
                .any(|candidate| cmp_values(candidate, item) == Some(Ordering::Equal))
                .into()),
            ("len", []) => Ok(Value::I64(items.len() as i64)),
            _ => Err(unknown()),
        };
    }

    if target.is_null() {
        return Ok(Value::Null);
    }

    let Some(s) = target.as_str() else {
        return Err(unknown());
    };

    let arg_str = |i: usize| args.get(i).and_then(Value::as_str).ok_or_else(unknown);
    let arg_usize = |i: usize| {
        args.get(i)
            .and_then(Value::as_i64)
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(unknown)
    };

    let ret: Value = match (expr.method.as_str(), args.len()) {
        ("trim", 0) => s.trim().into(),
        ("trim_start", 0) => s.trim_start().into(),
        ("trim_end", 0) => s.trim_end().into(),
        ("to_upper", 0) => s.to_uppercase().into(),
        ("to_lower", 0) => s.to_lowercase().into(),
        ("len", 0) => Value::I64(s.chars().count() as i64),
        ("replace", 2) => s.replace(arg_str(0)?, arg_str(1)?).into(),
        ("starts_with", 1) => s.starts_with(arg_str(0)?).into(),
        ("ends_with", 1) => s.ends_with(arg_str(0)?).into(),
        ("contains", 1) => s.contains(arg_str(0)?).into(),
        ("substring", 1) => s.chars().skip(arg_usize(0)?).collect::<String>().into(),
        ("substring", 2) => s
            .chars()
            .skip(arg_usize(0)?)
            .take(arg_usize(1)?)
            .collect::<String>()
            .into(),
        _ => return Err(unknown()),
    };

    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_width_integers_compare_numerically() {
        assert_eq!(
            Expr::eq(1i32, 1i64).eval_const().unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            Expr::lt(1i32, 2.5f64).eval_const().unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn and_short_circuits() {
        // The rhs would fail to evaluate if it were reached.
        let expr = Expr::and(false, Expr::field("Name"));
        assert_eq!(expr.eval_const().unwrap(), Value::Bool(false));
    }

    #[test]
    fn integer_overflow_is_an_error() {
        let err = Expr::add(i32::MAX, 1i32).eval_const().unwrap_err();
        assert!(err.is_expression_evaluation_failed());
    }

    #[test]
    fn negating_the_minimum_integer_is_an_error() {
        let err = Expr::neg(i32::MIN).eval_const().unwrap_err();
        assert!(err.is_expression_evaluation_failed());

        let err = Expr::neg(i64::MIN).eval_const().unwrap_err();
        assert!(err.is_expression_evaluation_failed());

        assert_eq!(Expr::neg(-5i64).eval_const().unwrap(), Value::I64(5));
    }

    #[test]
    fn closures_are_evaluators() {
        let eval = |_: &Expr| -> Result<Value> { Ok(Value::from(7i64)) };
        assert_eq!(eval.evaluate(&Expr::Param).unwrap(), Value::I64(7));
    }
}
