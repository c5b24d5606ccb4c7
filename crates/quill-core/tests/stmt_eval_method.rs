use quill_core::stmt::{ConstEval, Evaluate, Expr, Record, Value};

fn call(target: impl Into<Expr>, method: &str, args: Vec<Expr>) -> Value {
    Expr::method_call(target.into(), method, args)
        .eval_const()
        .unwrap()
}

#[test]
fn string_methods() {
    assert_eq!(call(" a ", "trim", vec![]), Value::from("a"));
    assert_eq!(call(" a ", "trim_start", vec![]), Value::from("a "));
    assert_eq!(call(" a ", "trim_end", vec![]), Value::from(" a"));
    assert_eq!(call("ab", "to_upper", vec![]), Value::from("AB"));
    assert_eq!(call("AB", "to_lower", vec![]), Value::from("ab"));
    assert_eq!(call("héllo", "len", vec![]), Value::I64(5));
    assert_eq!(
        call("a-b", "replace", vec!["-".into(), "+".into()]),
        Value::from("a+b")
    );
    assert_eq!(
        call("hello", "substring", vec![1i64.into()]),
        Value::from("ello")
    );
    assert_eq!(
        call("hello", "substring", vec![1i64.into(), 3i64.into()]),
        Value::from("ell")
    );
    assert_eq!(
        call("hello", "starts_with", vec!["he".into()]),
        Value::Bool(true)
    );
}

#[test]
fn list_contains() {
    let list = Expr::new_array([Expr::from(1i64), Expr::from(2i32)]);
    assert_eq!(
        call(list.clone(), "contains", vec![2i64.into()]),
        Value::Bool(true)
    );
    assert_eq!(call(list, "len", vec![]), Value::I64(2));
}

#[test]
fn null_target_yields_null() {
    assert_eq!(call(Value::Null, "trim", vec![]), Value::Null);
}

#[test]
fn unknown_method_fails() {
    let err = Expr::method_call(Expr::from("x"), "pad_left", [Expr::from(3i64)])
        .eval_const()
        .unwrap_err();
    assert!(err.is_expression_evaluation_failed());
}

#[test]
fn member_of_constructed_record() {
    let record = Expr::new_record([("a", Expr::from(1i64)), ("b", Expr::from("x"))]);
    assert_eq!(
        Expr::member(record.clone(), "b").eval_const().unwrap(),
        Value::from("x")
    );
    assert_eq!(
        record.eval_const().unwrap(),
        Value::Record(Record::new().with("a", 1i64).with("b", "x"))
    );
}

#[test]
fn lazy_values_are_called_on_evaluation() {
    let expr = Expr::add(Expr::lazy("offset", || 40i64), 2i64);
    assert_eq!(ConstEval.evaluate(&expr).unwrap(), Value::I64(42));
}

#[test]
fn param_is_not_constant() {
    let err = Expr::field("Id").eval_const().unwrap_err();
    assert!(err.is_expression_evaluation_failed());
}

#[test]
fn ordering_null_is_an_error() {
    assert!(Expr::lt(Value::Null, 1i64).eval_const().is_err());
    assert_eq!(
        Expr::eq(Value::Null, Value::Null).eval_const().unwrap(),
        Value::Bool(true)
    );
}
