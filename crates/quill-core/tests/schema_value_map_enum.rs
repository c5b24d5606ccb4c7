use pretty_assertions::assert_eq;
use quill_core::enum_primitive;
use quill_core::schema::{Model, ModelBuilder, Schema, ValueMap};
use quill_core::stmt::{Enumeration, Primitive, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Active,
    Suspended,
    Closed,
}

impl Enumeration for Status {
    const NAME: &'static str = "Status";

    fn variants() -> &'static [Self] {
        &[Status::Active, Status::Suspended, Status::Closed]
    }

    fn variant_name(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Suspended => "Suspended",
            Status::Closed => "Closed",
        }
    }

    fn ordinal(self) -> i64 {
        self as i64
    }
}

enum_primitive!(Status);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Grade {
    A,
    B,
}

impl Enumeration for Grade {
    const NAME: &'static str = "Grade";

    fn variants() -> &'static [Self] {
        &[Grade::A, Grade::B]
    }

    fn variant_name(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
        }
    }

    fn ordinal(self) -> i64 {
        self as i64
    }

    fn sql_value(self) -> Option<Value> {
        match self {
            Grade::A => Some("a".into()),
            Grade::B => Some(2i64.into()),
        }
    }
}

enum_primitive!(Grade);

#[test]
fn ordinals_are_the_default_literals() {
    let map = ValueMap::of_enum::<Status>();
    map.verify().unwrap();

    assert_eq!(
        map.to_sql(&Status::Suspended.into_value()).unwrap(),
        Value::I64(1)
    );
    assert_eq!(
        map.to_clr(&Value::I64(2)).unwrap(),
        Status::Closed.into_value()
    );
}

#[test]
fn round_trip_over_domain() {
    let map = ValueMap::of_enum::<Status>();

    for status in Status::variants() {
        let value = status.into_value();
        let sql = map.to_sql(&value).unwrap();
        assert_eq!(map.to_clr(&sql).unwrap(), value);
        assert_eq!(map.to_sql(&map.to_clr(&sql).unwrap()).unwrap(), sql);
    }
}

#[test]
fn unmapped_literal() {
    let err = ValueMap::of_enum::<Status>()
        .to_clr(&Value::I64(9))
        .unwrap_err();
    assert!(err.is_value_not_mapped());
    assert_eq!(err.to_string(), "value 9 is not mapped for type `Status`");
}

#[test]
fn mixed_declared_literals_are_ambiguous() {
    let err = ValueMap::of_enum::<Grade>().verify().unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("ambiguous SQL value type for `Grade`"));
}

struct Account {
    id: i64,
    status: Status,
}

impl Model for Account {
    fn describe(model: &mut ModelBuilder<Self>) {
        model.field("Id", |a: &Account| a.id).primary_key();
        model.field("Status", |a: &Account| a.status);
    }
}

#[test]
fn enum_fields_carry_their_map() {
    let schema = Schema::builder().build();
    let map = schema.map_for::<Account>().unwrap();
    let account = Account {
        id: 1,
        status: Status::Closed,
    };

    let status = map.property("Status").unwrap();
    assert_eq!(status.value_map, Some(ValueMap::of_enum::<Status>()));
    assert_eq!(status.sql_value_of(&account).unwrap(), Value::I64(2));
}
