use pretty_assertions::assert_eq;
use quill::dialect::{Oracle, SqlServer};
use quill::{compile_delete, Delete, Model, ModelBuilder, Path, Record, Schema, Value};

struct Person {
    id: i64,
    name: String,
    age: Option<i32>,
}

impl Model for Person {
    fn describe(model: &mut ModelBuilder<Self>) {
        model.field("Id", |p: &Person| p.id).primary_key();
        model.field("Name", |p: &Person| p.name.clone());
        model.field("Age", |p: &Person| p.age);
    }
}

struct Event {
    kind: String,
}

impl Model for Event {
    fn describe(model: &mut ModelBuilder<Self>) {
        model.field("Kind", |e: &Event| e.kind.clone());
    }
}

const ID: Path<i64> = Path::new("Id");
const NAME: Path<String> = Path::new("Name");

fn person() -> Person {
    Person {
        id: 4,
        name: "Ada".into(),
        age: None,
    }
}

#[test]
fn by_key() {
    let schema = Schema::builder().build();
    let query = Delete::with_schema(&schema, &SqlServer)
        .by_key(&person())
        .unwrap();

    assert_eq!(query.sql, "delete from [Person] where ([Id] = @p0)");
    assert_eq!(query.params.get("p0"), Some(&Value::I64(4)));
}

#[test]
fn by_key_from_record() {
    let schema = Schema::builder().build();
    let query = Delete::<Person>::with_schema(&schema, &Oracle)
        .by_key(Record::new().with("Id", 9i64))
        .unwrap();

    assert_eq!(query.sql, "delete from \"Person\" where (\"Id\" = :p0)");
    assert_eq!(schema.statement_count(), 1);
}

#[test]
fn by_key_requires_key_value() {
    let schema = Schema::builder().build();
    let err = Delete::<Person>::with_schema(&schema, &SqlServer)
        .by_key(Record::new().with("Name", "x"))
        .unwrap_err();

    assert!(err.is_invalid_statement());
}

#[test]
fn by_key_without_primary_key() {
    let schema = Schema::builder().build();
    let event = Event {
        kind: "boot".into(),
    };
    let err = Delete::with_schema(&schema, &SqlServer)
        .by_key(&event)
        .unwrap_err();

    assert!(err.is_invalid_schema());
    assert_eq!(schema.statement_count(), 0);
}

#[test]
fn filter_by_object_compares_every_field() {
    let schema = Schema::builder().build();
    let query = Delete::with_schema(&schema, &SqlServer)
        .filter_by(&person())
        .compile()
        .unwrap();

    assert_eq!(
        query.sql,
        "delete from [Person] where ([Id] = @p0) and ([Name] = @p1) and ([Age] is null)"
    );
    assert_eq!(query.params.len(), 2);
}

#[test]
fn filter_by_key_ignores_other_fields() {
    let schema = Schema::builder().build();
    let query = Delete::with_schema(&schema, &SqlServer)
        .filter_by_key(&person())
        .compile()
        .unwrap();

    assert_eq!(query.sql, "delete from [Person] where ([Id] = @p0)");
}

#[test]
fn filters_combine_and_keep_numbering() {
    let schema = Schema::builder().build();
    let query = Delete::<Person>::with_schema(&schema, &SqlServer)
        .filter_by(Record::new().with("Name", "Ada"))
        .filter(ID.gt(3i64).or(NAME.ends_with("son")))
        .compile()
        .unwrap();

    assert_eq!(
        query.sql,
        "delete from [Person] where ([Name] = @p0) and (([Id] > @p1) or ([Name] like @p2))"
    );
    assert_eq!(query.params.get("p2"), Some(&Value::from("%son")));
}

#[test]
fn by_key_after_filter() {
    let schema = Schema::builder().build();
    let err = Delete::<Person>::with_schema(&schema, &SqlServer)
        .filter(ID.eq(1i64))
        .by_key(Record::new().with("Id", 1i64))
        .unwrap_err();

    assert!(err.is_invalid_statement());
}

#[test]
fn global_entry_point() {
    let query = compile_delete(&person(), &SqlServer).unwrap();
    assert_eq!(query.sql, "delete from [Person] where ([Id] = @p0)");
}
