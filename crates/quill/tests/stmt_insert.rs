use pretty_assertions::assert_eq;
use quill::dialect::{Ansi, MySql, Oracle, PostgreSql, SqlServer, Sqlite};
use quill::{compile_insert, Dialect, Insert, Model, ModelBuilder, Schema, Value};

struct Person {
    id: i64,
    name: String,
    age: Option<i32>,
    stamp: i64,
}

impl Model for Person {
    fn describe(model: &mut ModelBuilder<Self>) {
        model.field("Id", |p: &Person| p.id).primary_key().identity();
        model.field("Name", |p: &Person| p.name.clone());
        model.field("Age", |p: &Person| p.age);
        model.field("Stamp", |p: &Person| p.stamp).computed();
    }
}

struct Tag {
    name: String,
}

impl Model for Tag {
    fn describe(model: &mut ModelBuilder<Self>) {
        model
            .field("Name", |t: &Tag| t.name.clone())
            .column("tag_name")
            .primary_key();
    }
}

struct Counter {
    id: i64,
}

impl Model for Counter {
    fn describe(model: &mut ModelBuilder<Self>) {
        model.field("Id", |c: &Counter| c.id).primary_key().identity();
    }
}

fn person() -> Person {
    Person {
        id: 0,
        name: "Ada".into(),
        age: None,
        stamp: 99,
    }
}

fn insert(schema: &Schema, dialect: &dyn Dialect) -> quill::Result<quill::CompiledQuery> {
    let person = person();
    Insert::with_schema(schema, dialect).values(&person).compile()
}

#[test]
fn writes_insertable_columns_in_order() {
    let schema = Schema::builder().build();
    let query = insert(&schema, &SqlServer).unwrap();

    assert_eq!(
        query.sql,
        "insert into [Person] ([Name], [Age]) values (@p0, @p1); select scope_identity()"
    );
    let values: Vec<_> = query.params.iter().collect();
    assert_eq!(values, [("p0", &Value::from("Ada")), ("p1", &Value::Null)]);
}

#[test]
fn identity_clause_per_dialect() {
    let schema = Schema::builder().build();

    assert!(insert(&schema, &Sqlite)
        .unwrap()
        .sql
        .ends_with("values (@p0, @p1); select last_insert_rowid()"));
    assert!(insert(&schema, &MySql)
        .unwrap()
        .sql
        .ends_with("; select last_insert_id()"));
    assert_eq!(
        insert(&schema, &PostgreSql).unwrap().sql,
        "insert into \"Person\" (\"Name\", \"Age\") values (@p0, @p1) returning \"Id\""
    );
}

#[test]
fn identity_requires_dialect_support() {
    let schema = Schema::builder().build();

    assert!(insert(&schema, &Ansi).unwrap_err().is_unsupported_feature());
    assert!(insert(&schema, &Oracle).unwrap_err().is_unsupported_feature());

    // A failed render is not cached.
    assert_eq!(schema.statement_count(), 0);
}

#[test]
fn no_identity_no_suffix() {
    let schema = Schema::builder().build();
    let tag = Tag { name: "rust".into() };
    let query = Insert::with_schema(&schema, &Ansi)
        .values(&tag)
        .compile()
        .unwrap();

    assert_eq!(query.sql, "insert into \"Tag\" (\"tag_name\") values (@p0)");
}

#[test]
fn nothing_insertable_uses_default_values() {
    let schema = Schema::builder().build();
    let counter = Counter { id: 0 };
    let query = Insert::with_schema(&schema, &Sqlite)
        .values(&counter)
        .compile()
        .unwrap();

    assert_eq!(
        query.sql,
        "insert into \"Counter\" default values; select last_insert_rowid()"
    );
    assert!(query.params.is_empty());
}

#[test]
fn text_is_cached_per_dialect() {
    let schema = Schema::builder().build();

    let first = insert(&schema, &SqlServer).unwrap();
    assert_eq!(schema.statement_count(), 1);

    let mut other = person();
    other.name = "Grace".into();
    let second = Insert::with_schema(&schema, &SqlServer)
        .values(&other)
        .compile()
        .unwrap();

    assert_eq!(first.sql, second.sql);
    assert_eq!(second.params.get("p0"), Some(&Value::from("Grace")));
    assert_eq!(schema.statement_count(), 1);

    insert(&schema, &Sqlite).unwrap();
    assert_eq!(schema.statement_count(), 2);
}

#[test]
fn missing_values() {
    let schema = Schema::builder().build();
    let err = Insert::<Person>::with_schema(&schema, &SqlServer)
        .compile()
        .unwrap_err();

    assert!(err.is_invalid_statement());
}

#[test]
fn global_entry_point() {
    let tag = Tag { name: "x".into() };
    let query = compile_insert(&tag, &Sqlite).unwrap();
    assert_eq!(query.sql, "insert into \"Tag\" (\"tag_name\") values (@p0)");
}
