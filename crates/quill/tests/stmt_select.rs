use pretty_assertions::assert_eq;
use quill::dialect::{Ansi, MySql, PostgreSql, SqlServer, SqlServer2012, Sqlite};
use quill::{compile_count, compile_get, Model, ModelBuilder, Path, Schema, Select, Value};

struct Person {
    id: i64,
    name: String,
    age: i32,
    password: String,
}

impl Model for Person {
    fn describe(model: &mut ModelBuilder<Self>) {
        model
            .field("Id", |p: &Person| p.id)
            .column("person_id")
            .primary_key()
            .identity();
        model.field("Name", |p: &Person| p.name.clone());
        model.field("Age", |p: &Person| p.age);
        model
            .field("Password", |p: &Person| p.password.clone())
            .write_only();
    }
}

struct Note {
    text: String,
}

impl Model for Note {
    fn describe(model: &mut ModelBuilder<Self>) {
        model.field("Text", |n: &Note| n.text.clone());
    }
}

const ID: Path<i64> = Path::new("Id");
const NAME: Path<String> = Path::new("Name");
const AGE: Path<i32> = Path::new("Age");

const COLUMNS: &str = "[person_id] as [Id], [Name], [Age]";

fn select(schema: &Schema) -> Select<'_, Person> {
    Select::with_schema(schema, &SqlServer)
}

#[test]
fn default_selection_and_source() {
    let schema = Schema::builder().build();
    let query = select(&schema).compile().unwrap();

    assert_eq!(query.sql, format!("select {COLUMNS} from [Person]"));
    assert!(query.params.is_empty());
}

#[test]
fn filter_and_order() {
    let schema = Schema::builder().build();
    let query = select(&schema)
        .filter(AGE.ge(18))
        .order_by(NAME)
        .order_by(AGE.desc())
        .compile()
        .unwrap();

    assert_eq!(
        query.sql,
        format!("select {COLUMNS} from [Person] where ([Age] >= @p0) order by [Name], [Age] desc")
    );
}

#[test]
fn raw_selection_source_and_grouping() {
    let schema = Schema::builder().build();
    let query = select(&schema)
        .select("[Age], count(*)")
        .from("[dbo].[People]")
        .group_by(AGE)
        .compile()
        .unwrap();

    assert_eq!(
        query.sql,
        "select [Age], count(*) from [dbo].[People] group by [Age]"
    );
}

#[test]
fn limit_uses_top() {
    let schema = Schema::builder().build();
    let query = select(&schema).limit(10).compile().unwrap();
    assert_eq!(query.sql, format!("select top(10) {COLUMNS} from [Person]"));

    let query = Select::<Person>::with_schema(&schema, &PostgreSql)
        .limit(10)
        .compile()
        .unwrap();
    assert!(query.sql.ends_with("from \"Person\" limit 10"));
}

#[test]
fn limit_and_page_are_exclusive() {
    let schema = Schema::builder().build();

    let paged = Select::<Person>::with_schema(&schema, &MySql)
        .limit(5)
        .page(1, 10)
        .compile()
        .unwrap();
    assert!(paged.sql.ends_with("order by `person_id` limit 1, 10"));

    let limited = Select::<Person>::with_schema(&schema, &MySql)
        .page(2, 10)
        .limit(5)
        .compile()
        .unwrap();
    assert!(limited.sql.ends_with("from `Person` limit 5"));
}

#[test]
fn paging_keeps_explicit_order() {
    let schema = Schema::builder().build();
    let query = Select::<Person>::with_schema(&schema, &SqlServer2012)
        .order_by(NAME)
        .page(1, 20)
        .compile()
        .unwrap();

    assert!(query
        .sql
        .ends_with("order by [Name] offset 1 rows fetch next 20 rows only"));
}

#[test]
fn windowed_paging() {
    let schema = Schema::builder().build();
    let query = select(&schema)
        .filter(AGE.gt(1))
        .page(1, 10)
        .compile()
        .unwrap();

    assert_eq!(
        query.sql,
        format!(
            "select * from (select row_number() over (order by [person_id]) as [__row], \
             {COLUMNS} from [Person] where ([Age] > @p0)) as [__paged] \
             where [__row] between 2 and 11"
        )
    );
}

#[test]
fn invalid_page() {
    let schema = Schema::builder().build();

    assert!(select(&schema)
        .page(0, 10)
        .compile()
        .unwrap_err()
        .is_invalid_statement());
    assert!(select(&schema)
        .page(1, 0)
        .compile()
        .unwrap_err()
        .is_invalid_statement());
    assert!(select(&schema)
        .page(1, usize::MAX)
        .compile()
        .unwrap_err()
        .is_invalid_statement());
}

#[test]
fn paging_without_order_needs_primary_key() {
    let schema = Schema::builder().build();
    let err = Select::<Note>::with_schema(&schema, &Sqlite)
        .page(1, 10)
        .compile()
        .unwrap_err();

    assert!(err.is_invalid_schema());
}

#[test]
fn ansi_rejects_limits() {
    let schema = Schema::builder().build();
    let err = Select::<Person>::with_schema(&schema, &Ansi)
        .limit(1)
        .compile()
        .unwrap_err();

    assert!(err.is_unsupported_feature());
}

#[test]
fn unknown_order_field() {
    let schema = Schema::builder().build();
    let err = select(&schema)
        .order_by(Path::<i32>::new("Height"))
        .compile()
        .unwrap_err();

    assert!(err.is_invalid_statement());
}

#[test]
fn count() {
    let schema = Schema::builder().build();

    let all = Select::<Person>::with_schema(&schema, &Sqlite).count().unwrap();
    assert_eq!(all.sql, "select count(*) from \"Person\"");

    let some = select(&schema)
        .filter(NAME.contains("a"))
        .order_by(NAME)
        .limit(3)
        .count()
        .unwrap();
    assert_eq!(
        some.sql,
        "select count(*) from [Person] where ([Name] like @p0)"
    );
    assert_eq!(some.params.get("p0"), Some(&Value::from("%a%")));
}

#[test]
fn by_key() {
    let schema = Schema::builder().build();
    let person = Person {
        id: 3,
        name: String::new(),
        age: 0,
        password: String::new(),
    };

    let query = select(&schema).by_key(&person).unwrap();
    assert_eq!(
        query.sql,
        format!("select {COLUMNS} from [Person] where ([person_id] = @p0)")
    );
    assert_eq!(query.params.get("p0"), Some(&Value::I64(3)));

    select(&schema).by_key(&person).unwrap();
    assert_eq!(schema.statement_count(), 1);

    assert!(select(&schema)
        .limit(1)
        .by_key(&person)
        .unwrap_err()
        .is_invalid_statement());
}

#[test]
fn global_entry_points() {
    let query = compile_count::<Person>(Some(ID.gt(0i64)), &SqlServer).unwrap();
    assert_eq!(
        query.sql,
        "select count(*) from [Person] where ([person_id] > @p0)"
    );

    let query = compile_get::<Person>(quill::Record::new().with("Id", 1i64), &Sqlite).unwrap();
    assert!(query.sql.ends_with("where (\"person_id\" = @p0)"));
}
