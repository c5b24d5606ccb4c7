use pretty_assertions::assert_eq;
use quill::dialect::{SqlServer, SqlServer2012, Sqlite};
use quill::schema::SnakeCaseResolver;
use quill::{Delete, Insert, Model, ModelBuilder, Path, Schema, Select, Value, ValueMap};

struct IdentityObject {
    identity_id: i64,
    name: String,
}

impl Model for IdentityObject {
    fn describe(model: &mut ModelBuilder<Self>) {
        model
            .field("IdentityID", |o: &IdentityObject| o.identity_id)
            .column("id")
            .primary_key()
            .identity();
        model.field("Name", |o: &IdentityObject| o.name.clone());
    }
}

struct CompositeKeyObject {
    key1: i32,
    key2: String,
    value: String,
}

impl Model for CompositeKeyObject {
    fn describe(model: &mut ModelBuilder<Self>) {
        model
            .field("Key1", |o: &CompositeKeyObject| o.key1)
            .primary_key();
        model
            .field("Key2", |o: &CompositeKeyObject| o.key2.clone())
            .primary_key();
        model.field("Value", |o: &CompositeKeyObject| o.value.clone());
    }
}

struct YesNoObject {
    id: i64,
    yes_no: bool,
}

impl Model for YesNoObject {
    fn describe(model: &mut ModelBuilder<Self>) {
        model
            .field("Id", |o: &YesNoObject| o.id)
            .primary_key()
            .identity();
        model
            .field("YesNo", |o: &YesNoObject| o.yes_no)
            .value_map(ValueMap::bool("Y", "N"));
    }
}

const IDENTITY_ID: Path<i64> = Path::new("IdentityID");

fn schema() -> Schema {
    Schema::builder()
        .resolver(SnakeCaseResolver::upper())
        .build()
}

#[test]
fn delete_without_filter_deletes_everything() {
    let schema = schema();
    let query = Delete::<CompositeKeyObject>::with_schema(&schema, &SqlServer)
        .compile()
        .unwrap();

    assert_eq!(query.sql, "delete from [COMPOSITE_KEY_OBJECT]");
    assert!(query.params.is_empty());
}

#[test]
fn delete_with_predicate() {
    let schema = schema();
    let query = Delete::<IdentityObject>::with_schema(&schema, &SqlServer)
        .filter(IDENTITY_ID.gt(0i64))
        .compile()
        .unwrap();

    assert_eq!(query.sql, "delete from [IDENTITY_OBJECT] where ([id] > @p0)");
    assert_eq!(query.params.get("p0"), Some(&Value::I64(0)));
    assert_eq!(query.params.len(), 1);
}

#[test]
fn paged_select_with_limit_offset() {
    let schema = schema();
    let query = Select::<IdentityObject>::with_schema(&schema, &Sqlite)
        .filter(IDENTITY_ID.gt(0i64))
        .page(1, 15)
        .compile()
        .unwrap();

    assert_eq!(
        query.sql,
        "select \"id\" as \"IdentityID\", \"NAME\" as \"Name\" from \"IDENTITY_OBJECT\" \
         where (\"id\" > @p0) order by \"id\" limit 1, 15"
    );
}

#[test]
fn paged_select_with_offset_fetch() {
    let schema = schema();
    let query = Select::<IdentityObject>::with_schema(&schema, &SqlServer2012)
        .filter(IDENTITY_ID.gt(0i64))
        .page(1, 15)
        .compile()
        .unwrap();

    assert_eq!(
        query.sql,
        "select [id] as [IdentityID], [NAME] as [Name] from [IDENTITY_OBJECT] \
         where ([id] > @p0) order by [id] offset 1 rows fetch next 15 rows only"
    );
}

#[test]
fn insert_binds_mapped_bool() {
    let schema = schema();
    let object = YesNoObject {
        id: 0,
        yes_no: true,
    };
    let query = Insert::with_schema(&schema, &SqlServer)
        .values(&object)
        .compile()
        .unwrap();

    assert_eq!(
        query.sql,
        "insert into [YES_NO_OBJECT] ([YES_NO]) values (@p0); select scope_identity()"
    );
    assert_eq!(query.params.get("p0"), Some(&Value::from("Y")));
}

#[test]
fn composite_key_delete_by_key() {
    let schema = schema();
    let object = CompositeKeyObject {
        key1: 3,
        key2: "x".into(),
        value: "v".into(),
    };
    let query = Delete::with_schema(&schema, &SqlServer)
        .by_key(&object)
        .unwrap();

    assert_eq!(
        query.sql,
        "delete from [COMPOSITE_KEY_OBJECT] where ([KEY1] = @p0) and ([KEY2] = @p1)"
    );
    let values: Vec<_> = query.params.iter().collect();
    assert_eq!(
        values,
        [("p0", &Value::I32(3)), ("p1", &Value::from("x"))]
    );
}
