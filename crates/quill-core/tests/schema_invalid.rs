use quill_core::schema::{Model, ModelBuilder, Schema, ValueMap};

struct IdentityWithoutKey {
    id: i64,
}

impl Model for IdentityWithoutKey {
    fn describe(model: &mut ModelBuilder<Self>) {
        model.field("Id", |m: &IdentityWithoutKey| m.id).identity();
    }
}

#[test]
fn identity_requires_primary_key() {
    let schema = Schema::builder().build();
    let err = schema.map_for::<IdentityWithoutKey>().unwrap_err();

    assert!(err.is_invalid_schema());
    assert_eq!(
        err.to_string(),
        "invalid schema: `IdentityWithoutKey.Id` is an identity but not a primary key"
    );

    // A failed build is not cached.
    assert_eq!(schema.map_count(), 0);
    assert!(schema.map_for::<IdentityWithoutKey>().is_err());
}

struct TwoIdentities {
    a: i64,
    b: i64,
}

impl Model for TwoIdentities {
    fn describe(model: &mut ModelBuilder<Self>) {
        model.field("A", |m: &TwoIdentities| m.a).primary_key().identity();
        model.field("B", |m: &TwoIdentities| m.b).primary_key().identity();
    }
}

#[test]
fn at_most_one_identity() {
    let err = Schema::builder()
        .build()
        .map_for::<TwoIdentities>()
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

struct MixedFlag {
    flag: bool,
}

impl Model for MixedFlag {
    fn describe(model: &mut ModelBuilder<Self>) {
        model
            .field("Flag", |m: &MixedFlag| m.flag)
            .value_map(ValueMap::bool("Y", 0i32));
    }
}

#[test]
fn ambiguous_value_map_is_rejected_at_build() {
    let err = Schema::builder().build().map_for::<MixedFlag>().unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("ambiguous SQL value type"));
}

struct DuplicateColumn {
    a: i64,
    b: i64,
}

impl Model for DuplicateColumn {
    fn describe(model: &mut ModelBuilder<Self>) {
        model.field("A", |m: &DuplicateColumn| m.a).column("X");
        model.field("B", |m: &DuplicateColumn| m.b).column("X");
    }
}

#[test]
fn columns_are_unique() {
    let err = Schema::builder()
        .build()
        .map_for::<DuplicateColumn>()
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

struct Keyless {
    name: String,
}

impl Model for Keyless {
    fn describe(model: &mut ModelBuilder<Self>) {
        model.field("Name", |m: &Keyless| m.name.clone());
    }
}

#[test]
fn primary_key_required_on_demand() {
    let schema = Schema::builder().build();
    let map = schema.map_for::<Keyless>().unwrap();

    assert!(!map.has_primary_key());
    let err = map.require_primary_key("delete by key").unwrap_err();
    assert!(err.is_invalid_schema());
    assert_eq!(
        err.to_string(),
        "invalid schema: `Keyless` has no primary key, required by delete by key"
    );
}
