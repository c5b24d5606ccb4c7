use super::ModelBuilder;

/// A Rust type mapped to a database table.
///
/// Implementations describe the mapping once; the resulting
/// [`ObjectMap`](super::ObjectMap) is built on first use and cached by the
/// [`Schema`](super::Schema).
///
/// ```
/// use quill_core::schema::{Model, ModelBuilder};
///
/// struct Person {
///     id: i64,
///     name: String,
/// }
///
/// impl Model for Person {
///     fn describe(model: &mut ModelBuilder<Self>) {
///         model.field("Id", |p: &Person| p.id).primary_key().identity();
///         model.field("Name", |p: &Person| p.name.clone());
///     }
/// }
/// ```
pub trait Model: Sized + 'static {
    fn describe(model: &mut ModelBuilder<Self>);
}
