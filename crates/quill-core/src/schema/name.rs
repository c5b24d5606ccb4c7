use heck::{ToShoutySnakeCase, ToSnakeCase};
use std::fmt;

/// Derives table and column names for fields without an explicit override.
pub trait NameResolver: fmt::Debug + Send + Sync {
    fn table_name(&self, model: &str) -> String;

    fn column_name(&self, model: &str, field: &str) -> String;
}

/// Uses the type and field names verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultResolver;

impl NameResolver for DefaultResolver {
    fn table_name(&self, model: &str) -> String {
        model.to_string()
    }

    fn column_name(&self, _model: &str, field: &str) -> String {
        field.to_string()
    }
}

/// Converts type and field names to `snake_case`, or `SHOUTY_SNAKE_CASE` when
/// built with [`SnakeCaseResolver::upper`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SnakeCaseResolver {
    upper: bool,
}

impl SnakeCaseResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upper() -> Self {
        Self { upper: true }
    }

    fn convert(&self, name: &str) -> String {
        if self.upper {
            name.to_shouty_snake_case()
        } else {
            name.to_snake_case()
        }
    }
}

impl NameResolver for SnakeCaseResolver {
    fn table_name(&self, model: &str) -> String {
        self.convert(model)
    }

    fn column_name(&self, _model: &str, field: &str) -> String {
        self.convert(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case() {
        let resolver = SnakeCaseResolver::new();
        assert_eq!(resolver.table_name("CompositeKeyObject"), "composite_key_object");
        assert_eq!(resolver.column_name("Person", "FirstName"), "first_name");
    }

    #[test]
    fn upper_snake_case() {
        let resolver = SnakeCaseResolver::upper();
        assert_eq!(resolver.table_name("IdentityObject"), "IDENTITY_OBJECT");
        assert_eq!(resolver.column_name("IdentityObject", "IdentityID"), "IDENTITY_ID");
    }
}
