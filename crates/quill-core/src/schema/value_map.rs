use crate::stmt::{Enumeration, Value};
use crate::{Error, Result};

/// Translates between field values and the SQL literals stored for them.
///
/// Boolean maps pair `true` and `false` with two literals such as `"Y"` and
/// `"N"`. Enum maps pair each member with its declared literal, or its
/// ordinal when none is declared. Null passes through in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueMap {
    /// Name of the mapped type, used in error messages
    ty: String,

    /// `(field value, SQL literal)` pairs
    entries: Vec<(Value, Value)>,
}

impl ValueMap {
    pub fn new(ty: impl Into<String>, entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self {
            ty: ty.into(),
            entries: entries.into_iter().collect(),
        }
    }

    /// A boolean map from the literals stored for `true` and `false`.
    pub fn bool(true_value: impl Into<Value>, false_value: impl Into<Value>) -> Self {
        Self::new(
            "bool",
            [
                (Value::Bool(true), true_value.into()),
                (Value::Bool(false), false_value.into()),
            ],
        )
    }

    pub fn of_enum<E: Enumeration>() -> Self {
        Self::new(
            E::NAME,
            E::variants().iter().map(|variant| {
                let sql = variant
                    .sql_value()
                    .unwrap_or(Value::I64(variant.ordinal()));
                (Value::Enum(variant.to_value_enum()), sql)
            }),
        )
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> + '_ {
        self.entries.iter().map(|(value, sql)| (value, sql))
    }

    pub fn to_sql(&self, value: &Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        self.entries
            .iter()
            .find(|(candidate, _)| candidate == value)
            .map(|(_, sql)| sql.clone())
            .ok_or_else(|| Error::value_not_mapped(value.clone(), &self.ty))
    }

    pub fn to_clr(&self, sql: &Value) -> Result<Value> {
        if sql.is_null() {
            return Ok(Value::Null);
        }

        self.entries
            .iter()
            .find(|(_, candidate)| candidate == sql)
            .map(|(value, _)| value.clone())
            .ok_or_else(|| Error::value_not_mapped(sql.clone(), &self.ty))
    }

    /// Literal stored for `true`.
    pub fn true_value(&self) -> Result<Value> {
        self.to_sql(&Value::Bool(true))
    }

    /// Literal stored for `false`.
    pub fn false_value(&self) -> Result<Value> {
        self.to_sql(&Value::Bool(false))
    }

    /// Checks that every literal has the same type and that both directions
    /// of the map are unambiguous.
    pub fn verify(&self) -> Result<()> {
        let mut literals = self.entries.iter().map(|(_, sql)| sql);

        if let Some(first) = literals.next() {
            if let Some(other) = literals.find(|sql| sql.ty() != first.ty()) {
                return Err(Error::invalid_schema(format!(
                    "ambiguous SQL value type for `{}`: both {} and {} are used",
                    self.ty,
                    first.ty(),
                    other.ty()
                )));
            }
        }

        for (i, (value, sql)) in self.entries.iter().enumerate() {
            for (other_value, other_sql) in &self.entries[i + 1..] {
                if value == other_value {
                    return Err(Error::invalid_schema(format!(
                        "value {value} is mapped twice for `{}`",
                        self.ty
                    )));
                }

                if sql == other_sql {
                    return Err(Error::invalid_schema(format!(
                        "SQL value {sql} is used twice for `{}`",
                        self.ty
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_map_round_trips() {
        let map = ValueMap::bool("Y", "N");
        assert_eq!(map.true_value().unwrap(), Value::from("Y"));
        assert_eq!(map.false_value().unwrap(), Value::from("N"));

        for value in [true, false] {
            let value = Value::Bool(value);
            assert_eq!(map.to_clr(&map.to_sql(&value).unwrap()).unwrap(), value);
        }
    }

    #[test]
    fn null_passes_through() {
        let map = ValueMap::bool(1i32, 0i32);
        assert_eq!(map.to_sql(&Value::Null).unwrap(), Value::Null);
        assert_eq!(map.to_clr(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn unmapped_literal_names_value_and_type() {
        let map = ValueMap::bool("Y", "N");
        let err = map.to_clr(&Value::from("X")).unwrap_err();
        assert!(err.is_value_not_mapped());
        assert_eq!(err.to_string(), "value \"X\" is not mapped for type `bool`");
    }

    #[test]
    fn mixed_literal_types_are_ambiguous() {
        let err = ValueMap::bool("Y", 0i32).verify().unwrap_err();
        assert!(err.is_invalid_schema());
        assert!(err.to_string().contains("ambiguous SQL value type"));
    }

    #[test]
    fn duplicate_literals_are_rejected() {
        let err = ValueMap::bool("Y", "Y").verify().unwrap_err();
        assert!(err.is_invalid_schema());
    }
}
