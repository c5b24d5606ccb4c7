use super::ObjectMap;
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    map: &'a ObjectMap,
}

impl ObjectMap {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { map: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_identity_is_primary_key()?;
        self.verify_at_most_one_identity()?;
        self.verify_names_are_unique()?;
        self.verify_value_maps()?;
        Ok(())
    }

    fn verify_identity_is_primary_key(&self) -> Result<()> {
        for property in &self.map.properties {
            if property.is_identity && !property.is_primary_key {
                return Err(Error::invalid_schema(format!(
                    "`{}.{}` is an identity but not a primary key",
                    self.map.name, property.name
                )));
            }
        }

        Ok(())
    }

    fn verify_at_most_one_identity(&self) -> Result<()> {
        let identities = self
            .map
            .properties
            .iter()
            .filter(|property| property.is_identity)
            .count();

        if identities > 1 {
            return Err(Error::invalid_schema(format!(
                "`{}` declares {identities} identity fields; at most one is allowed",
                self.map.name
            )));
        }

        Ok(())
    }

    fn verify_names_are_unique(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut columns = HashSet::new();

        for property in &self.map.properties {
            if !names.insert(&property.name) {
                return Err(Error::invalid_schema(format!(
                    "field `{}` is declared twice on `{}`",
                    property.name, self.map.name
                )));
            }

            if !columns.insert(&property.column) {
                return Err(Error::invalid_schema(format!(
                    "column `{}` is mapped twice on `{}`",
                    property.column, self.map.name
                )));
            }
        }

        Ok(())
    }

    fn verify_value_maps(&self) -> Result<()> {
        for property in &self.map.properties {
            if let Some(value_map) = &property.value_map {
                value_map.verify()?;
            }
        }

        Ok(())
    }
}
