use super::{Dialect, SelectParts};
use quill_core::{Error, Result};

/// Standard SQL with no limiting, paging or identity retrieval.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ansi;

impl Dialect for Ansi {
    fn name(&self) -> &str {
        "ansi"
    }

    fn delimiters(&self) -> (&str, &str) {
        ("\"", "\"")
    }

    fn select_statement(&self, parts: &SelectParts<'_>) -> Result<String> {
        if parts.limit != 0 || parts.is_paged() {
            return Err(Error::unsupported_feature(
                "limit and paging are not supported by the ansi dialect",
            ));
        }

        parts.base()
    }

    fn identity_clause(&self, _column: &str) -> Result<String> {
        Err(Error::unsupported_feature(
            "identity retrieval is not supported by the ansi dialect",
        ))
    }
}
