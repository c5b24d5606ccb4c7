use quill_core::{Error, Result};
use quill_sql::{is_generated, CompiledQuery, Dialect, Params};

/// Combines independently compiled statements into one multi-statement
/// query.
///
/// Each statement numbers its generated parameters from `p0`, so the
/// generated names of the n-th statement are renamed with a letter suffix
/// (`a`, `b`, ..., `z`, `aa`, `ab`, ...). Names chosen by the caller are
/// kept; the same name may appear in several statements only when it is
/// bound to the same value.
#[derive(Debug)]
pub struct Batch<'a> {
    dialect: &'a dyn Dialect,
    statements: Vec<CompiledQuery>,
}

impl<'a> Batch<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            statements: vec![],
        }
    }

    pub fn push(&mut self, statement: CompiledQuery) -> &mut Self {
        self.statements.push(statement);
        self
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn compile(self) -> Result<CompiledQuery> {
        if self.statements.is_empty() {
            return Err(Error::invalid_statement("a batch needs at least one statement"));
        }

        let mut texts = Vec::with_capacity(self.statements.len());
        let mut params = Params::new();

        for (i, statement) in self.statements.into_iter().enumerate() {
            let suffix = suffix(i);
            texts.push(rename(self.dialect, &statement, &suffix));

            for (name, value) in statement.params {
                let name = if is_generated(&name) {
                    format!("{name}{suffix}")
                } else {
                    name
                };

                match params.get(&name) {
                    Some(existing) if *existing != value => {
                        return Err(Error::invalid_statement(format!(
                            "parameter `{name}` is bound to both {existing} and {value}"
                        )));
                    }
                    Some(_) => {}
                    None => {
                        params.insert(name, value);
                    }
                }
            }
        }

        let sql = texts.join(self.dialect.statement_separator());
        tracing::trace!(
            statements = texts.len(),
            %sql,
            params = params.len(),
            "combined statements"
        );

        Ok(CompiledQuery { sql, params })
    }
}

/// `0 -> a`, `25 -> z`, `26 -> aa`, `27 -> ab`, ...
fn suffix(mut n: usize) -> String {
    let mut letters = vec![];
    loop {
        letters.push(char::from(b'a' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Appends `suffix` to every generated placeholder of `statement`, leaving
/// string literals untouched.
fn rename(dialect: &dyn Dialect, statement: &CompiledQuery, suffix: &str) -> String {
    let prefix = dialect.parameter_prefix();
    let sql = statement.sql.as_str();
    let mut dst = String::with_capacity(sql.len() + statement.params.len() * suffix.len());
    let mut quoted = false;
    let mut rest = sql;

    while let Some(c) = rest.chars().next() {
        if c == '\'' {
            quoted = !quoted;
        } else if !quoted && !prefix.is_empty() && rest.starts_with(prefix) {
            let after = &rest[prefix.len()..];
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..len];

            dst.push_str(prefix);
            dst.push_str(name);
            if is_generated(name) && statement.params.contains(name) {
                dst.push_str(suffix);
            }

            rest = &after[len..];
            continue;
        }

        dst.push(c);
        rest = &rest[c.len_utf8()..];
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_continue_past_z() {
        assert_eq!(suffix(0), "a");
        assert_eq!(suffix(25), "z");
        assert_eq!(suffix(26), "aa");
        assert_eq!(suffix(27), "ab");
        assert_eq!(suffix(26 + 26 * 26), "aaa");
    }
}
