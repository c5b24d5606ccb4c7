use indexmap::IndexMap;
use quill_core::stmt::Value;

/// Parameters bound by a statement, in placeholder order.
///
/// Names are stored without the dialect's prefix. Generated names take the
/// form `p<N>`, numbered from the number of parameters already bound so that
/// fragments compiled into the same statement never collide.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: IndexMap<String, Value>,

    /// Lower bound for the next generated number
    offset: usize,
}

/// SQL text plus the parameters it references.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Params,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generated names start at `p<offset>`.
    pub fn with_offset(offset: usize) -> Self {
        Self {
            values: IndexMap::new(),
            offset,
        }
    }

    /// Binds `value` under a fresh generated name and returns the name.
    pub fn push(&mut self, value: Value) -> String {
        let mut n = self.offset.max(self.values.len());

        loop {
            let name = format!("p{n}");
            n += 1;

            if !self.values.contains_key(&name) {
                self.values.insert(name.clone(), value);
                self.offset = n;
                return name;
            }
        }
    }

    /// Inserts `value` under `name` verbatim, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn into_map(self) -> IndexMap<String, Value> {
        self.values
    }
}

// Two parameter sets are equal when they bind the same names to the same
// values in the same order.
impl PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len() && self.values.iter().eq(other.values.iter())
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
            offset: 0,
        }
    }
}

/// Returns `true` for names of the form `p<digits>`.
pub fn is_generated(name: &str) -> bool {
    name.strip_prefix('p')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_continue_from_count() {
        let mut params = Params::new();
        params.insert("Name", "a".into());
        assert_eq!(params.push(1i64.into()), "p1");
        assert_eq!(params.push(2i64.into()), "p2");
    }

    #[test]
    fn offset_sets_first_number() {
        let mut params = Params::with_offset(5);
        assert_eq!(params.push(Value::Null), "p5");
        assert_eq!(params.push(Value::Null), "p6");
    }

    #[test]
    fn taken_names_are_skipped() {
        let mut params = Params::new();
        params.insert("p1", 1i64.into());
        assert_eq!(params.push(2i64.into()), "p2");
        assert_eq!(params.push(3i64.into()), "p3");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn generated_name_shape() {
        assert!(is_generated("p0"));
        assert!(is_generated("p12"));
        assert!(!is_generated("p"));
        assert!(!is_generated("page"));
        assert!(!is_generated("Id"));
    }
}
