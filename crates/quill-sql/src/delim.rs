use std::fmt;

/// Comma delimited
///
/// Formats each item of the wrapped iterable, separated by `, `.
pub struct Comma<L>(pub L);

impl<L> fmt::Display for Comma<L>
where
    L: IntoIterator + Clone,
    L::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for item in self.0.clone() {
            write!(f, "{s}{item}")?;
            s = ", ";
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_commas() {
        assert_eq!(Comma(["a", "b", "c"]).to_string(), "a, b, c");
        assert_eq!(Comma(Vec::<String>::new()).to_string(), "");
    }
}
