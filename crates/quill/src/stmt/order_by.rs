use super::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// One `order by` term: a mapped field and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: &'static str,
    pub direction: Direction,
}

impl OrderBy {
    pub const fn new(field: &'static str, direction: Direction) -> Self {
        Self { field, direction }
    }
}

impl<T> From<Path<T>> for OrderBy {
    fn from(value: Path<T>) -> Self {
        Self::new(value.name(), Direction::Asc)
    }
}
