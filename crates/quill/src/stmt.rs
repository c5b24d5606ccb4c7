mod delete;
pub use delete::Delete;

mod expr;
pub use expr::{Expr, Numeric};

mod insert;
pub use insert::Insert;

mod into_expr;
pub use into_expr::IntoExpr;

mod order_by;
pub use order_by::{Direction, OrderBy};

mod path;
pub use path::Path;

mod select;
pub use select::Select;

mod state;
use state::{apply, State};

mod update;
pub use update::Update;

mod values;
pub use values::IntoValues;
