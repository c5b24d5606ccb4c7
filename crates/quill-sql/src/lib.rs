pub mod compiler;
pub use compiler::{compile_predicate, Compiler};

mod delim;
pub use delim::Comma;

pub mod dialect;
pub use dialect::{Dialect, SelectParts};

mod params;
pub use params::{is_generated, CompiledQuery, Params};

mod registry;
pub use registry::DialectRegistry;
