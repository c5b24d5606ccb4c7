mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{Model, Schema};

pub mod stmt;

/// A Result type alias that uses quill's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
