#[macro_use]
mod macros;

pub mod driver;
pub use driver::Driver;

mod error;
pub use error::{Error, IntoError};

pub mod query;
pub use query::{Arg, Args, BoundQuery, QueryTemplate};

pub mod schema;
pub use schema::{FieldMapping, IndexDefinition, Path};

mod value;
pub use value::Value;

/// A Result type alias that uses searchmap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
