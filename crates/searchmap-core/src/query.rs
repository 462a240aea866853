//! Declarative query templates, argument binding, and the search and
//! aggregation requests they turn into.

mod aggregate;
pub use aggregate::{AggregateStep, Aggregation, Reducer, ReducerFunc, SortKey};

mod arg;
pub use arg::{Arg, Number};

mod args;
pub use args::Args;

mod bound;
pub use bound::BoundQuery;

pub mod escape;

mod projection;
pub use projection::{ProjectionField, ProjectionSpec};

mod search;
pub use search::{SearchQuery, SortBy};

mod template;
pub use template::{Piece, QueryTemplate, TemplateForm};
