pub mod db;
pub use db::Db;

pub use searchmap_core::driver;

mod engine;

pub mod load;
pub use load::{Fields, FromValue, Load};

pub mod registry;
pub use registry::{Outcome, Registry};

mod repository;
pub use repository::Repository;

pub mod result;
pub use result::{map_aggregation, map_search, AggregationResult, Document, Row, SearchResult};

pub use searchmap_core::{
    args, bail, err, query, schema, Arg, Args, BoundQuery, Error, FieldMapping, IndexDefinition,
    Path, QueryTemplate, Result, Value,
};
