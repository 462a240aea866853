//! Index schema: nested-document paths, field mappings and index definitions.

mod field;
pub use field::{FieldMapping, FieldType};

mod index;
pub use index::{IndexBuilder, IndexDefinition, SourceKind};

pub mod path;
pub use path::{Path, PathSegment};
