mod aggregate;
pub use aggregate::Aggregate;

mod create_index;
pub use create_index::CreateIndex;

mod drop_index;
pub use drop_index::DropIndex;

mod hset;
pub use hset::HSet;

mod json_set;
pub use json_set::JsonSet;

mod search;
pub use search::Search;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Run an aggregation pipeline
    Aggregate(Aggregate),

    /// Create a search index
    CreateIndex(CreateIndex),

    /// Drop a search index, keeping its documents
    DropIndex(DropIndex),

    /// Write a flat hash document
    HSet(HSet),

    /// Write a JSON document
    JsonSet(JsonSet),

    /// Run a search query
    Search(Search),
}

impl Operation {
    /// Name of the index the operation targets, if any.
    pub fn index(&self) -> Option<&str> {
        match self {
            Operation::Aggregate(op) => Some(&op.index),
            Operation::CreateIndex(op) => Some(&op.definition.name),
            Operation::DropIndex(op) => Some(&op.index),
            Operation::Search(op) => Some(&op.index),
            Operation::HSet(_) | Operation::JsonSet(_) => None,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Operation::Search(_))
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Operation::Aggregate(_))
    }
}
