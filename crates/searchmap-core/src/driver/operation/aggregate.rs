use super::Operation;
use crate::query::Aggregation;

#[derive(Debug, Clone)]
pub struct Aggregate {
    /// Index to aggregate over
    pub index: String,

    pub aggregation: Aggregation,
}

impl From<Aggregate> for Operation {
    fn from(value: Aggregate) -> Self {
        Self::Aggregate(value)
    }
}
