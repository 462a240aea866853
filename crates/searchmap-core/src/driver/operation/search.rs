use super::Operation;
use crate::query::SearchQuery;

#[derive(Debug, Clone)]
pub struct Search {
    /// Index to search
    pub index: String,

    pub query: SearchQuery,
}

impl From<Search> for Operation {
    fn from(value: Search) -> Self {
        Self::Search(value)
    }
}
