use crate::{Fields, Value};

use searchmap_core::driver::Properties;

/// Matching documents of a search, in reply order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Number of matching documents, which may exceed `docs.len()` when a
    /// limit applies
    pub total: u64,

    pub docs: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,

    /// Relevance score; `1.0` unless scores were requested
    pub score: f64,

    pub payload: Option<Vec<u8>>,

    pub properties: Properties,
}

impl SearchResult {
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }
}

impl IntoIterator for SearchResult {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.into_iter()
    }
}

impl Document {
    pub fn get(&self, alias: &str) -> Option<&Value> {
        self.properties.get(alias)
    }

    pub fn contains_key(&self, alias: &str) -> bool {
        self.properties.contains_key(alias)
    }

    /// The string value of `alias`, if present and a string.
    pub fn get_str(&self, alias: &str) -> Option<&str> {
        self.get(alias).and_then(Value::as_str)
    }

    pub fn fields(&self) -> Fields<'_> {
        Fields::new(&self.properties)
    }
}
