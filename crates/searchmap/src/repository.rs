use crate::IndexDefinition;

/// Declared operations over one index.
///
/// ```
/// use searchmap::{schema::SourceKind, FieldMapping, IndexDefinition, Repository};
///
/// let definition = IndexDefinition::build(
///     "idx",
///     SourceKind::Json,
///     [FieldMapping::text("$.title", "title").unwrap()],
/// )
/// .unwrap();
///
/// let repository = Repository::new(definition)
///     .query("by_title", "@title:${title}")
///     .aggregation("titles", "$.title AS title");
///
/// assert_eq!(repository.definition().name, "idx");
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    definition: IndexDefinition,
    pub(crate) queries: Vec<Declared>,
}

#[derive(Debug, Clone)]
pub(crate) struct Declared {
    pub(crate) id: String,
    pub(crate) raw: String,
    pub(crate) aggregation: bool,
}

impl Repository {
    pub fn new(definition: IndexDefinition) -> Repository {
        Repository {
            definition,
            queries: vec![],
        }
    }

    /// Declares a search template: a filter query, or a projection list
    /// applied to every document.
    pub fn query(mut self, id: impl Into<String>, raw: impl Into<String>) -> Self {
        self.queries.push(Declared {
            id: id.into(),
            raw: raw.into(),
            aggregation: false,
        });
        self
    }

    /// Declares an aggregation template: a list of paths loaded from every
    /// document.
    pub fn aggregation(mut self, id: impl Into<String>, raw: impl Into<String>) -> Self {
        self.queries.push(Declared {
            id: id.into(),
            raw: raw.into(),
            aggregation: true,
        });
        self
    }

    pub fn definition(&self) -> &IndexDefinition {
        &self.definition
    }
}
