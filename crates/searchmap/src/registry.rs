//! Parsed templates keyed by operation id.

use crate::{
    repository::Repository, AggregationResult, Error, IndexDefinition, QueryTemplate, Result,
    SearchResult,
};

use indexmap::IndexMap;
use std::sync::Arc;

/// Every declared operation, parsed once when the [`Db`](crate::Db) is
/// built.
#[derive(Debug, Default)]
pub struct Registry {
    indexes: IndexMap<String, IndexDefinition>,
    queries: IndexMap<String, Registered>,
}

/// A parsed template and the index it runs against.
#[derive(Debug, Clone)]
pub struct Registered {
    pub index: String,
    pub template: Arc<QueryTemplate>,
}

/// Result of [`Db::call`](crate::Db::call), shaped by the template form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Search(SearchResult),
    Aggregate(AggregationResult),
}

impl Registry {
    pub(crate) fn build(repositories: &[Repository]) -> Result<Registry> {
        let mut registry = Registry::default();

        for repository in repositories {
            let definition = repository.definition();

            if registry.indexes.contains_key(&definition.name) {
                return Err(Error::invalid_schema(format!(
                    "index `{}` is declared by more than one repository",
                    definition.name
                )));
            }

            registry
                .indexes
                .insert(definition.name.clone(), definition.clone());

            for declared in &repository.queries {
                if registry.queries.contains_key(&declared.id) {
                    return Err(Error::invalid_schema(format!(
                        "operation `{}` is declared more than once",
                        declared.id
                    )));
                }

                let template = if declared.aggregation {
                    QueryTemplate::parse_aggregation(&declared.raw)
                } else {
                    QueryTemplate::parse(&declared.raw)
                }
                .map_err(|err| {
                    err.context(crate::err!(
                        "operation `{}` on index `{}`",
                        declared.id,
                        definition.name
                    ))
                })?;

                registry.queries.insert(
                    declared.id.clone(),
                    Registered {
                        index: definition.name.clone(),
                        template: Arc::new(template),
                    },
                );
            }
        }

        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&Registered> {
        self.queries.get(id)
    }

    pub fn index(&self, name: &str) -> Option<&IndexDefinition> {
        self.indexes.get(name)
    }

    pub fn indexes(&self) -> impl Iterator<Item = &IndexDefinition> {
        self.indexes.values()
    }

    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(String::as_str)
    }
}

impl Outcome {
    pub fn is_search(&self) -> bool {
        matches!(self, Outcome::Search(_))
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Outcome::Aggregate(_))
    }

    pub fn into_search(self) -> Result<SearchResult> {
        match self {
            Outcome::Search(result) => Ok(result),
            Outcome::Aggregate(_) => Err(Error::invalid_result(
                "expected search documents, got aggregation rows",
            )),
        }
    }

    pub fn into_aggregation(self) -> Result<AggregationResult> {
        match self {
            Outcome::Aggregate(result) => Ok(result),
            Outcome::Search(_) => Err(Error::invalid_result(
                "expected aggregation rows, got search documents",
            )),
        }
    }
}
