mod builder;
pub use builder::Builder;

mod connect;

use crate::{
    engine::Engine,
    registry::{Outcome, Registry},
    result, AggregationResult, Args, BoundQuery, Error, IndexDefinition, Load, Result,
    SearchResult, Value,
};

use searchmap_core::{
    driver::{
        operation::{Aggregate, CreateIndex, DropIndex, HSet, JsonSet, Search},
        Response,
    },
    query::{Aggregation, SearchQuery, TemplateForm},
};

use serde::Serialize;
use std::sync::Arc;

/// Shared state between all `Db` clones.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) engine: Engine,
    pub(crate) registry: Registry,
    pub(crate) index_prefix: Option<String>,
}

/// A handle to the search backend and the declared operations.
///
/// Cloning is cheap; clones share the driver and the parsed templates.
#[derive(Debug, Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.shared.registry
    }

    /// The backend name of an index, with the configured prefix applied.
    pub fn index_name(&self, name: &str) -> String {
        match &self.shared.index_prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }

    /// Runs a declared operation.
    ///
    /// Projection and load templates map their aliases onto each document or
    /// row; filter templates return documents as the backend sends them.
    pub async fn call(&self, id: &str, args: Args) -> Result<Outcome> {
        let registered = self
            .shared
            .registry
            .get(id)
            .ok_or_else(|| crate::err!("no operation named `{id}`"))?;

        let bound = registered
            .template
            .bind(args)
            .map_err(|err| err.context(crate::err!("operation `{id}`")))?;

        let response = self.execute(&registered.index, &bound).await?;

        match bound.form() {
            TemplateForm::Filter => Ok(Outcome::Search(result::map_search(response, None)?)),
            TemplateForm::Projection(spec) => {
                Ok(Outcome::Search(result::map_search(response, Some(spec))?))
            }
            TemplateForm::Load(spec) => Ok(Outcome::Aggregate(result::map_aggregation(
                response,
                Some(spec),
            )?)),
        }
    }

    /// Runs a declared operation and loads every document or row as `T`.
    pub async fn find<T: Load>(&self, id: &str, args: Args) -> Result<Vec<T>> {
        match self.call(id, args).await? {
            Outcome::Search(result) => result.iter().map(|doc| T::load(&doc.fields())).collect(),
            Outcome::Aggregate(result) => result.iter().map(|row| T::load(&row.fields())).collect(),
        }
    }

    /// Executes a bound template against `index` and returns the raw reply.
    pub async fn execute(&self, index: &str, query: &BoundQuery) -> Result<Response> {
        self.shared
            .engine
            .execute(&self.index_name(index), query)
            .await
    }

    pub async fn search(&self, index: &str, query: SearchQuery) -> Result<SearchResult> {
        let projection = query.return_fields.clone();

        let response = self
            .shared
            .engine
            .exec(
                Search {
                    index: self.index_name(index),
                    query,
                }
                .into(),
            )
            .await?;

        result::map_search(response, projection.as_ref())
    }

    pub async fn aggregate(&self, index: &str, aggregation: Aggregation) -> Result<AggregationResult> {
        let response = self
            .shared
            .engine
            .exec(
                Aggregate {
                    index: self.index_name(index),
                    aggregation,
                }
                .into(),
            )
            .await?;

        result::map_aggregation(response, None)
    }

    /// Creates the index, dropping any existing index of the same name
    /// first. Documents are kept, so running this twice yields the same
    /// index.
    pub async fn create_index(&self, definition: &IndexDefinition) -> Result<()> {
        let name = self.index_name(&definition.name);

        self.drop_index(&definition.name).await?;

        tracing::info!(index = %name, fields = definition.fields.len(), "creating index");

        self.shared
            .engine
            .exec(
                CreateIndex {
                    definition: definition.renamed(name),
                }
                .into(),
            )
            .await?;

        Ok(())
    }

    /// Recreates a registered index from its declared definition.
    pub async fn recreate_index(&self, name: &str) -> Result<()> {
        let definition = self
            .shared
            .registry
            .index(name)
            .ok_or_else(|| crate::err!("no repository declares index `{name}`"))?;

        self.create_index(definition).await
    }

    /// Recreates every registered index.
    pub async fn push_schema(&self) -> Result<()> {
        for definition in self.shared.registry.indexes() {
            self.create_index(definition).await?;
        }
        Ok(())
    }

    /// Drops the index, keeping its documents. Dropping an index the backend
    /// does not know is not an error.
    pub async fn drop_index(&self, name: &str) -> Result<()> {
        let index = self.index_name(name);

        match self
            .shared
            .engine
            .exec(DropIndex { index: index.clone() }.into())
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if err.is_unknown_index() => {
                tracing::debug!(index = %index, error = %err, "index did not exist");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Stores `value` as the JSON document at `key`.
    pub async fn json_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;

        self.shared
            .engine
            .exec(
                JsonSet {
                    key: key.to_string(),
                    value,
                }
                .into(),
            )
            .await?;

        Ok(())
    }

    /// Stores the given fields in the hash at `key`.
    pub async fn hash_set<K, V>(&self, key: &str, fields: impl IntoIterator<Item = (K, V)>) -> Result<()>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let fields: Vec<(String, String)> = fields
            .into_iter()
            .map(|(name, value)| (name.into(), Into::<Value>::into(value).to_string()))
            .collect();

        if fields.is_empty() {
            return Err(Error::invalid_schema(format!(
                "hash `{key}` needs at least one field"
            )));
        }

        self.shared
            .engine
            .exec(
                HSet {
                    key: key.to_string(),
                    fields,
                }
                .into(),
            )
            .await?;

        Ok(())
    }
}
