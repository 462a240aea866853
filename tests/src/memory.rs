//! In-process emulation of the search backend.
//!
//! Keeps documents and index definitions in memory and answers the
//! operations the driver trait carries, with the reply shapes and error
//! texts of the real server. Relevance is not modeled: every document
//! scores `1.0`.

mod filter;

use filter::Filter;

use indexmap::IndexMap;
use searchmap_core::{
    async_trait,
    driver::{
        operation::{Aggregate, CreateIndex, DropIndex, HSet, JsonSet, Search},
        AggregateResponse, Driver, Operation, Properties, RawDocument, Response, SearchResponse,
    },
    schema::{FieldMapping, IndexDefinition, Path, SourceKind},
    Error, Result, Value,
};
use serde_json::Value as Json;
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

/// Backend emulator. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    indexes: IndexMap<String, IndexDefinition>,
    docs: BTreeMap<String, Document>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Document {
    Json(Json),
    Hash(IndexMap<String, String>),
}

impl MemoryDriver {
    pub fn new() -> MemoryDriver {
        MemoryDriver::default()
    }

    /// The definition the backend holds for `name`.
    pub fn index(&self, name: &str) -> Option<IndexDefinition> {
        self.lock().ok()?.indexes.get(name).cloned()
    }

    pub fn index_names(&self) -> Vec<String> {
        self.lock()
            .map(|state| state.indexes.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of stored documents, indexed or not.
    pub fn document_count(&self) -> usize {
        self.lock().map(|state| state.docs.len()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| searchmap_core::err!("in-memory backend lock poisoned"))
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    async fn exec(&self, op: Operation) -> Result<Response> {
        let mut state = self.lock()?;

        match op {
            Operation::CreateIndex(op) => state.create_index(op),
            Operation::DropIndex(op) => state.drop_index(op),
            Operation::JsonSet(op) => state.json_set(op),
            Operation::HSet(op) => state.hset(op),
            Operation::Search(op) => state.search(op).map(Response::Search),
            Operation::Aggregate(op) => state.aggregate(op).map(Response::Aggregate),
        }
    }
}

impl State {
    fn create_index(&mut self, op: CreateIndex) -> Result<Response> {
        let definition = op.definition;

        if self.indexes.contains_key(&definition.name) {
            return Err(Error::backend("Index already exists"));
        }

        if definition.filter.is_some() {
            return Err(Error::backend(
                "index FILTER expressions are not supported by the in-memory backend",
            ));
        }

        self.indexes.insert(definition.name.clone(), definition);
        Ok(Response::Ok)
    }

    fn drop_index(&mut self, op: DropIndex) -> Result<Response> {
        match self.indexes.shift_remove(&op.index) {
            Some(_) => Ok(Response::Ok),
            None => Err(Error::unknown_index("Unknown Index name")),
        }
    }

    fn json_set(&mut self, op: JsonSet) -> Result<Response> {
        self.docs.insert(op.key, Document::Json(op.value));
        Ok(Response::Ok)
    }

    fn hset(&mut self, op: HSet) -> Result<Response> {
        let entry = self
            .docs
            .entry(op.key)
            .or_insert_with(|| Document::Hash(IndexMap::new()));

        match entry {
            Document::Hash(fields) => {
                fields.extend(op.fields);
                Ok(Response::Ok)
            }
            Document::Json(_) => Err(Error::backend(
                "WRONGTYPE Operation against a key holding the wrong kind of value",
            )),
        }
    }

    fn search(&self, op: Search) -> Result<SearchResponse> {
        let definition = self.definition(&op.index)?;
        let query = &op.query;
        let filter = Filter::parse(&query.query, definition)?;

        let mut matches: Vec<(&String, &Document)> = self
            .indexed(definition)
            .filter(|(_, doc)| filter.matches(doc, definition))
            .collect();

        let total = matches.len() as u64;

        if let Some(sort_by) = &query.sort_by {
            let field = definition.field(&sort_by.field).ok_or_else(|| {
                Error::backend(format!("Property `{}` not loaded nor in schema", sort_by.field))
            })?;

            matches.sort_by(|(_, a), (_, b)| {
                let ordering = sort_key(a, definition, field).total_cmp(&sort_key(b, definition, field));
                if sort_by.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        // Without an explicit limit the server returns the first ten
        let (offset, num) = query.limit.unwrap_or((0, 10));

        let docs = matches
            .into_iter()
            .skip(offset as usize)
            .take(num as usize)
            .map(|(id, doc)| {
                let properties = if query.no_content {
                    Properties::new()
                } else if let Some(spec) = &query.return_fields {
                    spec.fields
                        .iter()
                        .filter_map(|field| {
                            doc.project(&field.path)
                                .map(|value| (field.alias.clone(), value))
                        })
                        .collect()
                } else {
                    doc.properties()
                };

                RawDocument::new(id.clone(), properties)
            })
            .collect();

        Ok(SearchResponse { total, docs })
    }

    fn aggregate(&self, op: Aggregate) -> Result<AggregateResponse> {
        let definition = self.definition(&op.index)?;
        let filter = Filter::parse(&op.aggregation.query, definition)?;

        let docs = self
            .indexed(definition)
            .filter(|(_, doc)| filter.matches(doc, definition))
            .map(|(_, doc)| doc)
            .collect();

        let rows = aggregate::run(docs, definition, &op.aggregation)?;

        Ok(AggregateResponse {
            total: rows.len() as u64,
            rows,
        })
    }

    fn definition(&self, index: &str) -> Result<&IndexDefinition> {
        self.indexes
            .get(index)
            .ok_or_else(|| Error::unknown_index(format!("{index}: no such index")))
    }

    /// Documents covered by an index, in key order.
    fn indexed<'a>(
        &'a self,
        definition: &'a IndexDefinition,
    ) -> impl Iterator<Item = (&'a String, &'a Document)> + 'a {
        self.docs.iter().filter(move |(key, doc)| {
            let kind = match doc {
                Document::Json(_) => SourceKind::Json,
                Document::Hash(_) => SourceKind::Hash,
            };

            kind == definition.source
                && (definition.prefixes.is_empty()
                    || definition.prefixes.iter().any(|prefix| key.starts_with(prefix.as_str())))
        })
    }
}

fn sort_key(doc: &Document, definition: &IndexDefinition, field: &FieldMapping) -> f64 {
    doc.text_values(definition, field)
        .first()
        .and_then(|value| value.parse().ok())
        .unwrap_or(f64::INFINITY)
}

impl Document {
    /// Text of every value an index field covers. Arrays contribute each of
    /// their elements.
    pub(crate) fn text_values(&self, definition: &IndexDefinition, field: &FieldMapping) -> Vec<String> {
        match self {
            Document::Json(json) => {
                let mut values = vec![];
                for value in field.path.select(json) {
                    match value {
                        Json::Array(items) => values.extend(items.iter().filter_map(scalar_text)),
                        value => values.extend(scalar_text(value)),
                    }
                }
                values
            }
            Document::Hash(fields) => fields
                .get(&definition.source_identifier(field))
                .cloned()
                .into_iter()
                .collect(),
        }
    }

    /// The value a `RETURN` or `LOAD` clause yields for `path`.
    ///
    /// Strings come back as they are, everything else as JSON text. A
    /// wildcard path yields a JSON array of its matches.
    pub(crate) fn project(&self, path: &Path) -> Option<Value> {
        match self {
            Document::Json(json) => {
                let matches = path.select(json);

                match matches.as_slice() {
                    [] => None,
                    [value] if !path.has_wildcard() => Some(render(value)),
                    values => Some(Value::String(
                        Json::Array(values.iter().map(|v| (*v).clone()).collect()).to_string(),
                    )),
                }
            }
            Document::Hash(fields) => fields
                .get(path.as_single_member()?)
                .map(|value| Value::String(value.clone())),
        }
    }

    /// Properties of a whole document in a search reply.
    fn properties(&self) -> Properties {
        match self {
            Document::Json(json) => {
                Properties::from_iter([("$".to_string(), Value::String(json.to_string()))])
            }
            Document::Hash(fields) => fields
                .iter()
                .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                .collect(),
        }
    }
}

fn scalar_text(value: &Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn render(value: &Json) -> Value {
    match value {
        Json::String(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchmap_core::query::{ProjectionSpec, SearchQuery};
    use serde_json::json;

    async fn driver() -> MemoryDriver {
        let driver = MemoryDriver::new();

        let definition = IndexDefinition::build(
            "idx",
            SourceKind::Json,
            [
                FieldMapping::text("$.title", "title").unwrap(),
                FieldMapping::tag("$.tag[*]", "tag").unwrap(),
            ],
        )
        .unwrap();

        driver
            .exec(CreateIndex { definition }.into())
            .await
            .unwrap();
        driver
            .exec(
                JsonSet {
                    key: "doc1".into(),
                    value: json!({"title": "hello world", "tag": ["news", "article"]}),
                }
                .into(),
            )
            .await
            .unwrap();

        driver
    }

    #[tokio::test]
    async fn search_returns_paths() {
        let driver = driver().await;

        let response = driver
            .exec(
                Search {
                    index: "idx".into(),
                    query: SearchQuery::all()
                        .return_fields(ProjectionSpec::parse("$.tag[0] AS first_tag").unwrap()),
                }
                .into(),
            )
            .await
            .unwrap()
            .into_search()
            .unwrap();

        assert_eq!(response.total, 1);
        assert_eq!(response.docs[0].properties["first_tag"], Value::from("news"));
    }

    #[tokio::test]
    async fn whole_document_under_root() {
        let driver = driver().await;

        let response = driver
            .exec(
                Search {
                    index: "idx".into(),
                    query: SearchQuery::new("@tag:{article}"),
                }
                .into(),
            )
            .await
            .unwrap()
            .into_search()
            .unwrap();

        let body: Json = serde_json::from_str(
            response.docs[0].properties["$"].as_str().unwrap(),
        )
        .unwrap();
        assert_eq!(body["title"], "hello world");
    }

    #[tokio::test]
    async fn unknown_index() {
        let driver = driver().await;

        let err = driver
            .exec(DropIndex { index: "nope".into() }.into())
            .await
            .unwrap_err();
        assert!(err.is_unknown_index());

        let err = driver
            .exec(
                Search {
                    index: "nope".into(),
                    query: SearchQuery::all(),
                }
                .into(),
            )
            .await
            .unwrap_err();
        assert!(err.is_unknown_index());
    }

    #[tokio::test]
    async fn duplicate_index() {
        let driver = driver().await;
        let definition = driver.index("idx").unwrap();

        let err = driver
            .exec(CreateIndex { definition }.into())
            .await
            .unwrap_err();
        assert!(err.is_backend());
        assert!(!err.is_unknown_index());
    }
}
