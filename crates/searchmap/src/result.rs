//! Mapping backend replies into documents and rows.

mod document;
pub use document::{Document, SearchResult};

mod row;
pub use row::{AggregationResult, Row};

use crate::{Error, Result, Value};

use searchmap_core::{
    driver::{Properties, Response},
    query::ProjectionSpec,
};

/// Property under which the backend returns the whole JSON body of a document.
pub const BODY: &str = "$";

/// Maps a search reply into a [`SearchResult`].
///
/// Without a projection, documents keep their native properties. With one,
/// every alias is resolved from the property of the same name or, failing
/// that, by evaluating its path against the document's JSON body. A path
/// that matches nothing leaves the alias absent.
pub fn map_search(response: Response, projection: Option<&ProjectionSpec>) -> Result<SearchResult> {
    let response = response.into_search()?;

    let docs = response
        .docs
        .into_iter()
        .map(|doc| {
            let properties = match projection {
                Some(spec) => project(spec, doc.properties)
                    .map_err(|err| err.context(crate::err!("document `{}`", doc.id)))?,
                None => doc.properties,
            };

            Ok(Document {
                id: doc.id,
                score: doc.score,
                payload: doc.payload,
                properties,
            })
        })
        .collect::<Result<_>>()?;

    Ok(SearchResult {
        total: response.total,
        docs,
    })
}

/// Maps an aggregation reply into an [`AggregationResult`].
///
/// Rows are reshaped only: a projection orders the loaded aliases first.
pub fn map_aggregation(
    response: Response,
    projection: Option<&ProjectionSpec>,
) -> Result<AggregationResult> {
    let response = response.into_aggregate()?;

    let rows = response
        .rows
        .into_iter()
        .map(|properties| {
            let properties = match projection {
                Some(spec) => project(spec, properties)?,
                None => properties,
            };
            Ok(Row { properties })
        })
        .collect::<Result<_>>()?;

    Ok(AggregationResult {
        total: response.total,
        rows,
    })
}

fn project(spec: &ProjectionSpec, mut properties: Properties) -> Result<Properties> {
    let body = match properties.shift_remove(BODY) {
        Some(Value::String(text)) => Some(
            serde_json::from_str::<serde_json::Value>(&text)
                .map_err(|err| Error::invalid_result(format!("malformed JSON body: {err}")))?,
        ),
        Some(Value::Null) | None => None,
        Some(other) => {
            return Err(Error::invalid_result(format!(
                "expected a JSON body, got {}",
                other.type_name()
            )))
        }
    };

    let mut projected = Properties::with_capacity(properties.len().max(spec.len()));

    for field in &spec.fields {
        if let Some(value) = properties.shift_remove(&field.alias) {
            projected.insert(field.alias.clone(), value);
        } else if let Some(found) = body.as_ref().and_then(|body| field.path.select_first(body)) {
            projected.insert(field.alias.clone(), Value::from_json(found));
        }
    }

    projected.extend(properties);

    Ok(projected)
}
