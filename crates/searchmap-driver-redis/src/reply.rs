//! Framing of RESP2 search and aggregation replies.
//!
//! A search reply is `[total, id, score?, payload?, [k, v, …] | nil, …]`,
//! where the optional entries depend on the options the query asked for. An
//! aggregation reply is `[total, [k, v, …], …]`.

use redis::Value as Reply;
use searchmap_core::{
    driver::{AggregateResponse, Properties, RawDocument, SearchResponse},
    query::SearchQuery,
    Error, Result, Value,
};

pub(crate) fn search(reply: Reply, query: &SearchQuery) -> Result<SearchResponse> {
    let (total, items) = split_total(reply)?;
    let mut items = items.into_iter();
    let mut docs = vec![];

    while let Some(id) = items.next() {
        let id = string(id)?;

        let score = if query.with_scores {
            items
                .next()
                .ok_or_else(|| truncated(&id, "score"))
                .and_then(float)?
        } else {
            1.0
        };

        let payload = if query.with_payloads {
            match items.next().ok_or_else(|| truncated(&id, "payload"))? {
                Reply::Nil => None,
                reply => Some(bytes(reply)?),
            }
        } else {
            None
        };

        let properties = if query.no_content {
            Properties::new()
        } else {
            match items.next().ok_or_else(|| truncated(&id, "fields"))? {
                Reply::Nil => Properties::new(),
                reply => properties(reply)?,
            }
        };

        docs.push(RawDocument {
            id,
            score,
            payload,
            properties,
        });
    }

    Ok(SearchResponse { total, docs })
}

pub(crate) fn aggregate(reply: Reply) -> Result<AggregateResponse> {
    let (total, items) = split_total(reply)?;

    let rows = items
        .into_iter()
        .map(properties)
        .collect::<Result<_>>()?;

    Ok(AggregateResponse { total, rows })
}

fn split_total(reply: Reply) -> Result<(u64, Vec<Reply>)> {
    let mut items = match reply {
        Reply::Array(items) => items,
        other => return Err(unexpected("an array reply", &other)),
    };

    if items.is_empty() {
        return Err(Error::invalid_result("reply is missing the result count"));
    }

    let total = match items.remove(0) {
        Reply::Int(total) => u64::try_from(total)
            .map_err(|_| Error::invalid_result(format!("negative result count {total}")))?,
        other => return Err(unexpected("a result count", &other)),
    };

    Ok((total, items))
}

/// A flat `[k, v, k, v, …]` array.
fn properties(reply: Reply) -> Result<Properties> {
    let items = match reply {
        Reply::Array(items) => items,
        other => return Err(unexpected("a field list", &other)),
    };

    if items.len() % 2 != 0 {
        return Err(Error::invalid_result("field list has an odd number of entries"));
    }

    let mut properties = Properties::with_capacity(items.len() / 2);
    let mut items = items.into_iter();

    while let (Some(name), Some(value)) = (items.next(), items.next()) {
        properties.insert(string(name)?, value_of(value)?);
    }

    Ok(properties)
}

fn value_of(reply: Reply) -> Result<Value> {
    Ok(match reply {
        Reply::Nil => Value::Null,
        Reply::Int(v) => Value::I64(v),
        Reply::Double(v) => Value::F64(v),
        Reply::Boolean(v) => Value::Bool(v),
        Reply::BulkString(bytes) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        Reply::SimpleString(v) => Value::String(v),
        Reply::Okay => Value::String("OK".to_string()),
        Reply::Array(items) => Value::List(items.into_iter().map(value_of).collect::<Result<_>>()?),
        other => return Err(unexpected("a field value", &other)),
    })
}

fn string(reply: Reply) -> Result<String> {
    match reply {
        Reply::BulkString(bytes) => String::from_utf8(bytes)
            .map_err(|err| Error::invalid_result(format!("reply is not UTF-8: {err}"))),
        Reply::SimpleString(v) => Ok(v),
        Reply::Int(v) => Ok(v.to_string()),
        other => Err(unexpected("a string", &other)),
    }
}

fn bytes(reply: Reply) -> Result<Vec<u8>> {
    match reply {
        Reply::BulkString(bytes) => Ok(bytes),
        Reply::SimpleString(v) => Ok(v.into_bytes()),
        other => Err(unexpected("a payload", &other)),
    }
}

fn float(reply: Reply) -> Result<f64> {
    match reply {
        Reply::Double(v) => Ok(v),
        Reply::Int(v) => Ok(v as f64),
        reply => {
            let text = string(reply)?;
            text.parse()
                .map_err(|_| Error::invalid_result(format!("score `{text}` is not a number")))
        }
    }
}

fn truncated(id: &str, entry: &str) -> Error {
    Error::invalid_result(format!("reply ends before the {entry} of document `{id}`"))
}

fn unexpected(expected: &str, got: &Reply) -> Error {
    Error::invalid_result(format!("expected {expected}, got {got:?}"))
}
