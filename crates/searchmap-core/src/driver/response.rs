use crate::{Error, Result, Value};

use indexmap::IndexMap;

/// Named values of one document or row, in reply order.
pub type Properties = IndexMap<String, Value>;

/// A backend reply, framed but not interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The command succeeded and returns nothing of interest
    Ok,

    Search(SearchResponse),

    Aggregate(AggregateResponse),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    /// Number of matching documents, which may exceed `docs.len()` when a
    /// limit applies
    pub total: u64,

    pub docs: Vec<RawDocument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// Key of the document
    pub id: String,

    pub score: f64,

    pub payload: Option<Vec<u8>>,

    pub properties: Properties,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResponse {
    pub total: u64,

    pub rows: Vec<Properties>,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok)
    }

    pub fn into_search(self) -> Result<SearchResponse> {
        match self {
            Response::Search(response) => Ok(response),
            other => Err(Error::invalid_result(format!(
                "expected a search reply, got {}",
                other.kind_name()
            ))),
        }
    }

    pub fn into_aggregate(self) -> Result<AggregateResponse> {
        match self {
            Response::Aggregate(response) => Ok(response),
            other => Err(Error::invalid_result(format!(
                "expected an aggregate reply, got {}",
                other.kind_name()
            ))),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Response::Ok => "a status reply",
            Response::Search(_) => "a search reply",
            Response::Aggregate(_) => "an aggregate reply",
        }
    }
}

impl RawDocument {
    /// A document scored `1.0` with no payload, as the backend reports when
    /// scores and payloads are not requested.
    pub fn new(id: impl Into<String>, properties: Properties) -> RawDocument {
        RawDocument {
            id: id.into(),
            score: 1.0,
            payload: None,
            properties,
        }
    }
}

impl From<SearchResponse> for Response {
    fn from(value: SearchResponse) -> Self {
        Response::Search(value)
    }
}

impl From<AggregateResponse> for Response {
    fn from(value: AggregateResponse) -> Self {
        Response::Aggregate(value)
    }
}
