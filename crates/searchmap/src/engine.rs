use crate::Result;

use searchmap_core::{
    driver::{
        operation::{Aggregate, Search},
        Driver, Operation, Response,
    },
    query::{Aggregation, SearchQuery, TemplateForm},
    BoundQuery,
};

use std::sync::Arc;

/// Turns bound queries into backend operations and hands them to the driver.
///
/// The engine keeps no state besides the driver: no retries, no caching.
#[derive(Debug, Clone)]
pub(crate) struct Engine {
    driver: Arc<dyn Driver>,
}

impl Engine {
    pub(crate) fn new(driver: Arc<dyn Driver>) -> Engine {
        Engine { driver }
    }

    /// Executes a bound template against `index`.
    pub(crate) async fn execute(&self, index: &str, query: &BoundQuery) -> Result<Response> {
        self.exec(plan(index, query)).await
    }

    pub(crate) async fn exec(&self, op: Operation) -> Result<Response> {
        tracing::debug!(index = ?op.index(), command = %op.command(), "dispatching operation");
        self.driver.exec(op).await
    }
}

/// Picks the backend operation for a bound template.
///
/// Filter templates search with the rendered query. Projection templates
/// search every document and return only the listed paths. Load templates
/// aggregate over every document, loading the listed paths into each row.
pub(crate) fn plan(index: &str, query: &BoundQuery) -> Operation {
    let index = index.to_string();

    match query.form() {
        TemplateForm::Filter => Search {
            index,
            query: SearchQuery::new(query.query()),
        }
        .into(),
        TemplateForm::Projection(spec) => Search {
            index,
            query: SearchQuery::all().return_fields(spec.clone()),
        }
        .into(),
        TemplateForm::Load(spec) => Aggregate {
            index,
            aggregation: Aggregation::all().load(spec.clone()),
        }
        .into(),
    }
}
