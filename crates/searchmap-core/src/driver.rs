mod command;
pub use command::Command;

mod response;
pub use response::{AggregateResponse, Properties, RawDocument, Response, SearchResponse};

pub mod operation;
pub use operation::Operation;

use crate::async_trait;

use std::fmt::Debug;

/// The command channel to the search backend.
///
/// `exec` takes `&self`: one driver serves concurrent callers and must keep
/// each request paired with its own reply. Pooling, timeouts and retries are
/// the driver's business; the core issues one operation per call.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a backend operation.
    ///
    /// Failures the backend reports are returned as [`crate::Error::backend`],
    /// classifying a missing index as [`crate::Error::unknown_index`].
    async fn exec(&self, op: Operation) -> crate::Result<Response>;
}
