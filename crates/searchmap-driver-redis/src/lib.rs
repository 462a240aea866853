mod reply;

use redis::aio::MultiplexedConnection;
use searchmap_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    Error, Result,
};
use url::Url;

/// Driver backed by a multiplexed Redis connection with the search and JSON
/// modules loaded.
///
/// The connection is shared: every operation runs on a clone of it, so
/// concurrent callers each receive their own reply.
#[derive(Clone)]
pub struct Redis {
    connection: MultiplexedConnection,
}

impl Redis {
    /// Connects to the server at `url`, e.g. `redis://localhost:6379/0`.
    pub async fn connect(url: &str) -> Result<Redis> {
        let parsed = Url::parse(url).map_err(Error::driver)?;

        if !matches!(parsed.scheme(), "redis" | "rediss") {
            return Err(searchmap_core::err!(
                "connection URL does not have a `redis` scheme; url={url}"
            ));
        }

        tracing::debug!(host = ?parsed.host_str(), port = ?parsed.port(), "connecting to redis");

        let client = redis::Client::open(parsed.as_str()).map_err(Error::driver)?;
        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(Error::driver)?;

        Ok(Redis::new(connection))
    }

    pub fn new(connection: MultiplexedConnection) -> Redis {
        Redis { connection }
    }
}

impl std::fmt::Debug for Redis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redis").finish_non_exhaustive()
    }
}

#[async_trait]
impl Driver for Redis {
    async fn exec(&self, op: Operation) -> Result<Response> {
        let command = op.command();

        let mut cmd = redis::cmd(command.name);
        for arg in &command.args {
            cmd.arg(arg);
        }

        let mut connection = self.connection.clone();
        let reply: redis::Value = cmd.query_async(&mut connection).await.map_err(classify)?;

        match &op {
            Operation::Search(search) => reply::search(reply, &search.query).map(Response::Search),
            Operation::Aggregate(_) => reply::aggregate(reply).map(Response::Aggregate),
            Operation::CreateIndex(_)
            | Operation::DropIndex(_)
            | Operation::HSet(_)
            | Operation::JsonSet(_) => Ok(Response::Ok),
        }
    }
}

/// Maps a `redis` error onto the error kinds callers branch on.
///
/// Transport failures are driver errors. Anything the server answered is a
/// backend error, classified as an unknown index when the server says so.
fn classify(err: redis::RedisError) -> Error {
    if err.is_io_error()
        || err.is_connection_dropped()
        || err.is_connection_refusal()
        || err.is_timeout()
    {
        return Error::driver(err);
    }

    let message = match (err.code(), err.detail()) {
        (Some(code), Some(detail)) => format!("{code} {detail}"),
        _ => err.to_string(),
    };

    if is_unknown_index(&message) {
        Error::unknown_index(message)
    } else {
        Error::backend(message)
    }
}

fn is_unknown_index(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("unknown index") || message.contains("no such index")
}
