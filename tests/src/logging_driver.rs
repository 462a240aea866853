use searchmap_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    Result,
};
use std::sync::{Arc, Mutex};

/// A driver wrapper that logs all operations for testing purposes
#[derive(Debug)]
pub struct LoggingDriver {
    /// The underlying driver that actually executes operations
    inner: Box<dyn Driver>,

    /// Log of all operations executed through this driver
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

#[derive(Debug)]
pub struct DriverOp {
    pub operation: Operation,

    /// The reply, or the text of the error the driver returned
    pub response: std::result::Result<Response, String>,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn exec(&self, operation: Operation) -> Result<Response> {
        let result = self.inner.exec(operation.clone()).await;

        let driver_op = DriverOp {
            operation,
            response: match &result {
                Ok(response) => Ok(response.clone()),
                Err(err) => Err(err.to_string()),
            },
        };

        self.ops_log
            .lock()
            .map_err(|_| searchmap_core::err!("ops log lock poisoned"))?
            .push(driver_op);

        result
    }
}
