use searchmap::{driver::Driver, Result};

/// A backend the integration tests can run against.
#[async_trait::async_trait]
pub trait Setup: Send + Sync + 'static {
    /// Open a driver for one test.
    async fn connect(&self) -> Result<Box<dyn Driver>>;

    /// Prefix for index names and document keys when the backend is shared
    /// between tests. `None` for backends private to one test.
    fn prefix(&self) -> Option<String> {
        None
    }
}
