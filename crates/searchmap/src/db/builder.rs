use super::{Db, Shared};
use crate::{engine::Engine, registry::Registry, Repository, Result};

use searchmap_core::Driver;

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    repositories: Vec<Repository>,

    /// Prepended to every index name sent to the backend
    index_prefix: Option<String>,
}

impl Builder {
    pub fn repository(&mut self, repository: Repository) -> &mut Self {
        self.repositories.push(repository);
        self
    }

    /// Set the name prefix for all indexes
    pub fn index_prefix(&mut self, prefix: &str) -> &mut Self {
        self.index_prefix = Some(prefix.to_string());
        self
    }

    /// Connects to the backend at `url`, e.g. `redis://localhost:6379/0`.
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        let driver = super::connect::connect(url).await?;
        self.build_with(driver)
    }

    /// Parses every declared template and returns a handle using `driver`.
    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        self.build_with(Arc::new(driver))
    }

    fn build_with(&mut self, driver: Arc<dyn Driver>) -> Result<Db> {
        let registry = Registry::build(&self.repositories)?;

        Ok(Db {
            shared: Arc::new(Shared {
                engine: Engine::new(driver),
                registry,
                index_prefix: self.index_prefix.clone(),
            }),
        })
    }
}
