pub mod db;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod repo;
pub mod sql;

use crate::error::Result;
use crate::sql::{ConnectionProvider, PathConnectionProvider, SharedConnectionProvider, SqlTemplate};
use std::path::Path;

pub use crate::repo::SqlAddressBook;

pub struct Store {
    provider: Box<dyn ConnectionProvider>,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        // Fail early on an unopenable path rather than on first use.
        let provider = PathConnectionProvider::new(path);
        let conn = provider.acquire()?;
        provider.release(conn);
        Ok(Self::with_provider(provider))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::with_provider(SharedConnectionProvider::in_memory()?))
    }

    pub fn with_provider(provider: impl ConnectionProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    pub fn migrate(&self) -> Result<()> {
        self.template().with_connection(migrate::run_migrations)
    }

    pub fn schema_version(&self) -> Result<i64> {
        self.template().with_connection(migrate::schema_version)
    }

    pub fn template(&self) -> SqlTemplate<&dyn ConnectionProvider> {
        SqlTemplate::new(self.provider.as_ref())
    }

    pub fn contacts(&self) -> SqlAddressBook<&dyn ConnectionProvider> {
        SqlAddressBook::from_template(self.template())
    }
}
