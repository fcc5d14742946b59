use crate::db;
use crate::error::{Result, StoreError};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{trace, warn};

/// Source of connections for [`super::SqlTemplate`].
///
/// Every connection handed out by `acquire` is given back through `release`
/// exactly once.
pub trait ConnectionProvider {
    fn acquire(&self) -> Result<Connection>;
    fn release(&self, conn: Connection);
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    fn acquire(&self) -> Result<Connection> {
        (**self).acquire()
    }

    fn release(&self, conn: Connection) {
        (**self).release(conn)
    }
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for Box<P> {
    fn acquire(&self) -> Result<Connection> {
        (**self).acquire()
    }

    fn release(&self, conn: Connection) {
        (**self).release(conn)
    }
}

/// Opens a new connection to a database file per acquire and closes it on
/// release.
#[derive(Debug, Clone)]
pub struct PathConnectionProvider {
    path: PathBuf,
}

impl PathConnectionProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConnectionProvider for PathConnectionProvider {
    fn acquire(&self) -> Result<Connection> {
        trace!(path = %self.path.display(), "opening connection");
        db::open(&self.path)
    }

    fn release(&self, conn: Connection) {
        if let Err((_conn, err)) = conn.close() {
            warn!(path = %self.path.display(), error = %err, "failed to close connection");
        }
    }
}

/// Lends out a single long-lived connection. Needed for in-memory databases,
/// whose contents live only as long as their connection.
#[derive(Debug)]
pub struct SharedConnectionProvider {
    slot: Mutex<Option<Connection>>,
}

impl SharedConnectionProvider {
    pub fn new(conn: Connection) -> Self {
        Self {
            slot: Mutex::new(Some(conn)),
        }
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(db::open_in_memory()?))
    }
}

impl ConnectionProvider for SharedConnectionProvider {
    fn acquire(&self) -> Result<Connection> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.take().ok_or(StoreError::ConnectionBusy)
    }

    fn release(&self, conn: Connection) {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.is_some() {
            warn!("shared connection released twice, dropping extra connection");
            return;
        }
        *slot = Some(conn);
    }
}
