use addressbook_core::{CoreError, CoreErrorKind};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("data access failure: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("migration error: {0}")]
    Migration(String),
    #[error("connection is already in use")]
    ConnectionBusy,
    #[error("statement produced no generated key")]
    MissingGeneratedKey,
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    DataAccess,
    InvalidContact,
    InvalidId,
    MissingHomeDir,
    InvalidDataPath,
    Migration,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Sql(_)
            | StoreError::ConnectionBusy
            | StoreError::MissingGeneratedKey => StoreErrorKind::DataAccess,
            StoreError::Core(err) => match err.kind() {
                CoreErrorKind::InvalidContact => StoreErrorKind::InvalidContact,
                CoreErrorKind::InvalidId => StoreErrorKind::InvalidId,
            },
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::Migration(_) => StoreErrorKind::Migration,
        }
    }
}
