use crate::domain::ContactId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("first name is required")]
    MissingFirstName,
    #[error("contact already exists: {0}")]
    DuplicateContact(String),
    #[error("contact not found: {0}")]
    UnknownId(ContactId),
    #[error("identifier already in use: {0}")]
    IdCollision(ContactId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorKind {
    InvalidContact,
    InvalidId,
}

impl CoreError {
    pub fn kind(&self) -> CoreErrorKind {
        match self {
            CoreError::MissingFirstName | CoreError::DuplicateContact(_) => {
                CoreErrorKind::InvalidContact
            }
            CoreError::UnknownId(_) | CoreError::IdCollision(_) => CoreErrorKind::InvalidId,
        }
    }
}
