pub mod address_book;
pub mod domain;
pub mod error;
pub mod ids;
pub mod rules;

pub use address_book::{AddressBook, MemoryAddressBook};
pub use domain::*;
pub use error::{CoreError, CoreErrorKind};
pub use ids::{
    IdCounter, IdGenerator, IdGeneratorKind, IncrementIdGenerator, RandomIdGenerator,
    UuidIdGenerator,
};
pub use rules::*;
