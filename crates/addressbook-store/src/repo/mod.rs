pub mod contacts;

pub use contacts::SqlAddressBook;
