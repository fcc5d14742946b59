use addressbook_core::{
    AddressBook, Contact, ContactId, ContactNew, IdGenerator, MemoryAddressBook,
};
use addressbook_store::sql::ConnectionProvider;
use addressbook_store::SqlAddressBook;
use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod contacts;
pub mod import;

/// The backend selected at startup.
pub enum Book<'a> {
    Sqlite(SqlAddressBook<&'a dyn ConnectionProvider>),
    Memory(MemoryAddressBook<Box<dyn IdGenerator>>),
}

impl AddressBook for Book<'_> {
    type Error = anyhow::Error;

    fn add_contact(&mut self, contact: ContactNew) -> Result<ContactId> {
        match self {
            Book::Sqlite(book) => Ok(book.add_contact(contact)?),
            Book::Memory(book) => Ok(book.add_contact(contact)?),
        }
    }

    fn get_contact(&self, id: &ContactId) -> Result<Contact> {
        match self {
            Book::Sqlite(book) => Ok(book.get_contact(id)?),
            Book::Memory(book) => Ok(book.get_contact(id)?),
        }
    }

    fn get_all(&self) -> Result<Vec<Contact>> {
        match self {
            Book::Sqlite(book) => Ok(book.get_all()?),
            Book::Memory(book) => Ok(book.get_all()?),
        }
    }

    fn delete_contact(&mut self, id: &ContactId) -> Result<()> {
        match self {
            Book::Sqlite(book) => Ok(book.delete_contact(id)?),
            Book::Memory(book) => Ok(book.delete_contact(id)?),
        }
    }
}

pub struct Context<'a> {
    pub book: Book<'a>,
    pub json: bool,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
