use crate::error::{Result, StoreError};
use crate::sql::{no_params, ConnectionProvider, GeneratedKeys, SqlTemplate};
use addressbook_core::rules::find_duplicate;
use addressbook_core::{AddressBook, Contact, ContactId, ContactNew, CoreError};
use rusqlite::Row;
use tracing::debug;

const SELECT_CONTACTS: &str = "SELECT id, firstname, surname, birthday, phone FROM contacts";

/// Address book persisted in the `contacts` table. Identifiers are the
/// string form of the generated integer key.
pub struct SqlAddressBook<P> {
    template: SqlTemplate<P>,
}

impl<P: ConnectionProvider> SqlAddressBook<P> {
    pub fn new(provider: P) -> Self {
        Self {
            template: SqlTemplate::new(provider),
        }
    }

    pub fn from_template(template: SqlTemplate<P>) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &SqlTemplate<P> {
        &self.template
    }

    pub fn add(&self, contact: ContactNew) -> Result<ContactId> {
        let draft = contact.normalized()?;
        let stored = self.list()?;
        if let Some(existing) = find_duplicate(draft.name_key(), &stored) {
            return Err(CoreError::DuplicateContact(existing.full_name()).into());
        }

        let key = self.template.insert_returning_key(
            "INSERT INTO contacts (firstname, surname, birthday, phone) VALUES (?1, ?2, ?3, ?4);",
            |stmt| {
                stmt.raw_bind_parameter(1_usize, &draft.first_name)?;
                stmt.raw_bind_parameter(2_usize, &draft.surname)?;
                stmt.raw_bind_parameter(3_usize, draft.birthday)?;
                stmt.raw_bind_parameter(4_usize, &draft.phone)?;
                Ok(())
            },
        )?;
        debug!(id = key, "contact inserted");
        Ok(ContactId::from(key))
    }

    pub fn get(&self, id: &ContactId) -> Result<Option<Contact>> {
        let Some(key) = parse_key(id) else {
            return Ok(None);
        };
        self.template.query_one(
            &format!("{SELECT_CONTACTS} WHERE id = ?1;"),
            |stmt| stmt.raw_bind_parameter(1_usize, key),
            contact_from_row,
        )
    }

    pub fn list(&self) -> Result<Vec<Contact>> {
        self.template.query(
            &format!("{SELECT_CONTACTS} ORDER BY id;"),
            no_params,
            contact_from_row,
        )
    }

    /// Returns whether a row was removed.
    pub fn delete(&self, id: &ContactId) -> Result<bool> {
        let Some(key) = parse_key(id) else {
            return Ok(false);
        };
        self.template.execute(
            "DELETE FROM contacts WHERE id = ?1;",
            GeneratedKeys::Ignore,
            |stmt| stmt.raw_bind_parameter(1_usize, key),
            |prepared| Ok(prepared.statement().raw_execute()? > 0),
        )
    }
}

impl<P: ConnectionProvider> AddressBook for SqlAddressBook<P> {
    type Error = StoreError;

    fn add_contact(&mut self, contact: ContactNew) -> Result<ContactId> {
        self.add(contact)
    }

    fn get_contact(&self, id: &ContactId) -> Result<Contact> {
        self.get(id)?
            .ok_or_else(|| CoreError::UnknownId(id.clone()).into())
    }

    fn get_all(&self) -> Result<Vec<Contact>> {
        self.list()
    }

    fn delete_contact(&mut self, id: &ContactId) -> Result<()> {
        self.delete(id).map(|_| ())
    }
}

fn parse_key(id: &ContactId) -> Option<i64> {
    id.as_str().parse().ok()
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    let id: i64 = row.get(0)?;
    Ok(Contact {
        id: ContactId::from(id),
        first_name: row.get(1)?,
        surname: row.get(2)?,
        birthday: row.get(3)?,
        phone: row.get(4)?,
    })
}
