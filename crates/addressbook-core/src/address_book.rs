use crate::domain::{Contact, ContactId, ContactNew};
use crate::error::CoreError;
use crate::ids::IdGenerator;
use crate::rules::find_duplicate;
use std::collections::HashMap;

/// Operations every contact backend exposes.
///
/// `add_contact` rejects blank first names and duplicates (case- and
/// whitespace-insensitive on first name and surname). `get_contact` fails on
/// an unknown id while `delete_contact` ignores it.
pub trait AddressBook {
    type Error;

    fn add_contact(&mut self, contact: ContactNew) -> Result<ContactId, Self::Error>;
    fn get_contact(&self, id: &ContactId) -> Result<Contact, Self::Error>;
    fn get_all(&self) -> Result<Vec<Contact>, Self::Error>;
    fn delete_contact(&mut self, id: &ContactId) -> Result<(), Self::Error>;
}

/// Address book held in a hash map. Identifiers come from the injected
/// generator; a colliding identifier fails the add with `IdCollision`.
pub struct MemoryAddressBook<G> {
    contacts: HashMap<ContactId, Contact>,
    id_generator: G,
}

impl<G: IdGenerator> MemoryAddressBook<G> {
    pub fn new(id_generator: G) -> Self {
        Self {
            contacts: HashMap::new(),
            id_generator,
        }
    }

    pub fn set_id_generator(&mut self, id_generator: G) {
        self.id_generator = id_generator;
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl<G: IdGenerator> AddressBook for MemoryAddressBook<G> {
    type Error = CoreError;

    fn add_contact(&mut self, contact: ContactNew) -> Result<ContactId, CoreError> {
        let draft = contact.normalized()?;
        if let Some(existing) = find_duplicate(draft.name_key(), self.contacts.values()) {
            return Err(CoreError::DuplicateContact(existing.full_name()));
        }

        let id = ContactId::from(self.id_generator.new_id());
        if self.contacts.contains_key(&id) {
            return Err(CoreError::IdCollision(id));
        }

        self.contacts.insert(id.clone(), draft.into_contact(id.clone()));
        Ok(id)
    }

    fn get_contact(&self, id: &ContactId) -> Result<Contact, CoreError> {
        self.contacts
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::UnknownId(id.clone()))
    }

    fn get_all(&self) -> Result<Vec<Contact>, CoreError> {
        Ok(self.contacts.values().cloned().collect())
    }

    fn delete_contact(&mut self, id: &ContactId) -> Result<(), CoreError> {
        self.contacts.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressBook, MemoryAddressBook};
    use crate::domain::{ContactId, ContactNew};
    use crate::error::{CoreError, CoreErrorKind};
    use crate::ids::{IdCounter, IdGenerator, IncrementIdGenerator, RandomIdGenerator};
    use chrono::NaiveDate;
    use std::cell::Cell;

    struct CountingGenerator {
        calls: Cell<u32>,
    }

    impl IdGenerator for CountingGenerator {
        fn new_id(&self) -> String {
            let next = self.calls.get() + 1;
            self.calls.set(next);
            format!("id-{next}")
        }
    }

    fn book() -> MemoryAddressBook<IncrementIdGenerator> {
        MemoryAddressBook::new(IncrementIdGenerator::new(IdCounter::new()))
    }

    #[test]
    fn add_then_get_returns_same_fields_with_id() {
        let mut book = book();
        let input = ContactNew {
            first_name: Some("Pedro".to_string()),
            surname: Some("Ballesteros".to_string()),
            birthday: NaiveDate::from_ymd_opt(1970, 4, 2),
            phone: Some("555-0100".to_string()),
        };
        let id = book.add_contact(input.clone()).expect("add");
        let stored = book.get_contact(&id).expect("get");
        assert_eq!(stored.id, id);
        assert_eq!(Some(stored.first_name), input.first_name);
        assert_eq!(stored.surname, input.surname);
        assert_eq!(stored.birthday, input.birthday);
        assert_eq!(stored.phone, input.phone);
    }

    #[test]
    fn single_contact_flow() {
        let mut book = book();
        let id = book.add_contact(ContactNew::named("Pedro")).expect("add");
        let all = book.get_all().expect("all");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].first_name, "Pedro");
        assert_eq!(book.get_contact(&id).expect("get").first_name, "Pedro");
    }

    #[test]
    fn blank_first_name_is_rejected_without_storing() {
        let mut book = book();
        for first_name in [None, Some(""), Some("   ")] {
            let err = book
                .add_contact(ContactNew {
                    first_name: first_name.map(str::to_string),
                    ..Default::default()
                })
                .unwrap_err();
            assert_eq!(err.kind(), CoreErrorKind::InvalidContact);
        }
        assert!(book.is_empty());
    }

    #[test]
    fn duplicate_is_rejected_case_and_whitespace_insensitive() {
        let mut book = book();
        book.add_contact(ContactNew::named("Pedro").with_surname("Ballesteros"))
            .expect("first add");
        let err = book
            .add_contact(ContactNew::named("PEDRO").with_surname("  Ballesteros  "))
            .unwrap_err();
        assert_eq!(err.kind(), CoreErrorKind::InvalidContact);
        assert_eq!(book.get_all().expect("all").len(), 1);
    }

    #[test]
    fn missing_surname_does_not_clash_with_present_one() {
        let mut book = book();
        book.add_contact(ContactNew::named("Pedro")).expect("no surname");
        book.add_contact(ContactNew::named("Pedro").with_surname("Ballesteros"))
            .expect("with surname");
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn stored_names_are_trimmed() {
        let mut book = book();
        let id = book
            .add_contact(ContactNew::named(" Ana ").with_surname(" Ruiz "))
            .expect("add");
        let stored = book.get_contact(&id).expect("get");
        assert_eq!(stored.first_name, "Ana");
        assert_eq!(stored.surname.as_deref(), Some("Ruiz"));
    }

    #[test]
    fn duplicate_check_runs_before_drawing_id() {
        let mut book = MemoryAddressBook::new(CountingGenerator {
            calls: Cell::new(0),
        });
        book.add_contact(ContactNew::named("Ana")).expect("add");
        book.add_contact(ContactNew::named("ana")).unwrap_err();
        book.add_contact(ContactNew::default()).unwrap_err();
        assert_eq!(book.id_generator.calls.get(), 1);
    }

    #[test]
    fn generator_collision_fails_with_invalid_id() {
        let mut book = MemoryAddressBook::new(RandomIdGenerator::with_bound(1));
        let id = book.add_contact(ContactNew::named("Ana")).expect("first add");
        let err = book.add_contact(ContactNew::named("Luis")).unwrap_err();
        assert_eq!(err, CoreError::IdCollision(id));
        assert_eq!(err.kind(), CoreErrorKind::InvalidId);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn get_unknown_id_fails() {
        let book = book();
        let err = book.get_contact(&ContactId::from("missing")).unwrap_err();
        assert_eq!(err.kind(), CoreErrorKind::InvalidId);
    }

    #[test]
    fn delete_removes_only_target() {
        let mut book = book();
        let ana = book.add_contact(ContactNew::named("Ana")).expect("add");
        let luis = book.add_contact(ContactNew::named("Luis")).expect("add");
        book.delete_contact(&ana).expect("delete");
        assert!(book.get_contact(&ana).is_err());
        assert_eq!(book.get_contact(&luis).expect("kept").first_name, "Luis");
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn delete_unknown_id_is_silent() {
        let mut book = book();
        book.add_contact(ContactNew::named("Ana")).expect("add");
        book.delete_contact(&ContactId::from("nope")).expect("no error");
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut book = book();
        let first = book.add_contact(ContactNew::named("Ana")).expect("add");
        book.delete_contact(&first).expect("delete");
        let second = book.add_contact(ContactNew::named("Ana")).expect("re-add");
        assert_ne!(first, second);
    }

    #[test]
    fn replacing_generator_changes_id_source() {
        let mut book = MemoryAddressBook::new(IncrementIdGenerator::new(IdCounter::starting_at(1)));
        let first = book.add_contact(ContactNew::named("Ana")).expect("add");
        assert_eq!(first.as_str(), "1");
        book.set_id_generator(IncrementIdGenerator::new(IdCounter::starting_at(100)));
        let second = book.add_contact(ContactNew::named("Luis")).expect("add");
        assert_eq!(second.as_str(), "100");
    }
}
