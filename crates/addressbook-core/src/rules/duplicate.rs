use crate::domain::Contact;

/// Name pair used for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameKey<'a> {
    pub first_name: &'a str,
    pub surname: Option<&'a str>,
}

impl<'a> NameKey<'a> {
    pub fn new(first_name: &'a str, surname: Option<&'a str>) -> Self {
        Self {
            first_name,
            surname,
        }
    }

    pub fn of(contact: &'a Contact) -> Self {
        Self::new(&contact.first_name, contact.surname.as_deref())
    }
}

pub fn is_duplicate(a: NameKey<'_>, b: NameKey<'_>) -> bool {
    if !same_name(a.first_name, b.first_name) {
        return false;
    }
    match (blank_to_none(a.surname), blank_to_none(b.surname)) {
        (None, None) => true,
        (Some(left), Some(right)) => same_name(left, right),
        _ => false,
    }
}

pub fn find_duplicate<'c, I>(candidate: NameKey<'_>, stored: I) -> Option<&'c Contact>
where
    I: IntoIterator<Item = &'c Contact>,
{
    stored
        .into_iter()
        .find(|contact| is_duplicate(candidate, NameKey::of(contact)))
}

fn same_name(left: &str, right: &str) -> bool {
    let left = left.trim();
    let right = right.trim();
    left == right || left.to_lowercase() == right.to_lowercase()
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{find_duplicate, is_duplicate, NameKey};
    use crate::domain::{Contact, ContactId};

    fn contact(id: &str, first: &str, surname: Option<&str>) -> Contact {
        Contact {
            id: ContactId::from(id),
            first_name: first.to_string(),
            surname: surname.map(str::to_string),
            birthday: None,
            phone: None,
        }
    }

    #[test]
    fn duplicate_ignores_case_and_whitespace() {
        assert!(is_duplicate(
            NameKey::new("Pedro", Some("Ballesteros")),
            NameKey::new(" PEDRO ", Some("BALLESTEROS ")),
        ));
    }

    #[test]
    fn absent_surname_is_not_duplicate_of_present_one() {
        assert!(!is_duplicate(
            NameKey::new("Pedro", None),
            NameKey::new("Pedro", Some("Ballesteros")),
        ));
        assert!(is_duplicate(
            NameKey::new("pedro", None),
            NameKey::new("Pedro", None),
        ));
    }

    #[test]
    fn different_first_names_never_duplicate() {
        assert!(!is_duplicate(
            NameKey::new("Pedro", Some("Ballesteros")),
            NameKey::new("Pablo", Some("Ballesteros")),
        ));
    }

    #[test]
    fn find_duplicate_returns_matching_contact() {
        let stored = vec![
            contact("1", "Ana", Some("Ruiz")),
            contact("2", "Pedro", Some("Ballesteros")),
        ];
        let found = find_duplicate(NameKey::new("pedro", Some("ballesteros")), &stored)
            .expect("duplicate found");
        assert_eq!(found.id.as_str(), "2");
        assert!(find_duplicate(NameKey::new("Pedro", None), &stored).is_none());
    }
}
