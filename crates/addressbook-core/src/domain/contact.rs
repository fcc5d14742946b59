use crate::domain::contact_id::ContactId;
use crate::error::CoreError;
use crate::rules::{normalize_first_name, normalize_surname, NameKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub surname: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub phone: Option<String>,
}

/// A contact as populated by the caller, before it has been stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactNew {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ContactNew {
    pub fn named(first_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            ..Default::default()
        }
    }

    pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    /// Trims the names, failing with `MissingFirstName` when the first name
    /// is absent or blank.
    pub fn normalized(self) -> Result<ContactDraft, CoreError> {
        let first_name = normalize_first_name(self.first_name.as_deref())?;
        Ok(ContactDraft {
            first_name,
            surname: normalize_surname(self.surname.as_deref()),
            birthday: self.birthday,
            phone: self.phone,
        })
    }
}

/// A normalized contact still waiting for its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub surname: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub phone: Option<String>,
}

impl ContactDraft {
    pub fn name_key(&self) -> NameKey<'_> {
        NameKey::new(&self.first_name, self.surname.as_deref())
    }

    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            surname: self.surname,
            birthday: self.birthday,
            phone: self.phone,
        }
    }
}

impl Contact {
    pub fn full_name(&self) -> String {
        match self.surname.as_deref() {
            Some(surname) => format!("{} {}", self.first_name, surname),
            None => self.first_name.clone(),
        }
    }
}
