use addressbook_core::{Contact, ContactId};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("date cannot be empty"));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date format: expected YYYY-MM-DD"))
}

pub fn parse_contact_id(raw: &str) -> Result<ContactId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("contact id cannot be empty"));
    }
    Ok(ContactId::from(trimmed))
}

pub fn normalize_optional_value(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Orders contacts by name, case-insensitively, then by id.
pub fn sort_contacts(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| {
        let left = (a.first_name.to_lowercase(), a.surname.as_deref().map(str::to_lowercase));
        let right = (b.first_name.to_lowercase(), b.surname.as_deref().map(str::to_lowercase));
        left.cmp(&right).then_with(|| a.id.cmp(&b.id))
    });
}

pub fn format_contact_line(contact: &Contact) -> String {
    let mut line = format!("{}  {}", contact.id, contact.full_name());
    if let Some(phone) = contact.phone.as_deref() {
        line.push_str(&format!("  {}", phone));
    }
    if let Some(birthday) = contact.birthday {
        line.push_str(&format!("  {}", birthday.format("%Y-%m-%d")));
    }
    line
}
