use crate::error::CoreError;

pub fn normalize_first_name(raw: Option<&str>) -> Result<String, CoreError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(CoreError::MissingFirstName);
    }
    Ok(trimmed.to_string())
}

pub fn normalize_surname(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
