//! Request field validation shared by accounts and the catalog.
//!
//! Every string field is trimmed before it is checked or stored.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// A request field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0}")]
    Invalid(String),
}

/// Trimmed value of a required field
pub fn required(field: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Missing(field));
    }
    Ok(trimmed.to_string())
}

/// Trimmed value of a required field that may be absent from a patch
///
/// `None` means "leave unchanged"; a present but blank value is rejected.
pub fn required_patch(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, FieldError> {
    value.map(|v| required(field, &v)).transpose()
}

/// Trimmed value of an optional field, `None` when blank
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trimmed, lowercased email address
pub fn email(value: &str) -> Result<String, FieldError> {
    let email = required("email", value)?.to_lowercase();
    if !is_email(&email) {
        return Err(FieldError::Invalid(
            "Please enter a valid email address".to_string(),
        ));
    }
    Ok(email)
}

/// Loose email shape check: something@something.tld, no whitespace
pub fn is_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("static email pattern"))
        .is_match(value)
}
