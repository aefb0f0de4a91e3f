use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Reasons a form or store key is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("not a valid email address: {0}")]
    InvalidEmail(String),

    #[error("email address is already registered: {0}")]
    EmailTaken(String),

    #[error("name must be a first and a last name: {0:?}")]
    InvalidName(String),

    #[error("password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("the privacy policy must be accepted")]
    PolicyNotAccepted,

    #[error("not a valid due date: {0:?}")]
    InvalidDueDate(String),

    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Checks the `local@domain.tld` shape, without whitespace or extra `@`.
pub fn is_valid_email(email: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();

    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
        .is_match(email)
}

pub(crate) fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match value.trim().is_empty() {
        true => Err(ValidationError::Missing(field)),
        false => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_basic_addresses() {
        assert!(is_valid_email("anna@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.de"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in ["", "anna", "anna@", "anna@example", "an na@example.com", "a@b@c.de"] {
            assert!(!is_valid_email(email), "{email} should be rejected");
        }
    }

    #[test]
    fn required_ignores_whitespace() {
        assert_eq!(required("name", "  "), Err(ValidationError::Missing("name")));
        assert_eq!(required("name", "Anna"), Ok(()));
    }
}
