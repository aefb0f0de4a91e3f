use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::v1::{color::initials, is_valid_email, lenient, validate::required, ValidationError};

/// Stored in place of a missing phone number.
pub const NO_PHONE: &str = "No phone number available";

/// An entry of the contact list.
///
/// Older records carry no `id`; they receive one when first read. Numbers
/// stored in place of text are read as text, and a `null` phone as
/// [`NO_PHONE`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default = "Uuid::new_v4", deserialize_with = "lenient_id")]
    pub id: Uuid,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub mail: String,
    #[serde(default = "no_phone", deserialize_with = "lenient_phone")]
    pub phone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn no_phone() -> String {
    NO_PHONE.to_owned()
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|id| id.parse().ok()).unwrap_or_else(Uuid::new_v4))
}

fn lenient_phone<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::optional_string(deserializer)?.unwrap_or_else(no_phone))
}

impl Contact {
    /// Whether name, mail and phone all match, ignoring the id.
    pub fn same_details(&self, other: &Contact) -> bool {
        self.name == other.name && self.mail == other.mail && self.phone == other.phone
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub mail: String,
    pub phone: String,
}

impl ContactDraft {
    pub fn for_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            mail: contact.mail.clone(),
            phone: contact.phone.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("mail", &self.mail)?;
        required("phone", &self.phone)?;

        match is_valid_email(self.mail.trim()) {
            true => Ok(()),
            false => Err(ValidationError::InvalidEmail(self.mail.trim().to_owned())),
        }
    }

    /// Builds a new contact with a fresh id.
    pub fn into_contact(self) -> Result<Contact, ValidationError> {
        self.into_contact_with_id(Uuid::new_v4())
    }

    pub fn into_contact_with_id(self, id: Uuid) -> Result<Contact, ValidationError> {
        self.validate()?;

        let phone = match self.phone.trim() {
            "" => no_phone(),
            phone => phone.to_owned(),
        };

        Ok(Contact {
            id,
            name: capitalize_words(self.name.trim()),
            mail: self.mail.trim().to_owned(),
            phone,
            extra: Map::new(),
        })
    }
}

/// Upper-cases the first character of every word, leaving the rest alone.
pub fn capitalize_words(sentence: &str) -> String {
    let mut capitalized = String::with_capacity(sentence.len());
    let mut word_start = true;

    for c in sentence.chars() {
        match word_start && c.is_alphanumeric() {
            true => capitalized.extend(c.to_uppercase()),
            false => capitalized.push(c),
        }

        word_start = c.is_whitespace();
    }

    capitalized
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn draft(name: &str, mail: &str, phone: &str) -> ContactDraft {
        ContactDraft {
            name: name.into(),
            mail: mail.into(),
            phone: phone.into(),
        }
    }

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("anna  van der berg"), "Anna  Van Der Berg");
        assert_eq!(capitalize_words("ÖZIL mesut"), "ÖZIL Mesut");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn draft_validation() {
        assert_eq!(
            draft("", "a@b.de", "1").validate(),
            Err(ValidationError::Missing("name"))
        );
        assert_eq!(
            draft("Anna", "a@b", "1").validate(),
            Err(ValidationError::InvalidEmail("a@b".into()))
        );
        assert_eq!(
            draft("Anna", "a@b.de", " ").validate(),
            Err(ValidationError::Missing("phone"))
        );
        assert!(draft("Anna", "a@b.de", "0151").validate().is_ok());
    }

    #[test]
    fn into_contact_capitalizes_and_trims() {
        let contact = draft(" anna schmidt ", " anna@example.com", "0151 123")
            .into_contact()
            .unwrap();

        assert_eq!(contact.name, "Anna Schmidt");
        assert_eq!(contact.mail, "anna@example.com");
        assert_eq!(contact.initials(), "AS");
    }

    #[test]
    fn legacy_record_gets_id_and_phone() {
        let contact: Contact =
            serde_json::from_value(json!({ "name": "Ben", "mail": "ben@example.com" })).unwrap();

        assert_eq!(contact.phone, NO_PHONE);
        assert!(!contact.id.is_nil());
    }

    #[test]
    fn odd_values_are_read_as_text() {
        let contact: Contact = serde_json::from_value(json!({
            "id": 7,
            "name": "Bea",
            "mail": null,
            "phone": 1512345,
            "group": "work"
        }))
        .unwrap();

        assert_eq!(contact.name, "Bea");
        assert_eq!(contact.mail, "");
        assert_eq!(contact.phone, "1512345");
        assert!(!contact.id.is_nil());

        let written = serde_json::to_value(&contact).unwrap();
        assert_eq!(written["group"], "work");

        let contact: Contact = serde_json::from_value(json!({ "phone": null })).unwrap();
        assert_eq!(contact.phone, NO_PHONE);
    }

    #[test]
    fn same_details_ignores_id() {
        let a = draft("Anna", "a@b.de", "1").into_contact().unwrap();
        let b = draft("Anna", "a@b.de", "1").into_contact().unwrap();

        assert_ne!(a, b);
        assert!(a.same_details(&b));
    }
}
