use serde::{Deserialize, Serialize};

use crate::v1::{is_valid_email, ValidationError};

pub const MIN_PASSWORD_LEN: usize = 8;

/// A registered user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    /// Kept in plain text.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub random_color: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
            .trim()
            .to_owned()
    }
}

/// Names derived from a valid sign-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub initials: String,
}

/// The registration form.
#[derive(Clone, Debug, Default)]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_policy: bool,
}

impl SignUp {
    /// Checks every field in form order and derives the profile.
    pub fn validate(&self) -> Result<Profile, ValidationError> {
        let profile = self.profile()?;

        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_owned()));
        }

        let password = self.password.trim();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        if password != self.confirm_password.trim() {
            return Err(ValidationError::PasswordMismatch);
        }

        if !self.accept_policy {
            return Err(ValidationError::PolicyNotAccepted);
        }

        Ok(profile)
    }

    /// Exactly two words, without surrounding whitespace.
    fn profile(&self) -> Result<Profile, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Missing("name"));
        }

        let parts: Vec<&str> = self.name.split_whitespace().collect();
        let [first, last] = parts.as_slice() else {
            return Err(ValidationError::InvalidName(self.name.clone()));
        };

        if self.name != self.name.trim() {
            return Err(ValidationError::InvalidName(self.name.clone()));
        }

        let initials = [first, last]
            .iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect();

        Ok(Profile {
            first_name: first.to_string(),
            last_name: last.to_string(),
            initials,
        })
    }

    pub fn into_user(self, profile: Profile, random_color: Option<String>) -> User {
        User {
            firstname: profile.first_name,
            lastname: profile.last_name,
            email: self.email.trim().to_owned(),
            password: self.password.trim().to_owned(),
            initials: profile.initials,
            random_color,
        }
    }
}
