use std::fmt;

use crate::v1::ValidationError;

/// Collection of tasks, keyed by task id.
pub const TASKS: &str = "tasks";
/// The contact list, stored as one array.
pub const CONTACTS: &str = "contacts";
/// Registered users, keyed by store-generated key.
pub const USERS: &str = "user";
/// Shared pool of unused avatar colours.
pub const COLOR_POOL: &str = "randomColorsJson";

const FORBIDDEN: &[char] = &['.', '$', '#', '[', ']'];

/// A slash-delimited address into the document store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses `path`, ignoring leading, trailing and repeated slashes.
    pub fn parse(path: &str) -> Result<Self, ValidationError> {
        let mut segments = Vec::new();

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if segment.contains(FORBIDDEN) {
                return Err(ValidationError::InvalidKey(segment.to_owned()));
            }

            segments.push(segment.to_owned());
        }

        Ok(Self { segments })
    }

    pub fn child(&self, key: impl fmt::Display) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn tasks() -> Self {
        Self::root().child(TASKS)
    }

    pub fn task(id: impl fmt::Display) -> Self {
        Self::tasks().child(id)
    }

    pub fn contacts() -> Self {
        Self::root().child(CONTACTS)
    }

    pub fn users() -> Self {
        Self::root().child(USERS)
    }

    pub fn color_pool() -> Self {
        Self::root().child(COLOR_POOL)
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
