//! Render-ready projections of tasks and contacts.

use join_api::v1::{
    color_for_index, color_for_name, initials, Contact, SubTask, Task, TaskId, TaskStatus, User,
    DEFAULT_COLOR,
};

/// Avatar colours by display name.
///
/// Users carry the colour they were given at sign-up, contacts fall back to
/// the colour of their first initial. Earlier entries win.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    colors: Vec<(String, String)>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users<'a>(mut self, users: impl IntoIterator<Item = &'a User>) -> Self {
        for user in users {
            if let Some(color) = &user.random_color {
                self.insert(user.full_name(), color.clone());
            }
        }

        self
    }

    pub fn with_contacts<'a>(mut self, contacts: impl IntoIterator<Item = &'a Contact>) -> Self {
        for contact in contacts {
            self.insert(contact.name.clone(), color_for_name(&contact.name).to_owned());
        }

        self
    }

    pub fn insert(&mut self, name: String, color: String) {
        if self.color(&name).is_none() {
            self.colors.push((name, color));
        }
    }

    pub fn color(&self, name: &str) -> Option<&str> {
        (self.colors.iter())
            .find(|(known, _)| known == name)
            .map(|(_, color)| color.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Avatar {
    pub name: String,
    pub initials: String,
    pub color: String,
}

impl Avatar {
    pub fn resolve(name: &str, directory: &Directory) -> Self {
        Self {
            name: name.to_owned(),
            initials: initials(name),
            color: directory.color(name).unwrap_or(DEFAULT_COLOR).to_owned(),
        }
    }
}

/// Completion of a task's subtasks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    /// Rounded, `0` without subtasks.
    pub percent: u8,
}

impl Progress {
    pub fn of(sub_tasks: &[SubTask]) -> Self {
        let total = sub_tasks.len();
        let done = sub_tasks.iter().filter(|sub_task| sub_task.done).count();

        let percent = match total {
            0 => 0,
            _ => (done as f64 / total as f64 * 100.0).round() as u8,
        };

        Self {
            done,
            total,
            percent,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn label(&self) -> String {
        format!("{}/{} Subtasks", self.done, self.total)
    }
}

/// A task prepared for the board and its detail view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub status: TaskStatus,
    pub category: String,
    /// Lowercase category with whitespace replaced by `_`.
    pub category_class: String,
    pub title: String,
    pub details: String,
    pub assignees: Vec<Avatar>,
    /// Lowercase priority, `low` when unset.
    pub priority: &'static str,
    /// `DD-MM-YYYY`
    pub due_date: Option<String>,
    pub sub_tasks: Vec<SubTask>,
    pub progress: Progress,
}

impl TaskCard {
    pub fn new(task: &Task, directory: &Directory) -> Self {
        let category = match task.category.label().trim() {
            "" => String::from("General"),
            label => label.to_owned(),
        };

        Self {
            id: task.id.clone(),
            status: task.status,
            category_class: category_class(&category),
            category,
            title: task.display_title().to_owned(),
            details: task.description.clone(),
            assignees: (task.assigned_to.iter())
                .map(|name| Avatar::resolve(name, directory))
                .collect(),
            priority: task.priority.map_or("low", |p| p.icon_key()),
            due_date: task.due_date.clone(),
            sub_tasks: task.sub_tasks.clone(),
            progress: Progress::of(&task.sub_tasks),
        }
    }

    /// Case-insensitive match against title and details.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();

        term.is_empty()
            || self.title.to_lowercase().contains(&term)
            || self.details.to_lowercase().contains(&term)
    }
}

pub fn category_class(category: &str) -> String {
    (category.chars())
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// A contact as listed, with its position in the sorted list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactEntry {
    pub index: usize,
    pub name: String,
    pub mail: String,
    pub initials: String,
    pub color: &'static str,
}

/// Contacts sharing a first letter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactGroup {
    pub letter: char,
    pub entries: Vec<ContactEntry>,
}

/// Groups an already sorted contact list under the uppercase first letter of
/// each name. Colours follow the list position.
pub fn contact_groups(contacts: &[Contact]) -> Vec<ContactGroup> {
    let mut groups: Vec<ContactGroup> = Vec::new();

    for (index, contact) in contacts.iter().enumerate() {
        let letter = (contact.name.chars().next())
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or(' ');

        let entry = ContactEntry {
            index,
            name: contact.name.clone(),
            mail: contact.mail.clone(),
            initials: contact.initials(),
            color: color_for_index(index),
        };

        match groups.last_mut() {
            Some(group) if group.letter == letter => group.entries.push(entry),
            _ => groups.push(ContactGroup {
                letter,
                entries: vec![entry],
            }),
        }
    }

    groups
}
