mod color;
mod contact;
mod date;
pub mod document;
pub mod lenient;
mod path;
mod task;
mod user;
mod validate;

pub use color::{
    color_for_index, color_for_letter, color_for_name, initials, ASSIGNEE_PALETTE,
    CONTACT_PALETTE, DEFAULT_COLOR,
};
pub use contact::{capitalize_words, Contact, ContactDraft, NO_PHONE};
pub use date::{from_input_format, parse_input_date, parse_stored_date, to_input_format};
pub use path::{StorePath, COLOR_POOL, CONTACTS, TASKS, USERS};
pub use task::{
    next_id, Category, ParseEnumError, Priority, SubTask, Task, TaskDraft, TaskEdit, TaskId, TaskStatus,
};
pub use user::{Profile, SignUp, User, MIN_PASSWORD_LEN};
pub use validate::{is_valid_email, ValidationError};
