use std::{
    borrow::Cow,
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::v1::{
    date::{from_input_format, parse_input_date, to_input_format},
    lenient::{self, seq_or_map},
    validate::required,
    ValidationError,
};

/// The kanban column a task sits in.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    ToDo,
    InProgress,
    AwaitFeedback,
    Done,
}

impl TaskStatus {
    /// Columns in board order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::AwaitFeedback,
        TaskStatus::Done,
    ];

    /// The stored representation.
    pub fn key(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "toDo",
            TaskStatus::InProgress => "inProgress",
            TaskStatus::AwaitFeedback => "awaitFeedback",
            TaskStatus::Done => "done",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::AwaitFeedback => "Await feedback",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accepts the stored key in any case, with or without separators
/// (`toDo`, `todo`, `to-do`, `in_progress`, ...).
impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = (s.chars())
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|status| status.key().to_lowercase() == normalized)
            .ok_or_else(|| ParseEnumError::new("task status", s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Priority {
    Low,
    Medium,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::Urgent];

    /// Lower-case name, as used for icon lookup.
    pub fn icon_key(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Self::ALL
            .into_iter()
            .find(|priority| priority.icon_key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::new("priority", s))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Task category. The two known labels are recognised, anything else is
/// kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Category {
    TechnicalTask,
    UserStory,
    Other(String),
}

impl Category {
    /// Maps a form value such as `technical-task` to its category.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "technical-task" => Category::TechnicalTask,
            "user-story" => Category::UserStory,
            other => Category::from(other.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::TechnicalTask => "Technical Task",
            Category::UserStory => "User Story",
            Category::Other(label) => label,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label().trim().is_empty()
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Technical Task" => Category::TechnicalTask,
            "User Story" => Category::UserStory,
            _ => Category::Other(label),
        }
    }
}

impl From<Option<String>> for Category {
    fn from(label: Option<String>) -> Self {
        label.map(Category::from).unwrap_or_default()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            known => known.label().to_owned(),
        }
    }
}

/// Task identifier: an integer or a string key.
///
/// Ids compare loosely, so `Number(3)` equals `Key("3")`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Key(String),
}

impl TaskId {
    /// The integer value, read like a lenient integer parse: leading
    /// whitespace, an optional sign, then as many digits as present.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            TaskId::Number(number) => Some(*number),
            TaskId::Key(key) => leading_int(key),
        }
    }

    fn canonical(&self) -> Cow<'_, str> {
        match self {
            TaskId::Number(number) => Cow::Owned(number.to_string()),
            TaskId::Key(key) => match key.trim().parse::<i64>() {
                Ok(number) => Cow::Owned(number.to_string()),
                Err(_) => Cow::Borrowed(key),
            },
        }
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = (digits.find(|c: char| !c.is_ascii_digit())).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|number| sign * number)
}

impl PartialEq for TaskId {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for TaskId {}

impl Hash for TaskId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(number) => write!(f, "{number}"),
            TaskId::Key(key) => f.write_str(key),
        }
    }
}

impl From<i64> for TaskId {
    fn from(number: i64) -> Self {
        TaskId::Number(number)
    }
}

impl From<&str> for TaskId {
    fn from(key: &str) -> Self {
        TaskId::Key(key.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(key: String) -> Self {
        TaskId::Key(key)
    }
}

impl FromStr for TaskId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TaskId::from(s))
    }
}

/// One checklist entry of a task.
///
/// Decoding never fails: a bare string becomes the entry's text, and a
/// `done` flag stored as `"true"` or `1` counts as checked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct SubTask {
    pub task: String,
    pub done: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubTask {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            done: false,
            extra: Map::new(),
        }
    }
}

impl From<Value> for SubTask {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut extra) => {
                let task = extra.remove("task").and_then(|task| lenient::text(&task));
                let done = extra.remove("done").is_some_and(|done| is_checked(&done));

                Self {
                    task: task.unwrap_or_default(),
                    done,
                    extra,
                }
            }
            other => SubTask::new(lenient::text(&other).unwrap_or_default()),
        }
    }
}

fn is_checked(done: &Value) -> bool {
    match done {
        Value::Bool(done) => *done,
        Value::String(done) => done.trim().eq_ignore_ascii_case("true"),
        Value::Number(done) => done.as_f64().is_some_and(|done| done != 0.0),
        _ => false,
    }
}

/// A task as stored. Fields this model does not know about are carried in
/// `extra` so that full-object writes do not drop them.
///
/// Known fields decode leniently: numbers stand in for text, and an
/// unrecognised status reads as [`TaskStatus::ToDo`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub task: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    /// `DD-MM-YYYY`
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Category,
    #[serde(
        default,
        deserialize_with = "lenient_priority",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "seq_or_map")]
    pub assigned_to: Vec<String>,
    #[serde(default, deserialize_with = "seq_or_map")]
    pub sub_tasks: Vec<SubTask>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: TaskStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    stored: Map<String, Value>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, task: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            task: task.into(),
            title: None,
            description: String::new(),
            due_date: None,
            category: Category::default(),
            priority: None,
            assigned_to: Vec::new(),
            sub_tasks: Vec::new(),
            status: TaskStatus::ToDo,
            extra: Map::new(),
            stored: Map::new(),
        }
    }

    /// Decodes a task object read from the store, remembering the object
    /// for [`Task::to_stored`].
    pub fn from_stored(object: Map<String, Value>) -> serde_json::Result<Self> {
        let mut task: Task = serde_json::from_value(Value::Object(object.clone()))?;
        task.stored = object;
        Ok(task)
    }

    /// The object to write back.
    ///
    /// A field that still decodes to what was read keeps its stored value,
    /// so an unknown status or priority survives until it is changed.
    pub fn to_stored(&self) -> serde_json::Result<Value> {
        let mut object = fields(serde_json::to_value(self)?);

        if !self.stored.is_empty() {
            let read: Task = serde_json::from_value(Value::Object(self.stored.clone()))?;
            let read = fields(serde_json::to_value(read)?);

            for (key, value) in &self.stored {
                if object.get(key) == read.get(key) {
                    object.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(Value::Object(object))
    }

    /// `title`, then `task`, then `"Untitled"`.
    pub fn display_title(&self) -> &str {
        [self.title.as_deref(), Some(self.task.as_str())]
            .into_iter()
            .flatten()
            .find(|title| !title.is_empty())
            .unwrap_or("Untitled")
    }

    pub fn is_urgent(&self) -> bool {
        self.priority == Some(Priority::Urgent)
    }

    /// Flips the subtask at `index`, returning its new state.
    pub fn toggle_subtask(&mut self, index: usize) -> Option<bool> {
        let subtask = self.sub_tasks.get_mut(index)?;
        subtask.done = !subtask.done;
        Some(subtask.done)
    }
}

/// One past the highest integer id, or `1` when there is none.
///
/// Ids that are not integers, or that have no successor, are skipped.
pub fn next_id<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> i64 {
    (tasks.into_iter())
        .filter_map(|task| task.id.as_number())
        .filter_map(|id| id.checked_add(1))
        .fold(1, i64::max)
}

/// The add-task form.
#[derive(Clone, Debug, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub due_date: String,
    /// Form value such as `technical-task`, or a free label.
    pub category: String,
    pub priority: Option<String>,
    pub assigned_to: Vec<String>,
    pub sub_tasks: Vec<String>,
}

impl TaskDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)?;
        required("due date", &self.due_date)?;
        parse_input_date(&self.due_date)?;
        required("category", &self.category)?;
        Ok(())
    }

    /// Builds the stored task. New tasks always start in [`TaskStatus::ToDo`].
    pub fn into_task(self, id: impl Into<TaskId>) -> Result<Task, ValidationError> {
        self.validate()?;

        let sub_tasks = (self.sub_tasks.iter())
            .map(|task| task.trim())
            .filter(|task| !task.is_empty())
            .map(SubTask::new)
            .collect();

        Ok(Task {
            description: self.description.trim().to_owned(),
            due_date: Some(from_input_format(self.due_date.trim())),
            category: Category::from_form_value(&self.category),
            priority: (self.priority.as_deref()).and_then(|p| p.parse().ok()),
            assigned_to: self.assigned_to,
            sub_tasks,
            ..Task::new(id, self.title.trim())
        })
    }
}

/// The edit form of an existing task.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`, empty to clear.
    pub due_date: String,
    pub priority: Option<Priority>,
}

impl TaskEdit {
    /// Pre-fills the form from `task`.
    pub fn for_task(task: &Task) -> Self {
        Self {
            title: task.display_title().to_owned(),
            description: task.description.clone(),
            due_date: (task.due_date.as_deref()).map(to_input_format).unwrap_or_default(),
            priority: task.priority,
        }
    }

    /// A task that carries a separate `title` has it replaced as well.
    pub fn apply(self, task: &mut Task) {
        let title = self.title.trim();
        let due_date = self.due_date.trim();

        if task.title.is_some() {
            task.title = Some(title.to_owned());
        }

        task.task = title.to_owned();
        task.description = self.description.trim().to_owned();
        task.due_date = (!due_date.is_empty()).then(|| from_input_format(due_date));
        task.priority = self.priority;
    }
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(fields) => fields,
        _ => Map::new(),
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<TaskStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|status| status.parse().ok()).unwrap_or_default())
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Category::from(lenient::optional_string(deserializer)?))
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|priority| priority.parse().ok()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn task(value: Value) -> Task {
        serde_json::from_value(value).unwrap()
    }

    fn stored(value: Value) -> Task {
        let Value::Object(object) = value else {
            panic!("not an object: {value}");
        };

        Task::from_stored(object).unwrap()
    }

    #[test]
    fn decodes_stored_task() {
        let task = task(json!({
            "id": "3",
            "task": "Build the board",
            "description": "Drag and drop",
            "dueDate": "05-03-2024",
            "category": "User Story",
            "priority": "urgent",
            "assignedTo": ["Anna Schmidt", "Ben Meier"],
            "subTasks": [{ "task": "Columns" }, { "task": "Cards", "done": true }],
            "status": "inProgress"
        }));

        assert_eq!(task.id, TaskId::Number(3));
        assert_eq!(task.category, Category::UserStory);
        assert_eq!(task.priority, Some(Priority::Urgent));
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.sub_tasks[0], SubTask::new("Columns"));
        assert!(task.sub_tasks[1].done);
    }

    #[test]
    fn assigned_to_object_is_coerced_to_list() {
        let from_object = task(json!({ "id": 1, "assignedTo": { "0": "Alice", "1": "Bob" } }));
        let from_array = task(json!({ "id": 1, "assignedTo": ["Alice", "Bob"] }));

        assert_eq!(from_object.assigned_to, ["Alice", "Bob"]);
        assert_eq!(from_object.assigned_to, from_array.assigned_to);

        let written = serde_json::to_value(&from_object).unwrap();
        assert_eq!(written["assignedTo"], json!(["Alice", "Bob"]));
    }

    #[test]
    fn tolerates_missing_and_odd_fields() {
        let task = task(json!({
            "id": "x",
            "description": null,
            "priority": "someday",
            "category": null,
            "assignedTo": null
        }));

        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.priority, None);
        assert!(task.category.is_empty());
        assert!(task.assigned_to.is_empty());
        assert_eq!(task.display_title(), "Untitled");
    }

    #[test]
    fn unknown_values_are_written_back_until_changed() {
        let mut task = stored(json!({
            "id": "1",
            "task": 42,
            "status": "archived",
            "priority": "someday",
            "dueDate": 20240305
        }));

        assert_eq!(task.task, "42");
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.priority, None);

        let written = task.to_stored().unwrap();
        assert_eq!(written["task"], 42);
        assert_eq!(written["status"], "archived");
        assert_eq!(written["priority"], "someday");
        assert_eq!(written["dueDate"], 20240305);

        task.status = TaskStatus::Done;
        task.priority = Some(Priority::Low);

        let written = task.to_stored().unwrap();
        assert_eq!(written["status"], "done");
        assert_eq!(written["priority"], "Low");
        assert_eq!(written["task"], 42);
    }

    #[test]
    fn malformed_subtasks_survive_a_toggle() {
        let mut task = stored(json!({
            "id": "1",
            "subTasks": [
                { "task": "a", "done": false },
                { "done": "true", "note": "x" },
                "loose",
            ]
        }));

        assert_eq!(task.sub_tasks.len(), 3);
        assert!(task.sub_tasks[1].done);
        assert_eq!(task.sub_tasks[2].task, "loose");

        assert_eq!(task.toggle_subtask(0), Some(true));

        let written = task.to_stored().unwrap();
        assert_eq!(written["subTasks"].as_array().map(Vec::len), Some(3));
        assert_eq!(written["subTasks"][0]["done"], true);
        assert_eq!(written["subTasks"][1]["done"], true);
        assert_eq!(written["subTasks"][1]["note"], "x");
    }

    #[test]
    fn untouched_task_is_written_verbatim() {
        let object = json!({
            "id": "3",
            "task": "a",
            "description": "",
            "category": "",
            "priority": "urgent",
            "assignedTo": { "0": "Anna" },
            "subTasks": [],
            "status": "toDo"
        });
        assert_eq!(stored(object.clone()).to_stored().unwrap(), object);
    }

    #[test]
    fn unknown_fields_survive_a_write() {
        let task = task(json!({ "id": 1, "task": "A", "color": "teal" }));
        let written = serde_json::to_value(&task).unwrap();
        assert_eq!(written["color"], json!("teal"));
        assert_eq!(written["priority"], Value::Null);
        assert_eq!(written["status"], json!("toDo"));
    }

    #[test]
    fn next_id_skips_non_numeric_ids() {
        assert_eq!(next_id(&[] as &[Task]), 1);

        let tasks = [Task::new("3", "a"), Task::new("7", "b"), Task::new("x", "c")];
        assert_eq!(next_id(&tasks), 8);
    }

    #[test]
    fn next_id_skips_ids_without_successor() {
        let tasks = [Task::new("9223372036854775807", "a"), Task::new("5", "b")];

        assert_eq!(next_id(&tasks), 6);
        assert_eq!(next_id(&tasks[..1]), 1);
    }

    #[test]
    fn next_id_reads_leading_digits() {
        let tasks = [
            Task::new(" 12abc", "a"),
            Task::new(TaskId::Number(-4), "b"),
            Task::new("", "c"),
        ];
        assert_eq!(next_id(&tasks), 13);
    }

    #[test]
    fn ids_compare_loosely() {
        assert_eq!(TaskId::Number(0), TaskId::from("0"));
        assert_eq!(TaskId::Number(12), TaskId::from("12"));
        assert_ne!(TaskId::Number(1), TaskId::from("1a"));
        assert_eq!(TaskId::from("0").to_string(), "0");
    }

    #[test]
    fn status_parses_loosely() {
        assert_eq!("toDo".parse(), Ok(TaskStatus::ToDo));
        assert_eq!("in-progress".parse(), Ok(TaskStatus::InProgress));
        assert_eq!("AWAIT_FEEDBACK".parse(), Ok(TaskStatus::AwaitFeedback));
        assert!("later".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn priority_is_capitalized_at_rest() {
        assert_eq!("URGENT".parse(), Ok(Priority::Urgent));
        assert_eq!(serde_json::to_value(Priority::Medium).unwrap(), json!("Medium"));
        assert_eq!(Priority::Medium.icon_key(), "medium");
    }

    #[test]
    fn draft_builds_stored_task() {
        let draft = TaskDraft {
            title: " Write tests ".into(),
            due_date: "2024-03-05".into(),
            category: "technical-task".into(),
            priority: Some("medium".into()),
            assigned_to: vec!["Anna Schmidt".into()],
            sub_tasks: vec!["unit".into(), "  ".into()],
            ..TaskDraft::default()
        };

        let task = draft.into_task("4").unwrap();
        assert_eq!(task.task, "Write tests");
        assert_eq!(task.due_date.as_deref(), Some("05-03-2024"));
        assert_eq!(task.category, Category::TechnicalTask);
        assert_eq!(task.priority, Some(Priority::Medium));
        assert_eq!(task.sub_tasks, [SubTask::new("unit")]);
        assert_eq!(task.status, TaskStatus::ToDo);
    }

    #[test]
    fn draft_requires_title_date_and_category() {
        let draft = TaskDraft {
            title: "x".into(),
            due_date: "05.03.2024".into(),
            category: "user-story".into(),
            ..TaskDraft::default()
        };

        assert!(matches!(draft.validate(), Err(ValidationError::InvalidDueDate(_))));
        assert_eq!(
            TaskDraft::default().validate(),
            Err(ValidationError::Missing("title"))
        );
    }

    #[test]
    fn category_passes_unknown_labels_through() {
        assert_eq!(Category::from_form_value("user-story"), Category::UserStory);
        assert_eq!(
            Category::from_form_value("Research"),
            Category::Other("Research".into())
        );
        assert_eq!(String::from(Category::TechnicalTask), "Technical Task");
    }

    #[test]
    fn edit_round_trips_due_date() {
        let mut task = Task::new(TaskId::Number(1), "Old");
        task.due_date = Some("05-03-2024".into());

        let mut edit = TaskEdit::for_task(&task);
        assert_eq!(edit.due_date, "2024-03-05");

        edit.title = "New".into();
        edit.priority = Some(Priority::Low);
        edit.apply(&mut task);

        assert_eq!(task.task, "New");
        assert_eq!(task.due_date.as_deref(), Some("05-03-2024"));
        assert_eq!(task.priority, Some(Priority::Low));
    }

    #[test]
    fn toggling_out_of_range_is_a_no_op() {
        let mut task = Task::new(TaskId::Number(1), "a");
        task.sub_tasks.push(SubTask::new("b"));

        assert_eq!(task.toggle_subtask(0), Some(true));
        assert_eq!(task.toggle_subtask(0), Some(false));
        assert_eq!(task.toggle_subtask(5), None);
    }
}
