use join_api::v1::{Task, TaskId, TaskStatus};
use tracing::debug;

use crate::{
    contacts::ContactRepository,
    store::Store,
    tasks::TaskRepository,
    users::UserRepository,
    view::{Directory, TaskCard},
    Result,
};

/// The kanban board: tasks bucketed by status, plus the task being dragged.
pub struct Board<S> {
    tasks: TaskRepository<S>,
    directory: Directory,
    dragged: Option<TaskId>,
}

impl<S: Store + Clone> Board<S> {
    pub fn new(store: S) -> Self {
        Self {
            tasks: TaskRepository::new(store),
            directory: Directory::new(),
            dragged: None,
        }
    }

    /// Reloads tasks, along with the users and contacts whose colours the
    /// cards show.
    pub async fn load(&mut self) {
        let mut users = UserRepository::new(self.tasks.store().clone());
        users.list_users().await;

        let mut contacts = ContactRepository::new(self.tasks.store().clone());
        contacts.list_contacts().await;

        self.directory = Directory::new()
            .with_users(users.users())
            .with_contacts(contacts.contacts());

        self.tasks.list_tasks().await;
    }
}

impl<S: Store> Board<S> {
    pub fn tasks(&self) -> &TaskRepository<S> {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskRepository<S> {
        &mut self.tasks
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn start_dragging(&mut self, id: TaskId) {
        self.dragged = Some(id);
    }

    pub fn dragged(&self) -> Option<&TaskId> {
        self.dragged.as_ref()
    }

    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    /// Drops the dragged task into `status`.
    ///
    /// Without a drag in progress, or when the dragged task no longer
    /// exists, nothing happens. The drag ends only once the move is stored.
    pub async fn move_to(&mut self, status: TaskStatus) -> Result<bool> {
        let Some(id) = self.dragged.clone() else {
            debug!(%status, "drop without drag");
            return Ok(false);
        };

        let moved = self.tasks.update_status(&id, status).await?;

        if moved {
            self.dragged = None;
        }

        Ok(moved)
    }

    pub fn card(&self, id: &TaskId) -> Option<TaskCard> {
        (self.tasks.get(id)).map(|task| TaskCard::new(task, &self.directory))
    }

    pub fn columns(&self) -> Vec<Column> {
        self.search("")
    }

    /// Columns holding only the cards that match `term`.
    pub fn search(&self, term: &str) -> Vec<Column> {
        let cards: Vec<TaskCard> = (self.tasks.tasks().iter())
            .map(|task| TaskCard::new(task, &self.directory))
            .filter(|card| card.matches(term))
            .collect();

        (TaskStatus::ALL.into_iter())
            .map(|status| Column {
                status,
                cards: (cards.iter())
                    .filter(|card| card.status == status)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    pub fn summary(&self) -> Summary {
        Summary::of(self.tasks.tasks())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub status: TaskStatus,
    pub cards: Vec<TaskCard>,
}

impl Column {
    pub const PLACEHOLDER: &'static str = "No tasks";

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub to_do: usize,
    pub done: usize,
    pub urgent: usize,
    pub total: usize,
    pub in_progress: usize,
    pub await_feedback: usize,
}

impl Summary {
    pub fn of<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut summary = Summary::default();

        for task in tasks {
            summary.total += 1;

            if task.is_urgent() {
                summary.urgent += 1;
            }

            match task.status {
                TaskStatus::ToDo => summary.to_do += 1,
                TaskStatus::InProgress => summary.in_progress += 1,
                TaskStatus::AwaitFeedback => summary.await_feedback += 1,
                TaskStatus::Done => summary.done += 1,
            }
        }

        summary
    }
}
