use join_api::v1::{lenient, next_id, StorePath, Task, TaskDraft, TaskEdit, TaskId, TaskStatus};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::{
    store::{Store, StoreResult},
    view::Progress,
    Result,
};

/// The board's tasks, mirrored from the `tasks` collection.
pub struct TaskRepository<S> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: Store> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tasks in key order, as of the last load.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == *id)
    }

    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == *id)
    }

    /// Reloads every task. An unreachable store reads as an empty board.
    pub async fn list_tasks(&mut self) -> &[Task] {
        self.tasks = self.fetch().await;
        &self.tasks
    }

    /// Stores a new task in [`TaskStatus::ToDo`] under the next free id.
    pub async fn create_task(&mut self, draft: TaskDraft) -> Result<TaskId> {
        draft.validate()?;

        let id = next_id(&self.fetch().await);
        let task = draft.into_task(TaskId::Key(id.to_string()))?;

        let written = self.write(&task).await;
        self.list_tasks().await;
        written?;

        info!(id = %task.id, title = %task.task, "created task");

        Ok(task.id)
    }

    /// Moves a task to another column. Unknown ids are ignored.
    pub async fn update_status(&mut self, id: &TaskId, status: TaskStatus) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == *id) else {
            debug!(%id, "no task to move");
            return Ok(false);
        };

        task.status = status;
        let task = task.clone();

        let written = self.write(&task).await;
        self.list_tasks().await;
        written?;

        info!(%id, %status, "moved task");

        Ok(true)
    }

    /// Flips one subtask and writes the task back without reloading.
    ///
    /// Returns the new progress, or `None` when either index is unknown.
    pub async fn toggle_subtask(
        &mut self,
        id: &TaskId,
        index: usize,
    ) -> Result<Option<Progress>> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == *id) else {
            return Ok(None);
        };

        let Some(done) = task.toggle_subtask(index) else {
            return Ok(None);
        };

        let task = task.clone();
        self.write(&task).await?;

        debug!(%id, index, done, "toggled subtask");

        Ok(Some(Progress::of(&task.sub_tasks)))
    }

    pub async fn save_task_edits(&mut self, id: &TaskId, edit: TaskEdit) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == *id) else {
            return Ok(false);
        };

        edit.apply(task);
        let task = task.clone();

        let written = self.write(&task).await;
        self.list_tasks().await;
        written?;

        info!(%id, "edited task");

        Ok(true)
    }

    /// Removes a task and renumbers the rest densely from `0`, replacing
    /// the whole collection.
    pub async fn reindex_and_delete(&mut self, id: &TaskId) -> Result<bool> {
        let Some(position) = self.position(id) else {
            debug!(%id, "no task to delete");
            return Ok(false);
        };

        self.tasks.remove(position);

        let mut collection = Map::new();
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.id = TaskId::Number(index as i64);
            collection.insert(index.to_string(), task.to_stored()?);
        }

        let written = (self.store)
            .put(&StorePath::tasks(), &Value::Object(collection))
            .await;
        self.list_tasks().await;
        written?;

        info!(%id, remaining = self.tasks.len(), "deleted task");

        Ok(true)
    }

    async fn fetch(&self) -> Vec<Task> {
        let value = self.store.load(&StorePath::tasks()).await;
        value.map(decode_tasks).unwrap_or_default()
    }

    async fn write(&self, task: &Task) -> StoreResult<()> {
        let value = task.to_stored()?;
        self.store.put(&StorePath::task(&task.id), &value).await?;
        Ok(())
    }
}

/// Decodes the `tasks` collection, taking each task's id from its key.
///
/// Entries that are not objects are skipped. Objects always decode, with
/// fields the model cannot represent kept for the next write.
pub fn decode_tasks(collection: Value) -> Vec<Task> {
    (lenient::entries(collection).into_iter())
        .filter_map(|(key, value)| {
            let Value::Object(mut fields) = value else {
                warn!(%key, "skipping task that is not an object");
                return None;
            };

            fields.insert(String::from("id"), Value::String(key.clone()));

            match Task::from_stored(fields) {
                Ok(task) => Some(task),
                Err(err) => {
                    warn!(%key, "skipping unreadable task: {err}");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use join_api::v1::Priority;
    use serde_json::json;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{store::MemoryStore, StoreClient};

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_owned(),
            due_date: String::from("2024-03-05"),
            category: String::from("technical-task"),
            ..TaskDraft::default()
        }
    }

    async fn repository(tasks: Value) -> TaskRepository<MemoryStore> {
        let mut repository = TaskRepository::new(MemoryStore::new(json!({ "tasks": tasks })));
        repository.list_tasks().await;
        repository
    }

    fn ids<S: Store>(repository: &TaskRepository<S>) -> Vec<String> {
        (repository.tasks().iter())
            .map(|task| task.id.to_string())
            .collect()
    }

    #[test]
    fn ids_come_from_keys() {
        let tasks = decode_tasks(json!({
            "10": { "id": 99, "task": "ten", "status": "done" },
            "2": { "task": "two" },
            "junk": "not a task",
            "3": null,
        }));

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, TaskId::Number(2));
        assert_eq!(tasks[1].id, TaskId::Number(10));
        assert_eq!(tasks[1].status, TaskStatus::Done);
    }

    #[test]
    fn arrays_with_holes_decode() {
        let tasks = decode_tasks(json!([null, { "task": "one" }, null, { "task": "three" }]));

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, TaskId::Number(1));
        assert_eq!(tasks[1].task, "three");
    }

    #[tokio::test]
    async fn create_assigns_next_id() {
        let mut repository = repository(json!({
            "3": { "task": "old" },
            "-Nabc": { "task": "pushed" },
        }))
        .await;

        let id = repository.create_task(draft("New")).await.unwrap();

        assert_eq!(id, TaskId::Number(4));
        let stored = repository.store().snapshot();
        assert_eq!(stored["tasks"]["4"]["task"], "New");
        assert_eq!(stored["tasks"]["4"]["status"], "toDo");
        assert_eq!(stored["tasks"]["4"]["dueDate"], "05-03-2024");
        assert_eq!(repository.get(&id).unwrap().task, "New");
    }

    #[tokio::test]
    async fn create_on_empty_store_starts_at_one() {
        let mut repository = TaskRepository::new(MemoryStore::default());

        let id = repository.create_task(draft("First")).await.unwrap();

        assert_eq!(id, TaskId::Number(1));
        assert_eq!(repository.tasks().len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft() {
        let mut repository = TaskRepository::new(MemoryStore::default());

        let err = repository.create_task(draft("  ")).await.unwrap_err();

        assert!(matches!(err, crate::Error::Invalid(_)));
        assert_eq!(repository.store().snapshot(), json!(null));
    }

    #[tokio::test]
    async fn status_update_is_persisted() {
        let mut repository = repository(json!({ "1": { "task": "a", "status": "toDo" } })).await;

        let moved = (repository.update_status(&TaskId::Number(1), TaskStatus::AwaitFeedback))
            .await
            .unwrap();

        assert!(moved);
        assert_eq!(repository.store().snapshot()["tasks"]["1"]["status"], "awaitFeedback");
        assert_eq!(repository.tasks()[0].status, TaskStatus::AwaitFeedback);

        let moved = (repository.update_status(&TaskId::Number(7), TaskStatus::Done))
            .await
            .unwrap();
        assert!(!moved);
    }

    #[tokio::test]
    async fn delete_reindexes_densely() {
        let mut repository = repository(json!({
            "1": { "task": "a" },
            "4": { "task": "b" },
            "9": { "task": "c" },
            "12": { "task": "d" },
        }))
        .await;

        let deleted = repository.reindex_and_delete(&TaskId::Number(4)).await.unwrap();

        assert!(deleted);
        assert_eq!(ids(&repository), ["0", "1", "2"]);

        let titles: Vec<_> = repository.tasks().iter().map(|t| t.task.as_str()).collect();
        assert_eq!(titles, ["a", "c", "d"]);

        let stored = repository.store().snapshot();
        assert_eq!(stored["tasks"]["2"]["task"], "d");
        assert_eq!(stored["tasks"]["2"]["id"], 2);
        assert!(stored["tasks"].get("12").is_none());
    }

    #[tokio::test]
    async fn delete_keeps_tasks_with_odd_fields() {
        let mut repository = repository(json!({
            "0": { "task": "a" },
            "1": { "task": "b", "status": "archived" },
            "2": { "task": 42, "priority": "someday" },
            "3": { "task": "d" },
        }))
        .await;

        assert_eq!(repository.tasks().len(), 4);
        assert!(repository.reindex_and_delete(&TaskId::Number(0)).await.unwrap());

        let snapshot = repository.store().snapshot();
        let stored = &snapshot["tasks"];
        assert_eq!(lenient::entries(stored.clone()).len(), 3);
        assert_eq!(stored["0"]["status"], "archived");
        assert_eq!(stored["1"]["task"], 42);
        assert_eq!(stored["1"]["priority"], "someday");
        assert_eq!(stored["1"]["id"], 1);
        assert_eq!(repository.tasks().len(), 3);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_writes_nothing() {
        let mut repository = repository(json!({ "5": { "task": "a" } })).await;
        let before = repository.store().snapshot();

        let deleted = (repository.reindex_and_delete(&TaskId::Key(String::from("x"))))
            .await
            .unwrap();

        assert!(!deleted);
        assert_eq!(repository.store().snapshot(), before);
    }

    #[tokio::test]
    async fn subtask_toggle_reports_progress() {
        let mut repository = repository(json!({
            "1": { "task": "a", "subTasks": [
                { "task": "x", "done": false },
                { "task": "y", "done": false },
            ] },
        }))
        .await;

        let progress = (repository.toggle_subtask(&TaskId::Number(1), 1))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(progress.done, 1);
        assert_eq!(progress.percent, 50);
        assert_eq!(repository.store().snapshot()["tasks"]["1"]["subTasks"][1]["done"], true);

        let missing = repository.toggle_subtask(&TaskId::Number(1), 5).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn toggle_keeps_malformed_subtasks() {
        let mut repository = repository(json!({
            "1": { "task": "a", "subTasks": [{ "done": false }, { "done": "true" }] },
        }))
        .await;

        let progress = (repository.toggle_subtask(&TaskId::Number(1), 0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(progress.done, 2);

        let snapshot = repository.store().snapshot();
        let sub_tasks = &snapshot["tasks"]["1"]["subTasks"];
        assert_eq!(sub_tasks.as_array().map(Vec::len), Some(2));
        assert_eq!(sub_tasks[0]["done"], true);
        assert_eq!(sub_tasks[1]["done"], true);
    }

    #[tokio::test]
    async fn moving_keeps_untouched_fields_as_stored() {
        let mut repository = repository(json!({
            "1": { "task": 7, "priority": "urgent", "dueDate": null, "status": "archived" },
        }))
        .await;

        assert_eq!(repository.tasks()[0].status, TaskStatus::ToDo);
        assert!(repository.update_status(&TaskId::Number(1), TaskStatus::Done).await.unwrap());

        let snapshot = repository.store().snapshot();
        let stored = &snapshot["tasks"]["1"];
        assert_eq!(stored["status"], "done");
        assert_eq!(stored["task"], 7);
        assert_eq!(stored["priority"], "urgent");
    }

    #[tokio::test]
    async fn edits_replace_form_fields() {
        let mut repository = repository(json!({
            "2": { "task": "old", "title": "Old", "priority": "Low", "owner": "kept" },
        }))
        .await;

        let id = TaskId::Number(2);
        let mut edit = TaskEdit::for_task(repository.get(&id).unwrap());
        edit.title = String::from("New");
        edit.due_date = String::from("2025-12-01");
        edit.priority = Some(Priority::Urgent);

        assert!(repository.save_task_edits(&id, edit).await.unwrap());

        let snapshot = repository.store().snapshot();
        let stored = &snapshot["tasks"]["2"];
        assert_eq!(stored["task"], "New");
        assert_eq!(stored["dueDate"], "01-12-2025");
        assert_eq!(stored["priority"], "Urgent");
        assert_eq!(stored["owner"], "kept");
        assert!(repository.get(&id).unwrap().is_urgent());
        assert_eq!(repository.get(&id).unwrap().display_title(), "New");
    }

    #[tokio::test]
    async fn unreachable_store_lists_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut repository = TaskRepository::new(StoreClient::new(&server.uri()).unwrap());

        assert!(repository.list_tasks().await.is_empty());
    }

    #[tokio::test]
    async fn failed_write_is_reported_after_reload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "1": { "task": "a" } })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut repository = TaskRepository::new(StoreClient::new(&server.uri()).unwrap());
        repository.list_tasks().await;

        let err = (repository.update_status(&TaskId::Number(1), TaskStatus::Done))
            .await
            .unwrap_err();

        assert!(matches!(err, crate::Error::Store(_)));
        assert_eq!(repository.tasks()[0].status, TaskStatus::ToDo);
    }
}
