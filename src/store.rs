use log::debug;

use crate::models::{DEFAULT_LIST_ID, List, Priority, Task};
use crate::storage::Storage;
use crate::utils::now_millis;

/// Partial update for a List. Outer Option = "should this field change",
/// inner value = what it becomes.
#[derive(Debug, Default, Clone)]
pub struct ListUpdate {
    pub title: Option<String>,
    pub color: Option<Option<String>>,
}

/// Partial update for a Task. Clearable fields use Option<Option<T>> so a
/// caller can distinguish "leave alone" from "set to none".
#[derive(Debug, Default, Clone)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub completed_at: Option<Option<i64>>,
    pub priority: Option<Option<Priority>>,
    pub due_date: Option<Option<i64>>,
    pub list_id: Option<String>,
}

/// Single source of truth for Lists, Tasks, and the active-list selector.
///
/// All mutation goes through the operations below; presentation code never
/// touches the collections directly. Invalid input (blank titles, unknown ids)
/// is a silent no-op rather than an error, and every successful mutation
/// mirrors both collections to storage.
pub struct Store {
    lists: Vec<List>,
    tasks: Vec<Task>,
    active_list_id: String,
    storage: Storage,
}

impl Store {
    /// Load persisted state, seeding the Inbox list on first run or when the
    /// stored blob is unreadable.
    pub fn new(storage: Storage) -> Self {
        let (lists, tasks) = match storage.load() {
            Some(data) => (data.lists, data.tasks),
            None => (vec![List::default_list()], Vec::new()),
        };

        let active_list_id = lists
            .first()
            .map(|list| list.id.clone())
            .unwrap_or_else(|| DEFAULT_LIST_ID.to_string());

        Self {
            lists,
            tasks,
            active_list_id,
            storage,
        }
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn active_list_id(&self) -> &str {
        &self.active_list_id
    }

    pub fn get_list(&self, id: &str) -> Option<&List> {
        self.lists.iter().find(|list| list.id == id)
    }

    pub fn get_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// The currently selected list, when the selector points at a known id
    pub fn active_list(&self) -> Option<&List> {
        self.get_list(&self.active_list_id)
    }

    /// Create a list and make it active. Blank titles are a no-op.
    /// Titles are not required to be unique.
    pub fn create_list(&mut self, title: &str) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let list = List::new(title.to_string());
        let id = list.id.clone();
        debug!("created list {} ({:?})", id, title);
        self.lists.push(list);
        self.active_list_id = id.clone();
        self.persist();
        Some(id)
    }

    /// Merge `updates` into the list with `id`. Unknown ids are a no-op.
    pub fn update_list(&mut self, id: &str, updates: ListUpdate) {
        let Some(list) = self.lists.iter_mut().find(|list| list.id == id) else {
            return;
        };

        if let Some(title) = updates.title {
            list.title = title;
        }
        if let Some(color) = updates.color {
            list.color = color;
        }
        list.updated_at = now_millis();
        debug!("updated list {}", id);
        self.persist();
    }

    /// Delete a list and every task it owns. The default list is never
    /// deleted. When the active list goes away, selection moves to the first
    /// remaining list (the default list when none remain).
    pub fn delete_list(&mut self, id: &str) {
        if id == DEFAULT_LIST_ID {
            return;
        }
        if !self.lists.iter().any(|list| list.id == id) {
            return;
        }

        self.lists.retain(|list| list.id != id);
        self.tasks.retain(|task| task.list_id != id);

        if self.active_list_id == id {
            self.active_list_id = self
                .lists
                .first()
                .map(|list| list.id.clone())
                .unwrap_or_else(|| DEFAULT_LIST_ID.to_string());
        }

        debug!("deleted list {} and its tasks", id);
        self.persist();
    }

    /// Set the active-list selector. The id is not validated; callers only
    /// pass ids they obtained from `lists()`.
    pub fn set_active_list(&mut self, id: &str) {
        self.active_list_id = id.to_string();
    }

    /// Create an incomplete task under `list_id`. Blank titles are a no-op.
    pub fn create_task(&mut self, title: &str, list_id: &str) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let task = Task::new(title.to_string(), list_id.to_string());
        let id = task.id.clone();
        debug!("created task {} in list {}", id, list_id);
        self.tasks.push(task);
        self.persist();
        Some(id)
    }

    /// Merge `updates` into the task with `id`. Unknown ids are a no-op.
    ///
    /// Completion edges own `completed_at`: the false->true transition stamps
    /// "now" (overriding any caller-supplied value), the true->false
    /// transition clears it, and otherwise the prior or caller-supplied value
    /// passes through unchanged.
    pub fn update_task(&mut self, id: &str, updates: TaskUpdate) {
        let now = now_millis();
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return;
        };
        let was_completed = task.completed;

        if let Some(title) = updates.title {
            task.title = title;
        }
        if let Some(description) = updates.description {
            task.description = description;
        }
        if let Some(completed_at) = updates.completed_at {
            task.completed_at = completed_at;
        }
        if let Some(priority) = updates.priority {
            task.priority = priority;
        }
        if let Some(due_date) = updates.due_date {
            task.due_date = due_date;
        }
        if let Some(list_id) = updates.list_id {
            task.list_id = list_id;
        }
        if let Some(completed) = updates.completed {
            task.completed = completed;
        }

        if task.completed && !was_completed {
            task.completed_at = Some(now);
        } else if !task.completed && was_completed {
            task.completed_at = None;
        }

        task.updated_at = now;
        debug!("updated task {}", id);
        self.persist();
    }

    /// Remove the task with `id`. Unknown ids are a no-op.
    pub fn delete_task(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return;
        }
        debug!("deleted task {}", id);
        self.persist();
    }

    /// All tasks owned by `list_id`, in insertion order, regardless of
    /// completion state.
    pub fn get_tasks_by_list(&self, list_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.list_id == list_id)
            .cloned()
            .collect()
    }

    /// Case-insensitive per-list title check, applied by presentation at task
    /// creation time only.
    pub fn task_title_exists(&self, list_id: &str, title: &str) -> bool {
        let needle = title.trim().to_lowercase();
        self.tasks
            .iter()
            .any(|task| task.list_id == list_id && task.title.to_lowercase() == needle)
    }

    fn persist(&self) {
        self.storage.save(&self.lists, &self.tasks);
    }
}
