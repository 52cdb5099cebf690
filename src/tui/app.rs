use std::time::Instant;

use ratatui::widgets::ListState;

use crate::models::{DEFAULT_LIST_ID, Priority, Task};
use crate::store::{ListUpdate, Store, TaskUpdate};
use crate::tui::widgets::input::Input;
use crate::utils::{date_to_millis, format_date, now_millis, parse_date};
use crate::views::{self, SortDirection, SortMode, TodayView};
use crate::Config;

/// How long a status message stays on screen
const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Lists,
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    TaskForm,
    Help,
    ListsModal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    DueDate,
    Priority,
}

/// Options shown by the priority selector, index 0 meaning "no priority"
pub const PRIORITY_OPTIONS: &[Option<Priority>] = &[
    None,
    Some(Priority::Low),
    Some(Priority::Medium),
    Some(Priority::High),
];

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub current_field: TaskField,
    pub title: Input,
    pub description: Input,
    pub due_date: Input, // YYYY-MM-DD
    pub priority_index: usize,
    pub editing_task_id: Option<String>, // None for new tasks
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            current_field: TaskField::Title,
            title: Input::new(),
            description: Input::new(),
            due_date: Input::new(),
            priority_index: 0,
            editing_task_id: None,
        }
    }

    pub fn from_task(task: &Task) -> Self {
        let priority_index = PRIORITY_OPTIONS
            .iter()
            .position(|p| *p == task.priority)
            .unwrap_or(0);
        Self {
            current_field: TaskField::Title,
            title: Input::with_value(task.title.clone()),
            description: Input::with_value(task.description.clone().unwrap_or_default()),
            due_date: Input::with_value(task.due_date.map(format_date).unwrap_or_default()),
            priority_index,
            editing_task_id: Some(task.id.clone()),
        }
    }

    pub fn priority(&self) -> Option<Priority> {
        PRIORITY_OPTIONS
            .get(self.priority_index)
            .copied()
            .flatten()
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            TaskField::Title => TaskField::Description,
            TaskField::Description => TaskField::DueDate,
            TaskField::DueDate => TaskField::Priority,
            TaskField::Priority => TaskField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.current_field = match self.current_field {
            TaskField::Title => TaskField::Priority,
            TaskField::Description => TaskField::Title,
            TaskField::DueDate => TaskField::Description,
            TaskField::Priority => TaskField::DueDate,
        };
    }

    /// The input under the cursor, when the active field is a text field
    pub fn current_input_mut(&mut self) -> Option<&mut Input> {
        match self.current_field {
            TaskField::Title => Some(&mut self.title),
            TaskField::Description => Some(&mut self.description),
            TaskField::DueDate => Some(&mut self.due_date),
            TaskField::Priority => None,
        }
    }

    pub fn cycle_priority_forward(&mut self) {
        self.priority_index = (self.priority_index + 1) % PRIORITY_OPTIONS.len();
    }

    pub fn cycle_priority_backward(&mut self) {
        self.priority_index =
            (self.priority_index + PRIORITY_OPTIONS.len() - 1) % PRIORITY_OPTIONS.len();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListsModalMode {
    View,
    Add,
    Rename,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListsModalField {
    Lists,
    Actions,
}

/// Actions column of the lists modal, in display order
pub const LIST_ACTIONS: &[&str] = &["Switch", "Add", "Rename", "Delete"];

#[derive(Debug, Clone)]
pub struct ListsModalState {
    pub mode: ListsModalMode,
    pub current_field: ListsModalField,
    pub selected_index: usize,
    pub actions_selected_index: usize,
    pub name_input: Input,
    pub list_state: ListState,
}

impl ListsModalState {
    pub fn new(selected_index: usize) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(selected_index));
        Self {
            mode: ListsModalMode::View,
            current_field: ListsModalField::Lists,
            selected_index,
            actions_selected_index: 0,
            name_input: Input::new(),
            list_state,
        }
    }
}

pub struct App {
    pub config: Config,
    pub store: Store,

    // Navigation
    pub tab: Tab,
    pub mode: Mode,
    pub selected_index: usize,
    pub list_state: ListState,

    // Per-list view options
    pub sort_mode: SortMode,
    pub sort_direction: SortDirection,
    pub show_completed: bool,

    // Modal / form state
    pub form: Option<TaskForm>,
    pub lists_modal: Option<ListsModalState>,
    pub delete_confirmation: Option<Task>,
    pub delete_modal_selection: usize,

    // Transient status line
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: Config, store: Store) -> Self {
        let mut app = Self {
            config,
            store,
            tab: Tab::Lists,
            mode: Mode::View,
            selected_index: 0,
            list_state: ListState::default(),
            sort_mode: SortMode::Created,
            sort_direction: SortDirection::Asc,
            show_completed: true,
            form: None,
            lists_modal: None,
            delete_confirmation: None,
            delete_modal_selection: 0,
            status_message: None,
            status_message_time: None,
        };
        app.adjust_selected_index();
        app
    }

    /// The task rows currently shown in the main pane, in display order
    pub fn current_tasks(&self) -> Vec<Task> {
        match self.tab {
            Tab::Lists => {
                let tasks = self.store.get_tasks_by_list(self.store.active_list_id());
                views::compose_list_view(
                    &tasks,
                    self.sort_mode,
                    self.sort_direction,
                    self.show_completed,
                )
            }
            Tab::Today => {
                let view = self.today_view();
                let mut flat = view.overdue;
                flat.extend(view.today);
                flat
            }
        }
    }

    pub fn today_view(&self) -> TodayView {
        views::compose_today_view(self.store.tasks(), now_millis())
    }

    pub fn selected_task(&self) -> Option<Task> {
        self.current_tasks().get(self.selected_index).cloned()
    }

    /// Keep the selection within the visible rows after any data change
    pub fn adjust_selected_index(&mut self) {
        let len = self.current_tasks().len();
        if len == 0 {
            self.selected_index = 0;
            self.list_state.select(None);
        } else {
            self.selected_index = self.selected_index.min(len - 1);
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.adjust_selected_index();
    }

    pub fn select_next(&mut self) {
        self.selected_index += 1;
        self.adjust_selected_index();
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.selected_index = 0;
            self.adjust_selected_index();
        }
    }

    pub fn next_tab(&mut self) {
        let next = match self.tab {
            Tab::Lists => Tab::Today,
            Tab::Today => Tab::Lists,
        };
        self.switch_tab(next);
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    /// Clear the status message after its timeout has elapsed
    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Flip completion of the selected task. The store stamps or clears
    /// `completed_at` on the transition.
    pub fn toggle_selected_task(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        self.store.update_task(
            &task.id,
            TaskUpdate {
                completed: Some(!task.completed),
                ..Default::default()
            },
        );
        self.adjust_selected_index();
    }

    /// Cycle the selected task's priority low -> medium -> high -> low.
    /// A task without priority starts the cycle as if it were low.
    pub fn cycle_selected_priority(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let next = task.priority.unwrap_or(Priority::Low).next();
        self.store.update_task(
            &task.id,
            TaskUpdate {
                priority: Some(Some(next)),
                ..Default::default()
            },
        );
    }

    pub fn open_new_task_form(&mut self) {
        self.form = Some(TaskForm::new());
        self.mode = Mode::TaskForm;
    }

    pub fn open_edit_task_form(&mut self) {
        if let Some(task) = self.selected_task() {
            self.form = Some(TaskForm::from_task(&task));
            self.mode = Mode::TaskForm;
        }
    }

    pub fn cancel_task_form(&mut self) {
        self.form = None;
        self.mode = Mode::View;
    }

    /// Validate and apply the task form. Returns to View mode on success and
    /// reports problems on the status line, leaving the form open.
    pub fn save_task_form(&mut self) {
        let Some(form) = self.form.clone() else {
            return;
        };

        let title = form.title.value().trim().to_string();
        if title.is_empty() {
            self.set_status_message("Title cannot be empty".to_string());
            return;
        }

        // Due dates typed into the form are calendar days; they are stored as
        // local-midnight timestamps
        let due_text = form.due_date.value().trim().to_string();
        let due_date = if due_text.is_empty() {
            None
        } else {
            match parse_date(&due_text).ok().and_then(date_to_millis) {
                Some(millis) => Some(millis),
                None => {
                    self.set_status_message(format!("Invalid due date '{}' (YYYY-MM-DD)", due_text));
                    return;
                }
            }
        };

        let description = {
            let text = form.description.value().trim().to_string();
            if text.is_empty() { None } else { Some(text) }
        };

        match form.editing_task_id {
            Some(ref task_id) => {
                self.store.update_task(
                    task_id,
                    TaskUpdate {
                        title: Some(title),
                        description: Some(description),
                        priority: Some(form.priority()),
                        due_date: Some(due_date),
                        ..Default::default()
                    },
                );
                self.set_status_message("Task updated".to_string());
            }
            None => {
                let list_id = self.store.active_list_id().to_string();
                // Duplicate titles are only rejected here, at creation time
                if self.store.task_title_exists(&list_id, &title) {
                    self.set_status_message(format!(
                        "A task titled '{}' already exists in this list",
                        title
                    ));
                    return;
                }
                let Some(task_id) = self.store.create_task(&title, &list_id) else {
                    return;
                };
                if description.is_some() || due_date.is_some() || form.priority().is_some() {
                    self.store.update_task(
                        &task_id,
                        TaskUpdate {
                            description: Some(description),
                            priority: Some(form.priority()),
                            due_date: Some(due_date),
                            ..Default::default()
                        },
                    );
                }
                self.set_status_message("Task created".to_string());
            }
        }

        self.form = None;
        self.mode = Mode::View;
        self.adjust_selected_index();
    }

    pub fn request_delete_selected_task(&mut self) {
        if let Some(task) = self.selected_task() {
            self.delete_confirmation = Some(task);
            self.delete_modal_selection = 0;
        }
    }

    pub fn confirm_delete_task(&mut self) {
        if let Some(task) = self.delete_confirmation.take() {
            self.store.delete_task(&task.id);
            self.set_status_message("Task deleted".to_string());
            self.adjust_selected_index();
        }
    }

    pub fn open_lists_modal(&mut self) {
        let selected = self
            .store
            .lists()
            .iter()
            .position(|list| list.id == self.store.active_list_id())
            .unwrap_or(0);
        self.lists_modal = Some(ListsModalState::new(selected));
        self.mode = Mode::ListsModal;
    }

    pub fn close_lists_modal(&mut self) {
        self.lists_modal = None;
        self.mode = Mode::View;
    }

    /// Apply the action currently selected in the lists modal
    pub fn apply_lists_modal_action(&mut self) {
        let (action_index, selected_index) = match self.lists_modal.as_ref() {
            Some(state) => (state.actions_selected_index, state.selected_index),
            None => return,
        };
        let action = LIST_ACTIONS.get(action_index).copied().unwrap_or("Switch");
        let selected_list = self.store.lists().get(selected_index).cloned();

        match action {
            "Switch" => {
                if let Some(list) = selected_list {
                    self.store.set_active_list(&list.id);
                    self.close_lists_modal();
                    self.selected_index = 0;
                    self.adjust_selected_index();
                }
            }
            "Add" => {
                if let Some(state) = self.lists_modal.as_mut() {
                    state.mode = ListsModalMode::Add;
                    state.name_input.clear();
                }
            }
            "Rename" => {
                if let Some(list) = selected_list {
                    if let Some(state) = self.lists_modal.as_mut() {
                        state.mode = ListsModalMode::Rename;
                        state.name_input = Input::with_value(list.title);
                    }
                }
            }
            "Delete" => {
                if let Some(list) = selected_list {
                    if list.id == DEFAULT_LIST_ID {
                        self.set_status_message("The Inbox list cannot be deleted".to_string());
                        return;
                    }
                    self.store.delete_list(&list.id);
                    if let Some(state) = self.lists_modal.as_mut() {
                        state.selected_index = state.selected_index.saturating_sub(1);
                        state.list_state.select(Some(state.selected_index));
                    }
                    self.set_status_message("List deleted".to_string());
                    self.adjust_selected_index();
                }
            }
            _ => {}
        }
    }

    /// Confirm the name prompt of the lists modal (Add or Rename)
    pub fn submit_lists_modal_name(&mut self) {
        let (mode, name, selected_index) = match self.lists_modal.as_ref() {
            Some(state) => (
                state.mode,
                state.name_input.value().trim().to_string(),
                state.selected_index,
            ),
            None => return,
        };

        if let Some(state) = self.lists_modal.as_mut() {
            state.mode = ListsModalMode::View;
        }
        if name.is_empty() {
            // Same silent no-op as the store itself
            return;
        }

        match mode {
            ListsModalMode::Add => {
                self.store.create_list(&name);
                // The new list became active; move the modal cursor onto it
                let new_index = self.store.lists().len().saturating_sub(1);
                if let Some(state) = self.lists_modal.as_mut() {
                    state.selected_index = new_index;
                    state.list_state.select(Some(new_index));
                }
                self.set_status_message(format!("List '{}' created", name));
                self.selected_index = 0;
                self.adjust_selected_index();
            }
            ListsModalMode::Rename => {
                let renamed = self
                    .store
                    .lists()
                    .get(selected_index)
                    .map(|list| list.id.clone());
                if let Some(id) = renamed {
                    self.store.update_list(
                        &id,
                        ListUpdate {
                            title: Some(name),
                            ..Default::default()
                        },
                    );
                    self.set_status_message("List renamed".to_string());
                }
            }
            ListsModalMode::View => {}
        }
    }
}
