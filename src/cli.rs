use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::models::Priority;
use crate::store::{Store, TaskUpdate};
use crate::utils::{date_to_millis, parse_date};

#[derive(Parser)]
#[command(name = "simplelist")]
#[command(about = "To-do lists with a Today view - terminal application")]
#[command(version)]
pub struct Cli {
    /// Use development mode (separate dev config and data)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Quickly add a new task
    AddTask {
        /// Task title
        title: String,
        /// Target list, by title or id (defaults to the Inbox)
        #[arg(long)]
        list: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Priority: low, medium or high
        #[arg(long)]
        priority: Option<String>,
        /// Task description
        #[arg(long)]
        description: Option<String>,
    },
    /// Quickly add a new list
    AddList {
        /// List title
        title: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("No list matches '{0}'")]
    ListNotFound(String),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Unknown priority '{0}' (expected low, medium or high)")]
    InvalidPriority(String),
    #[error("A task titled '{0}' already exists in this list")]
    DuplicateTitle(String),
}

/// Handle the add-task command
pub fn handle_add_task(
    title: String,
    list: Option<String>,
    due: Option<String>,
    priority: Option<String>,
    description: Option<String>,
    store: &mut Store,
) -> Result<(), CliError> {
    // Resolve the target list by id or title, defaulting to the active list
    let list_id = match list {
        Some(wanted) => store
            .lists()
            .iter()
            .find(|l| l.id == wanted || l.title.eq_ignore_ascii_case(&wanted))
            .map(|l| l.id.clone())
            .ok_or(CliError::ListNotFound(wanted))?,
        None => store.active_list_id().to_string(),
    };

    let due_date = match due {
        Some(due_str) => {
            let date = parse_date(&due_str).map_err(|e| {
                CliError::DateParseError(format!("Invalid date format '{}': {}", due_str, e))
            })?;
            Some(date_to_millis(date).ok_or_else(|| {
                CliError::DateParseError(format!("Date out of range: '{}'", due_str))
            })?)
        }
        None => None,
    };

    let priority = match priority {
        Some(p) => Some(Priority::parse(&p).ok_or(CliError::InvalidPriority(p))?),
        None => None,
    };

    if store.task_title_exists(&list_id, &title) {
        return Err(CliError::DuplicateTitle(title.trim().to_string()));
    }

    let id = store
        .create_task(&title, &list_id)
        .ok_or(CliError::EmptyTitle)?;

    if due_date.is_some() || priority.is_some() || description.is_some() {
        store.update_task(
            &id,
            TaskUpdate {
                description: description.map(Some),
                priority: priority.map(Some),
                due_date: due_date.map(Some),
                ..Default::default()
            },
        );
    }

    println!("Task created successfully (id: {})", id);
    Ok(())
}

/// Handle the add-list command
pub fn handle_add_list(title: String, store: &mut Store) -> Result<(), CliError> {
    let id = store.create_list(&title).ok_or(CliError::EmptyTitle)?;
    println!("List created successfully (id: {})", id);
    Ok(())
}
