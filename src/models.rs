use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::now_millis;

/// Fixed id of the built-in "Inbox" list. Seeded on first run, never deletable.
pub const DEFAULT_LIST_ID: &str = "default-inbox";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: i64, // millisecond timestamps
    pub updated_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Next value in the low -> medium -> high cycle used by the priority toggle.
    pub fn next(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    /// Present if and only if `completed` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    /// Absent means "no priority", which is distinct from `Low`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Millisecond timestamp, normalized to local midnight when set interactively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    pub list_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl List {
    pub fn new(title: String) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            color: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The built-in Inbox list with its fixed id.
    pub fn default_list() -> Self {
        let now = now_millis();
        Self {
            id: DEFAULT_LIST_ID.to_string(),
            title: "Inbox".to_string(),
            color: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_LIST_ID
    }
}

impl Task {
    pub fn new(title: String, list_id: String) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: None,
            completed: false,
            completed_at: None,
            priority: None,
            due_date: None,
            list_id,
            created_at: now,
            updated_at: now,
        }
    }
}
