use super::time_parser::{parse_time_from_text, strip_match};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_i32(self) -> i32 {
        match self {
            Priority::None => 0,
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Out-of-range values read from storage collapse to `None`.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => Priority::Low,
            2 => Priority::Medium,
            3 => Priority::High,
            _ => Priority::None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::None => "",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i32>,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub due_date: Option<NaiveDateTime>,
    pub order: i32,
    pub tags: Vec<i32>,
    pub category_id: Option<i32>,
    pub priority: Priority,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn new(title: &str, description: &str, due_date: Option<NaiveDateTime>) -> Self {
        Task {
            id: None,
            user_id: 0,
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
            due_date,
            order: 0,
            tags: Vec::new(),
            category_id: None,
            priority: Priority::None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category_id: Option<i32>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Builds a task from typed text, taking the due date from the first
    /// date phrase and removing that phrase from the title.
    ///
    /// Text that is only a date phrase keeps it as the title.
    pub fn from_input(text: &str, now: NaiveDateTime) -> Self {
        let parsed = parse_time_from_text(text, now);
        let title = match &parsed.match_info {
            Some(span) => strip_match(text, span),
            None => text.trim().to_string(),
        };
        let title = if title.is_empty() { text.trim().to_string() } else { title };
        Task::new(&title, "", parsed.time)
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }
}

/// Task selections backing the application views.
///
/// Date-based filters take the reference day explicitly so views stay
/// deterministic under test.
#[derive(Debug, Clone)]
pub enum TaskFilter {
    All,
    /// Incomplete tasks.
    Inbox,
    /// Incomplete tasks due on or before the given day.
    Today(NaiveDate),
    /// Incomplete tasks due after the given day.
    Upcoming(NaiveDate),
    Completed,
    ByTag(i32),
    ByIds(Vec<i32>),
    /// Tasks due within the inclusive day range.
    DueBetween(NaiveDate, NaiveDate),
}
