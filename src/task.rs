//! Tasks that have to be done before an event

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{self, EventId, Record, Tabular};
use crate::schema::{Cell, Collection, Row};

/// The progress of a task.
///
/// There is no enforced ordering: a `Delayed` task can go back to `InProgress`, a `Completed` one can be re-opened, etc.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Delayed,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Delayed => "Delayed",
        }
    }

    pub fn all() -> [TaskStatus; 4] {
        [TaskStatus::NotStarted, TaskStatus::InProgress, TaskStatus::Completed, TaskStatus::Delayed]
    }

    /// Whether this task needs attention (it has not started, or it is late)
    pub fn is_stalled(&self) -> bool {
        matches!(self, TaskStatus::NotStarted | TaskStatus::Delayed)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::NotStarted
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = record::label_key(s);
        TaskStatus::all().iter()
            .copied()
            .find(|status| record::label_key(status.label()) == key)
            .ok_or_else(|| format!("Invalid task status {:?}", s))
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Priority {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = record::label_key(s);
        [Priority::High, Priority::Medium, Priority::Low].iter()
            .copied()
            .find(|p| record::label_key(p.label()) == key)
            .ok_or_else(|| format!("Invalid priority {:?}", s))
    }
}


/// A to-do task attached to an event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    event_id: EventId,
    task_name: String,
    status: TaskStatus,
    /// `None` when the stored deadline is missing or cannot be parsed
    deadline: Option<NaiveDate>,
    priority: Option<Priority>,
    assigned_to: Option<String>,
}

impl Task {
    pub fn new(draft: NewTask) -> Self {
        Self {
            event_id: draft.event_id,
            task_name: draft.task_name,
            status: draft.status,
            deadline: Some(draft.deadline),
            priority: draft.priority,
            assigned_to: draft.assigned_to,
        }
    }

    pub fn event_id(&self) -> EventId           { self.event_id                }
    pub fn name(&self) -> &str                  { &self.task_name              }
    pub fn status(&self) -> TaskStatus          { self.status                  }
    pub fn deadline(&self) -> Option<NaiveDate> { self.deadline                }
    pub fn priority(&self) -> Option<Priority>  { self.priority                }
    pub fn assigned_to(&self) -> Option<&str>   { self.assigned_to.as_deref()  }
}

impl Record for Task {
    const COLLECTION: Collection = Collection::Tasks;

    fn from_row(row: &Row) -> Self {
        let priority = record::optional_column(row, "priority")
            .and_then(|text| match text.parse::<Priority>() {
                Ok(p) => Some(p),
                Err(err) => {
                    log::warn!("{} in tasks.priority. Ignoring it", err);
                    None
                }
            });

        Self {
            event_id: EventId::new(row.int("event_id")),
            task_name: row.text("task_name").to_string(),
            status: record::enum_column(row, "status", TaskStatus::default()),
            deadline: record::date_column(row, "deadline"),
            priority,
            assigned_to: record::optional_column(row, "assigned_to"),
        }
    }

    fn to_row(&self) -> Row {
        Row::from_cells(Collection::Tasks, vec![
            Cell::Int(self.event_id.get()),
            Cell::from(self.task_name.as_str()),
            Cell::from(self.status.label()),
            Cell::from(record::format_date(self.deadline)),
            Cell::from(self.priority.map(|p| p.label().to_string())),
            Cell::from(self.assigned_to.clone()),
        ])
    }
}

impl Tabular for Task {
    fn category(&self, column: &str) -> Option<String> {
        self.to_row().category(column)
    }
}


/// The data needed to add a [`Task`] to an existing event
#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub event_id: EventId,
    pub task_name: String,
    pub status: TaskStatus,
    pub deadline: NaiveDate,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
}

impl NewTask {
    /// Create a task draft, with the default priority (see [`crate::config::DEFAULT_TASK_PRIORITY`])
    pub fn new<S: ToString>(event_id: EventId, task_name: S, status: TaskStatus, deadline: NaiveDate) -> Self {
        Self {
            event_id,
            task_name: task_name.to_string(),
            status,
            deadline,
            priority: crate::config::default_task_priority(),
            assigned_to: None,
        }
    }

    pub fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = priority;
        self
    }

    pub fn assigned_to<S: ToString>(mut self, assignee: S) -> Self {
        let assignee = assignee.to_string();
        self.assigned_to = if assignee.trim().is_empty() { None } else { Some(assignee) };
        self
    }
}
