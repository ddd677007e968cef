use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use super::StatusClass;
use crate::event::Event;
use crate::task::{Task, TaskStatus};

/// A task, as placed on the timeline of its event
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub task_name: String,
    pub deadline: Option<NaiveDate>,
    pub status: TaskStatus,
    pub class: StatusClass,
    /// How many days the deadline is before the event date (negative when it is after it)
    pub days_before_event: Option<i64>,
}

/// The tasks of `event`, sorted by ascending deadline.
///
/// Tasks of other events are ignored. Tasks without a known deadline come last.
pub fn timeline(event: &Event, tasks: &[Task]) -> Vec<TimelineEntry> {
    tasks.iter()
        .filter(|task| task.event_id() == event.id())
        .sorted_by_key(|task| (task.deadline().is_none(), task.deadline()))
        .map(|task| {
            let days_before_event = match (event.date(), task.deadline()) {
                (Some(event_date), Some(deadline)) => Some(event_date.signed_duration_since(deadline).num_days()),
                _ => None,
            };
            TimelineEntry {
                task_name: task.name().to_string(),
                deadline: task.deadline(),
                status: task.status(),
                class: StatusClass::of(task.status()),
                days_before_event,
            }
        })
        .collect()
}
