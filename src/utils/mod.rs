//! Some utility functions

pub mod comparison;

use itertools::Itertools;

use crate::analytics::{StatusClass, TimelineEntry};
use crate::event::Event;
use crate::task::{Task, TaskStatus};

/// A debug utility that pretty-prints events
pub fn print_event_list(events: &[Event]) {
    if events.is_empty() {
        println!("No events found.");
        return;
    }
    for event in events.iter().sorted_by(comparison::compare_events_by_date) {
        let date = event.date().map(|d| d.to_string()).unwrap_or_else(|| "????-??-??".to_string());
        println!("  {:>4}  {}  {:<8} {}\t@ {}", event.id(), date, event.time(), event.name(), event.location());
    }
}

/// A debug utility that pretty-prints the tasks of an event, by deadline
pub fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("    No tasks found.");
        return;
    }
    for task in tasks.iter().sorted_by(comparison::compare_tasks_by_deadline) {
        let deadline = task.deadline().map(|d| d.to_string()).unwrap_or_else(|| "no deadline".to_string());
        println!("    {} {}\t({}, due {})", status_symbol(task.status()), task.name(), task.status(), deadline);
    }
}

pub fn print_timeline(entries: &[TimelineEntry]) {
    for entry in entries {
        let offset = match entry.days_before_event {
            Some(days) if days >= 0 => format!("D-{}", days),
            Some(days) => format!("D+{}", -days),
            None => "D?".to_string(),
        };
        let mark = match entry.class {
            StatusClass::Done => "✓",
            StatusClass::Warn => "~",
            StatusClass::Risk => "!",
        };
        println!("    {:>5} {} {}", offset, mark, entry.task_name);
    }
}

fn status_symbol(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::NotStarted => " ",
        TaskStatus::InProgress => "~",
        TaskStatus::Completed => "✓",
        TaskStatus::Delayed => "!",
    }
}
