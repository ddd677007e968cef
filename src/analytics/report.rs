use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;

use super::distribution::{distribution, CountLine};
use crate::attendee::Attendee;
use crate::event::Event;
use crate::task::Task;

/// Something the organizers should look at
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Improvement {
    /// Some tasks are `Not Started` or `Delayed`
    StalledTasks(usize),
    /// Some tasks are due on or after the event date
    LateTasks(usize),
    /// The event has no task at all
    NoTasksTracked,
}

impl Display for Improvement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Improvement::StalledTasks(n) => write!(f, "{} task(s) are not started or delayed. Consider better task prioritization.", n),
            Improvement::LateTasks(n) => write!(f, "{} task(s) are scheduled too close to the event date. Consider earlier planning.", n),
            Improvement::NoTasksTracked => write!(f, "No tasks tracked for this event. Consider adding task tracking for better planning."),
        }
    }
}

/// A summary of an event, its attendees and its tasks.
///
/// Its `Display` implementation renders it as text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventReport {
    pub event_name: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub location: String,

    pub total_attendees: usize,
    /// Attendees by RSVP, with their share of `total_attendees`
    pub rsvp: Vec<CountLine>,

    pub total_tasks: usize,
    /// Tasks by status, with their share of `total_tasks`
    pub task_status: Vec<CountLine>,

    pub improvements: Vec<Improvement>,
}

impl EventReport {
    pub fn has_attendees(&self) -> bool {
        self.total_attendees > 0
    }

    pub fn has_tasks(&self) -> bool {
        self.total_tasks > 0
    }
}

/// Build the report of `event`.
///
/// Attendees and tasks of other events are ignored, so that whole collections can be given.
pub fn report(event: &Event, attendees: &[Attendee], tasks: &[Task]) -> EventReport {
    let attendees: Vec<&Attendee> = attendees.iter().filter(|a| a.event_id() == event.id()).collect();
    let tasks: Vec<&Task> = tasks.iter().filter(|t| t.event_id() == event.id()).collect();

    let total_attendees = attendees.len();
    let rsvp = distribution(&attendees, "rsvp")
        .map(|d| d.lines(total_attendees))
        .unwrap_or_default();

    let total_tasks = tasks.len();
    let task_status = distribution(&tasks, "status")
        .map(|d| d.lines(total_tasks))
        .unwrap_or_default();

    let mut improvements = Vec::new();
    if tasks.is_empty() {
        improvements.push(Improvement::NoTasksTracked);
    } else {
        let stalled = tasks.iter().filter(|t| t.status().is_stalled()).count();
        if stalled > 0 {
            improvements.push(Improvement::StalledTasks(stalled));
        }

        if let Some(event_date) = event.date() {
            let late = tasks.iter()
                .filter(|t| matches!(t.deadline(), Some(deadline) if deadline >= event_date))
                .count();
            if late > 0 {
                improvements.push(Improvement::LateTasks(late));
            }
        }
    }

    EventReport {
        event_name: event.name().to_string(),
        date: event.date(),
        time: event.time().to_string(),
        location: event.location().to_string(),
        total_attendees,
        rsvp,
        total_tasks,
        task_status,
        improvements,
    }
}

impl Display for EventReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let date = self.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "unknown".to_string());
        writeln!(f, "Event Report: {}", self.event_name)?;
        writeln!(f, "Date: {} Time: {}", date, self.time)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f)?;

        writeln!(f, "Total Attendees: {}", self.total_attendees)?;
        if self.has_attendees() {
            for line in &self.rsvp {
                writeln!(f, "{}", line)?;
            }
        } else {
            writeln!(f, "- No attendees registered for this event.")?;
        }
        writeln!(f)?;

        writeln!(f, "Task Status:")?;
        if self.has_tasks() {
            for line in &self.task_status {
                writeln!(f, "{}", line)?;
            }
        } else {
            writeln!(f, "- No tasks tracked.")?;
        }
        writeln!(f)?;

        writeln!(f, "Areas for Improvement:")?;
        if self.improvements.is_empty() {
            writeln!(f, "- None. Planning looks on track.")?;
        }
        for improvement in &self.improvements {
            writeln!(f, "- {}", improvement)?;
        }
        Ok(())
    }
}
