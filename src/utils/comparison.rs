//! Utilities to compare records
//!
//! These can be used to sort results, e.g. by using `sorted_by` from the `itertools` crate

use std::cmp::Ordering;

use crate::event::Event;
use crate::task::Task;

/// Compare events by date, then by id. Events without a known date come last
pub fn compare_events_by_date(left: &&Event, right: &&Event) -> Ordering {
    (left.date().is_none(), left.date(), left.id()).cmp(&(right.date().is_none(), right.date(), right.id()))
}

/// Compare tasks by deadline, then alphabetically. Tasks without a known deadline come last
pub fn compare_tasks_by_deadline(left: &&Task, right: &&Task) -> Ordering {
    (left.deadline().is_none(), left.deadline()).cmp(&(right.deadline().is_none(), right.deadline()))
        .then_with(|| Ord::cmp(&left.name().to_lowercase(), &right.name().to_lowercase()))
}
