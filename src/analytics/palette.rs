//! Colours handed to whatever renders charts and timelines

use std::fmt::{Display, Formatter};

use csscolorparser::Color;
use serde::Serialize;

use crate::task::TaskStatus;

/// How a task looks on a timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StatusClass {
    /// The task is completed
    Done,
    /// The task is in progress
    Warn,
    /// Anything else
    Risk,
}

impl StatusClass {
    pub fn of(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Completed => StatusClass::Done,
            TaskStatus::InProgress => StatusClass::Warn,
            TaskStatus::NotStarted | TaskStatus::Delayed => StatusClass::Risk,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusClass::Done => "done",
            StatusClass::Warn => "warn",
            StatusClass::Risk => "risk",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            StatusClass::Done => "#00C853",
            StatusClass::Warn => "#FFAB00",
            StatusClass::Risk => "#D50000",
        }
    }

    pub fn color(&self) -> Option<Color> {
        csscolorparser::parse(self.hex()).ok()
    }
}

impl Display for StatusClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.css_class())
    }
}

/// The colour of a task status on a status chart
pub fn status_hex(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::NotStarted => "#9E9E9E",
        TaskStatus::InProgress => "#FFA500",
        TaskStatus::Completed => "#00C853",
        TaskStatus::Delayed => "#FF4B4B",
    }
}

impl TaskStatus {
    pub fn color(&self) -> Option<Color> {
        csscolorparser::parse(status_hex(*self)).ok()
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classes() {
        assert_eq!(StatusClass::of(TaskStatus::Completed).css_class(), "done");
        assert_eq!(StatusClass::of(TaskStatus::InProgress).css_class(), "warn");
        assert_eq!(StatusClass::of(TaskStatus::Delayed).css_class(), "risk");
        assert_eq!(StatusClass::of(TaskStatus::NotStarted).css_class(), "risk");
    }

    #[test]
    fn palette_is_parsable() {
        for status in TaskStatus::all().iter() {
            assert!(status.color().is_some());
        }
        for class in [StatusClass::Done, StatusClass::Warn, StatusClass::Risk].iter() {
            let color = class.color().unwrap();
            assert_eq!(color.to_hex_string().to_lowercase(), class.hex().to_lowercase());
        }
    }
}
