//! Views derived from the records: distributions, timelines and reports
//!
//! These functions are pure: they work on records that have already been loaded (see [`RecordStore`](crate::RecordStore) for the variants that load them).

mod distribution;
mod palette;
mod report;
mod timeline;

pub use distribution::{distribution, percentage, CountLine, Distribution};
pub use palette::{status_hex, StatusClass};
pub use report::{report, EventReport, Improvement};
pub use timeline::{timeline, TimelineEntry};
