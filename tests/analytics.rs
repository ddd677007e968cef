//! Integration tests of distributions, timelines and reports

use chrono::NaiveDate;
use serde_json::json;

use event_ledger::analytics::{self, StatusClass};
use event_ledger::backend::memory::MemoryBackend;
use event_ledger::schema::RawRow;
use event_ledger::{DistributionError, EventId, NewAttendee, NewEvent, NewTask, RecordStore, Rsvp, StoreError, TaskStatus};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
}

#[test]
fn rsvp_distribution() {
    let _ = env_logger::builder().is_test(true).try_init();

    let rows: Vec<RawRow> = json!([
        {"rsvp": "Confirmed"},
        {"rsvp": "Confirmed"},
        {"rsvp": "Pending"},
    ]).as_array().unwrap().iter().map(|v| v.as_object().cloned().unwrap()).collect();

    let d = analytics::distribution(&rows, "rsvp").unwrap();
    assert_eq!(d.iter().collect::<Vec<_>>(), vec![("Confirmed", 2), ("Pending", 1)]);
    assert_eq!(d.percentage("Confirmed", rows.len()), Some(66.7));
    assert_eq!(d.percentage("Pending", rows.len()), Some(33.3));
    assert_eq!(d.percentage("Pending", 0), None);
}

#[test]
fn breakdowns_through_the_store() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut store = RecordStore::new(MemoryBackend::new());
    let id = store.add_event(NewEvent::new("Workshop", date(15))).unwrap();
    let empty = store.add_event(NewEvent::new("Empty", date(16))).unwrap();

    store.add_attendee(NewAttendee::new(id, "Ada", "ada@example.com", Rsvp::Confirmed).with_dietary("Vegan")).unwrap();
    store.add_attendee(NewAttendee::new(id, "Bob", "bob@example.com", Rsvp::Declined)).unwrap();
    store.add_attendee(NewAttendee::new(id, "Cy", "cy@example.com", Rsvp::Confirmed).with_dietary("Vegan")).unwrap();
    store.add_task(NewTask::new(id, "Slides", TaskStatus::Completed, date(10))).unwrap();

    let rsvp = store.attendee_breakdown(id, "rsvp").unwrap();
    assert_eq!(rsvp.count("Confirmed"), 2);
    assert_eq!(rsvp.count("Declined"), 1);

    // Attendees without dietary needs are not counted
    let dietary = store.attendee_breakdown(id, "dietary").unwrap();
    assert_eq!(dietary.iter().collect::<Vec<_>>(), vec![("Vegan", 2)]);

    assert!(matches!(
        store.attendee_breakdown(id, "shoe_size"),
        Err(StoreError::Distribution(DistributionError::UnknownColumn(_)))
    ));
    assert!(matches!(
        store.attendee_breakdown(empty, "rsvp"),
        Err(StoreError::Distribution(DistributionError::EmptyRows))
    ));

    let status = store.task_status_breakdown(id).unwrap();
    assert_eq!(status.iter().collect::<Vec<_>>(), vec![("Completed", 1)]);
}

#[test]
fn report_of_an_event_without_records() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut store = RecordStore::new(MemoryBackend::new());
    let id = store.add_event(NewEvent::new("Quiet evening", date(3)).at("20:00").in_location("Home")).unwrap();

    let report = store.event_report(id).unwrap();
    assert_eq!(report.total_attendees, 0);
    assert_eq!(report.total_tasks, 0);

    let text = report.to_string();
    assert!(text.contains("Event Report: Quiet evening"));
    assert!(text.contains("Total Attendees: 0\n- No attendees registered for this event."));
    assert!(text.contains("- No tasks tracked."));
    assert!(text.contains("No tasks tracked for this event"));
    assert!(text.contains("NaN") == false);
}

#[test]
fn report_and_timeline() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut store = RecordStore::new(MemoryBackend::new());
    let id = store.add_event(NewEvent::new("Fair", date(20)).at("10:00").in_location("Square")).unwrap();
    store.add_attendee(NewAttendee::new(id, "Ada", "ada@example.com", Rsvp::Confirmed)).unwrap();
    store.add_attendee(NewAttendee::new(id, "Bob", "bob@example.com", Rsvp::Pending)).unwrap();

    store.add_task(NewTask::new(id, "Tear down", TaskStatus::NotStarted, date(21))).unwrap();
    store.add_task(NewTask::new(id, "Permits", TaskStatus::Completed, date(1))).unwrap();
    store.add_task(NewTask::new(id, "Stands", TaskStatus::Delayed, date(20))).unwrap();
    store.add_task(NewTask::new(id, "Posters", TaskStatus::InProgress, date(12))).unwrap();

    let report = store.event_report(id).unwrap();
    assert_eq!(report.improvements, vec![
        analytics::Improvement::StalledTasks(2),
        analytics::Improvement::LateTasks(2),
    ]);
    let text = report.to_string();
    assert!(text.contains("Date: 2025-11-20 Time: 10:00\nLocation: Square\n"));
    assert!(text.contains("- Confirmed: 1 (50.0%)"));
    assert!(text.contains("- Pending: 1 (50.0%)"));
    assert!(text.contains("- Not Started: 1 (25.0%)"));
    assert!(text.contains("- 2 task(s) are not started or delayed."));

    let timeline = store.event_timeline(id).unwrap();
    let order: Vec<(&str, StatusClass, Option<i64>)> = timeline.iter()
        .map(|e| (e.task_name.as_str(), e.class, e.days_before_event))
        .collect();
    assert_eq!(order, vec![
        ("Permits", StatusClass::Done, Some(19)),
        ("Posters", StatusClass::Warn, Some(8)),
        ("Stands", StatusClass::Risk, Some(0)),
        ("Tear down", StatusClass::Risk, Some(-1)),
    ]);
    assert_eq!(timeline[0].class.css_class(), "done");

    assert!(store.event_timeline(EventId::new(99)).unwrap_err().is_not_found());
}
