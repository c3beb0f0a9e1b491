use chrono::{Duration, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use taskdesk_core::{
    DeliveryError, ManualClock, Priority, RecurrencePattern, TaskEvent, TaskEventKind,
    TaskFactory, TaskObserver, TaskStatus, TaskType, User,
};

struct FlakySink {
    fail: bool,
    seen: Mutex<Vec<TaskEventKind>>,
}

impl FlakySink {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl TaskObserver for FlakySink {
    fn observer_name(&self) -> &str {
        "flaky"
    }

    fn on_task_event(&self, event: &TaskEvent) -> Result<(), DeliveryError> {
        self.seen.lock().push(event.kind);
        if self.fail {
            return Err(DeliveryError::new("flaky", "queue full"));
        }
        Ok(())
    }
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(),
    ))
}

#[test]
fn registering_twice_delivers_once_per_event() {
    let factory = TaskFactory::new();
    let alice = Arc::new(User::new(1, "Alice"));
    let task = factory.create_task(TaskType::Simple, "Review", "PR 12", Priority::Low);

    {
        let mut task = task.lock();
        assert!(task.register_observer(alice.clone()));
        assert!(!task.register_observer(alice.clone()));
        task.update_status(TaskStatus::InProgress);
    }

    assert_eq!(alice.notification_count(), 1);
}

#[test]
fn removed_observer_stops_receiving_while_others_continue() {
    let factory = TaskFactory::new();
    let alice = Arc::new(User::new(1, "Alice"));
    let bob = Arc::new(User::new(2, "Bob"));
    let task = factory.create_task(TaskType::Simple, "Review", "PR 12", Priority::Low);

    let mut guard = task.lock();
    guard.register_observer(alice.clone());
    guard.register_observer(bob.clone());
    guard.update_status(TaskStatus::InProgress);

    assert!(guard.remove_observer(&*alice));
    assert!(!guard.remove_observer(&*alice));
    guard.update_status(TaskStatus::Completed);
    drop(guard);

    assert_eq!(alice.notification_count(), 1);
    assert_eq!(bob.notification_count(), 2);
    assert_eq!(
        bob.notifications()[1].message(),
        "Status of task 'Review' changed from InProgress to Completed"
    );
}

#[test]
fn failing_observer_is_isolated_and_mutation_completes() {
    let factory = TaskFactory::new();
    let broken = FlakySink::new(true);
    let healthy = FlakySink::new(false);
    let alice = Arc::new(User::new(1, "Alice"));
    let task = factory.create_task(TaskType::Simple, "Deploy", "prod", Priority::High);

    let mut guard = task.lock();
    guard.register_observer(broken.clone());
    guard.register_observer(healthy.clone());
    let report = guard.assign_to(alice.clone());

    assert_eq!(report.delivered, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(guard.assignee().map(|user| user.id()), Some(1));
    assert_eq!(*broken.seen.lock(), vec![TaskEventKind::Assigned]);
    assert_eq!(*healthy.seen.lock(), vec![TaskEventKind::Assigned]);
}

#[test]
fn every_mutation_stamps_updated_at_and_emits_one_message() {
    let clock = clock();
    let factory = TaskFactory::with_clock(clock.clone());
    let alice = Arc::new(User::with_clock(1, "Alice", clock.clone()));
    let task = factory.create_task(TaskType::Recurring, "Backup", "nightly", Priority::Medium);
    let created_at = task.lock().created_at();

    let mut guard = task.lock();
    guard.register_observer(alice.clone());

    let mut last = guard.updated_at();
    assert_eq!(last, created_at);

    clock.advance(Duration::seconds(1));
    guard.assign_to(alice.clone());
    assert!(guard.updated_at() > last);
    last = guard.updated_at();

    clock.advance(Duration::seconds(1));
    guard.update_status(TaskStatus::InProgress);
    assert!(guard.updated_at() > last);
    last = guard.updated_at();

    clock.advance(Duration::seconds(1));
    guard
        .set_recurrence_pattern(RecurrencePattern::Monthly, 45)
        .expect("recurring task accepts any interval");
    assert!(guard.updated_at() > last);
    last = guard.updated_at();

    clock.advance(Duration::seconds(1));
    let _ = guard.snapshot();
    let _ = guard.recurrence();
    let _ = guard.to_string();
    assert_eq!(guard.updated_at(), last);
    drop(guard);

    let messages: Vec<String> = alice
        .notifications()
        .iter()
        .map(|entry| entry.message().to_string())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Task 'Backup' assigned to Alice".to_string(),
            "Status of task 'Backup' changed from Pending to InProgress".to_string(),
            "Recurrence of task 'Backup' set to Monthly every 45".to_string(),
        ]
    );
}

#[test]
fn reassigning_to_the_same_user_still_notifies() {
    let factory = TaskFactory::new();
    let alice = Arc::new(User::new(1, "Alice"));
    let task = factory.create_task(TaskType::Simple, "Triage", "inbox", Priority::Low);

    let mut guard = task.lock();
    guard.register_observer(alice.clone());
    guard.assign_to(alice.clone());
    guard.assign_to(alice.clone());
    drop(guard);

    assert_eq!(alice.notification_count(), 2);
}

#[test]
fn attachments_are_appended_in_order() {
    let factory = TaskFactory::new();
    let alice = Arc::new(User::new(1, "Alice"));
    let task = factory.create_task(TaskType::Attachments, "Docs", "bundle", Priority::Low);

    let mut guard = task.lock();
    guard.register_observer(alice.clone());
    guard
        .add_attachment("spec", "spec.pdf")
        .expect("attachments task accepts attachments");
    guard
        .add_attachment("diagram", "spec.pdf")
        .expect("attachments task accepts attachments");

    let attachments = guard.attachments();
    assert_eq!(attachments.len(), 2);
    assert_eq!(attachments[0].name(), "spec");
    assert_eq!(attachments[1].name(), "diagram");
    assert_eq!(attachments[1].path(), "spec.pdf");
    drop(guard);

    assert_eq!(
        alice.notifications()[0].message(),
        "Attachment 'spec' added to task 'Docs'"
    );
}

#[test]
fn attachments_snapshot_cannot_mutate_task() {
    let factory = TaskFactory::new();
    let task = factory.create_task(TaskType::Attachments, "Docs", "bundle", Priority::Low);
    task.lock()
        .add_attachment("spec", "spec.pdf")
        .expect("attachments task accepts attachments");

    let mut copy = task.lock().attachments();
    copy.clear();
    assert_eq!(task.lock().attachments().len(), 1);
}
