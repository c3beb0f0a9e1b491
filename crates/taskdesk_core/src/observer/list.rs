//! Ordered, duplicate-free observer registry with synchronous fan-out.

use crate::observer::event::{TaskEvent, TaskObserver};
use log::{debug, warn};
use std::sync::Arc;

/// Outcome of one fan-out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

impl DeliveryReport {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Registered observers of one task.
///
/// Identity is the observer's address: registering the same `Arc` (or a
/// clone of it) twice keeps a single entry.
#[derive(Default, Clone)]
pub struct ObserverList {
    observers: Vec<Arc<dyn TaskObserver>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `observer` unless it is already registered.
    ///
    /// Returns `true` when a new entry was added.
    pub fn register(&mut self, observer: Arc<dyn TaskObserver>) -> bool {
        if self.contains(observer.as_ref()) {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Removes `observer` if present. Unknown observers are ignored.
    ///
    /// Returns `true` when an entry was removed.
    pub fn remove(&mut self, observer: &dyn TaskObserver) -> bool {
        let before = self.observers.len();
        self.observers
            .retain(|existing| !same_observer(existing.as_ref(), observer));
        self.observers.len() != before
    }

    pub fn contains(&self, observer: &dyn TaskObserver) -> bool {
        self.observers
            .iter()
            .any(|existing| same_observer(existing.as_ref(), observer))
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Delivers `event` to every observer in registration order.
    ///
    /// A failing observer is logged and skipped; the loop always runs to
    /// the end of the list.
    pub fn notify(&self, event: &TaskEvent) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        for (index, observer) in self.observers.iter().enumerate() {
            match observer.on_task_event(event) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    report.failed += 1;
                    warn!(
                        "event=observer_delivery module=observer status=error task_id={} kind={} observer_index={} observer={} error={}",
                        event.task_id,
                        event.kind.as_str(),
                        index,
                        observer.observer_name(),
                        err.reason()
                    );
                }
            }
        }
        debug!(
            "event=observer_fanout module=observer status=ok task_id={} kind={} delivered={} failed={}",
            event.task_id,
            event.kind.as_str(),
            report.delivered,
            report.failed
        );
        report
    }
}

fn same_observer(left: &dyn TaskObserver, right: &dyn TaskObserver) -> bool {
    // Data address only: vtable pointers for one type may differ per codegen unit.
    std::ptr::addr_eq(left, right)
}

#[cfg(test)]
mod tests {
    use super::{DeliveryReport, ObserverList};
    use crate::observer::event::{DeliveryError, TaskEvent, TaskEventKind, TaskObserver};
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Recorder {
        name: String,
        seen: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn new(name: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().clone()
        }
    }

    impl TaskObserver for Recorder {
        fn observer_name(&self) -> &str {
            &self.name
        }

        fn on_task_event(&self, event: &TaskEvent) -> Result<(), DeliveryError> {
            self.seen.lock().push(event.message.clone());
            Ok(())
        }
    }

    struct Broken;

    impl TaskObserver for Broken {
        fn observer_name(&self) -> &str {
            "broken"
        }

        fn on_task_event(&self, _event: &TaskEvent) -> Result<(), DeliveryError> {
            Err(DeliveryError::new("broken", "sink offline"))
        }
    }

    fn event(message: &str) -> TaskEvent {
        TaskEvent {
            task_id: 7,
            task_title: "Write docs".to_string(),
            kind: TaskEventKind::Message,
            message: message.to_string(),
        }
    }

    #[test]
    fn register_is_idempotent_for_same_observer() {
        let recorder = Recorder::new("ana");
        let mut list = ObserverList::new();

        assert!(list.register(recorder.clone()));
        assert!(!list.register(recorder.clone()));
        assert_eq!(list.len(), 1);

        let report = list.notify(&event("hello"));
        assert_eq!(report.delivered, 1);
        assert_eq!(recorder.seen(), vec!["hello".to_string()]);
    }

    #[test]
    fn remove_unknown_observer_is_noop() {
        let registered = Recorder::new("ana");
        let stranger = Recorder::new("bo");
        let mut list = ObserverList::new();
        list.register(registered.clone());

        assert!(!list.remove(&*stranger));
        assert_eq!(list.len(), 1);
        assert!(list.remove(&*registered));
        assert!(list.is_empty());
    }

    #[test]
    fn delivery_follows_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));

        struct Ordered {
            label: &'static str,
            log: Arc<Mutex<Vec<&'static str>>>,
        }

        impl TaskObserver for Ordered {
            fn observer_name(&self) -> &str {
                self.label
            }

            fn on_task_event(&self, _event: &TaskEvent) -> Result<(), DeliveryError> {
                self.log.lock().push(self.label);
                Ok(())
            }
        }

        let mut list = ObserverList::new();
        for label in ["first", "second", "third"] {
            list.register(Arc::new(Ordered {
                label,
                log: log.clone(),
            }));
        }

        list.notify(&event("tick"));
        assert_eq!(*log.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn failing_observer_does_not_block_the_rest() {
        let before = Recorder::new("before");
        let after = Recorder::new("after");
        let mut list = ObserverList::new();
        list.register(before.clone());
        list.register(Arc::new(Broken));
        list.register(after.clone());

        let report = list.notify(&event("still delivered"));
        assert_eq!(
            report,
            DeliveryReport {
                delivered: 2,
                failed: 1
            }
        );
        assert_eq!(report.attempted(), 3);
        assert_eq!(before.seen().len(), 1);
        assert_eq!(after.seen(), vec!["still delivered".to_string()]);
    }

    #[test]
    fn notify_on_empty_list_reports_nothing() {
        let list = ObserverList::new();
        assert_eq!(list.notify(&event("nobody")), DeliveryReport::default());
    }
}
