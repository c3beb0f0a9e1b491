//! Task event payload and observer contract.

use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which documented mutation produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    Assigned,
    StatusChanged,
    DeadlineSet,
    RecurrenceSet,
    AttachmentAdded,
    /// Free-form message pushed through `Task::notify_observers`.
    Message,
}

impl TaskEventKind {
    /// Stable string id used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::StatusChanged => "status_changed",
            Self::DeadlineSet => "deadline_set",
            Self::RecurrenceSet => "recurrence_set",
            Self::AttachmentAdded => "attachment_added",
            Self::Message => "message",
        }
    }
}

/// One notification about one task.
///
/// Carries task identity rather than the task itself: delivery runs while
/// the task is locked, so observers must not reach back into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEvent {
    pub task_id: TaskId,
    pub task_title: String,
    pub kind: TaskEventKind,
    /// Human-readable text, already formatted for display.
    pub message: String,
}

/// Failure reported by a single observer during delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryError {
    observer: String,
    reason: String,
}

impl DeliveryError {
    pub fn new(observer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            observer: observer.into(),
            reason: reason.into(),
        }
    }

    pub fn observer(&self) -> &str {
        &self.observer
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for DeliveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "delivery to observer `{}` failed: {}",
            self.observer, self.reason
        )
    }
}

impl Error for DeliveryError {}

/// Anything that wants to hear about task changes.
///
/// Implementations must not lock the task that emitted the event.
pub trait TaskObserver: Send + Sync {
    /// Display name used in delivery errors.
    fn observer_name(&self) -> &str;

    /// Receives one event. Errors are logged by the caller and never
    /// propagated back into the mutation that produced the event.
    fn on_task_event(&self, event: &TaskEvent) -> Result<(), DeliveryError>;
}
