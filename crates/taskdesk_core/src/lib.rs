//! Core domain logic for TaskDesk.
//! This crate is the single source of truth for task, project and
//! notification invariants.

pub mod clock;
pub mod logging;
pub mod model;
pub mod observer;
pub mod service;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::handle::TaskHandle;
pub use model::project::{Project, ProjectId};
pub use model::task::{
    Attachment, Priority, Recurrence, RecurrencePattern, Task, TaskError, TaskId, TaskKind,
    TaskResult, TaskSnapshot, TaskStatus, TaskType, DEFAULT_DEADLINE_DAYS, SHORT_DATE_FORMAT,
};
pub use model::user::{Notification, User, UserId};
pub use observer::{
    DeliveryError, DeliveryReport, ObserverList, TaskEvent, TaskEventKind, TaskObserver,
};
pub use service::board_service::{BoardError, BoardResult, TaskBoard};
pub use service::task_factory::TaskFactory;
pub use validation::{
    validate_attachment, validate_description, validate_project_name,
    validate_recurrence_interval, validate_title, ValidationError, MAX_RECURRENCE_INTERVAL,
    MIN_RECURRENCE_INTERVAL,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
