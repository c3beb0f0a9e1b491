//! Task construction policy.
//!
//! # Responsibility
//! - Be the only place where tasks are built.
//! - Pick the variant payload that matches the requested `TaskType`.
//! - Hand out process-unique, strictly increasing task ids.
//!
//! # Invariants
//! - Ids start at 1 and are never reused by the same factory.
//! - Input is not validated here; callers validate before creating.

use crate::clock::{Clock, SystemClock};
use crate::model::handle::TaskHandle;
use crate::model::task::{Priority, Task, TaskId, TaskType};
use log::info;
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const FIRST_TASK_ID: TaskId = 1;

pub struct TaskFactory {
    next_id: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl TaskFactory {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Builds tasks whose timestamps come from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            next_id: AtomicU64::new(FIRST_TASK_ID),
            clock,
        }
    }

    /// Creates a task of the requested variant with default payload.
    ///
    /// Always succeeds. Status starts at `Pending`, no assignee, no
    /// observers.
    pub fn create_task(
        &self,
        task_type: TaskType,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> TaskHandle {
        let id = self.allocate_id();
        let task = Task::new(
            id,
            task_type,
            title.into(),
            description.into(),
            priority,
            self.clock.clone(),
        );
        info!(
            "event=task_created module=factory status=ok task_id={} task_type={} priority={}",
            id,
            task_type.as_str(),
            priority.as_str()
        );
        TaskHandle::new(task)
    }

    /// Id the next `create_task` call will use.
    pub fn peek_next_id(&self) -> TaskId {
        self.next_id.load(Ordering::Relaxed)
    }

    pub(crate) fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    fn allocate_id(&self) -> TaskId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for TaskFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for TaskFactory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskFactory")
            .field("next_id", &self.peek_next_id())
            .finish()
    }
}
