//! Shared, lockable reference to one task.

use crate::model::task::{Priority, Task, TaskId, TaskSnapshot, TaskStatus};
use parking_lot::{Mutex, MutexGuard};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Cloneable handle to a task.
///
/// Clones point at the same task. Equality is reference identity, so two
/// distinct tasks with identical fields are never equal.
///
/// The lock is not re-entrant: do not call project queries (which lock
/// each task) while holding a guard from `lock`.
#[derive(Clone)]
pub struct TaskHandle {
    id: TaskId,
    inner: Arc<Mutex<Task>>,
}

impl TaskHandle {
    pub(crate) fn new(task: Task) -> Self {
        Self {
            id: task.id(),
            inner: Arc::new(Mutex::new(task)),
        }
    }

    /// Task id, readable without locking.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Exclusive access for reads and mutations.
    pub fn lock(&self) -> MutexGuard<'_, Task> {
        self.inner.lock()
    }

    pub fn ptr_eq(&self, other: &TaskHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn priority(&self) -> Priority {
        self.lock().priority()
    }

    pub fn status(&self) -> TaskStatus {
        self.lock().status()
    }

    pub fn snapshot(&self) -> TaskSnapshot {
        self.lock().snapshot()
    }

    /// One-line list rendering, same as `Task`'s `Display`.
    pub fn summary(&self) -> String {
        self.lock().to_string()
    }
}

impl PartialEq for TaskHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for TaskHandle {}

impl Debug for TaskHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle").field("id", &self.id).finish()
    }
}
