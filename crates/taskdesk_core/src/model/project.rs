//! Project aggregate: an ordered task collection with filtered views.
//!
//! # Responsibility
//! - Index the tasks that belong to one project.
//! - Answer priority/status/id/assignee queries with snapshot copies.
//!
//! # Invariants
//! - Insertion order is preserved by every view.
//! - Removing a task only drops it from the index; the task lives on.
//! - Returned vectors are copies; mutating them never touches the project.

use crate::model::handle::TaskHandle;
use crate::model::task::{Priority, TaskId, TaskStatus};
use crate::model::user::UserId;
use log::info;

pub type ProjectId = u32;

#[derive(Debug)]
pub struct Project {
    id: ProjectId,
    name: String,
    tasks: Vec<TaskHandle>,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends `task`. Adding the same handle twice yields two entries.
    pub fn add_task(&mut self, task: TaskHandle) {
        info!(
            "event=project_task_added module=project status=ok project_id={} task_id={}",
            self.id,
            task.id()
        );
        self.tasks.push(task);
    }

    /// Removes the first entry pointing at the same task as `task`.
    ///
    /// Returns `false` (and changes nothing) when the task is not indexed.
    pub fn remove_task(&mut self, task: &TaskHandle) -> bool {
        let Some(index) = self.tasks.iter().position(|entry| entry.ptr_eq(task)) else {
            return false;
        };
        self.tasks.remove(index);
        info!(
            "event=project_task_removed module=project status=ok project_id={} task_id={}",
            self.id,
            task.id()
        );
        true
    }

    pub fn tasks(&self) -> Vec<TaskHandle> {
        self.tasks.clone()
    }

    pub fn tasks_by_priority(&self, priority: Priority) -> Vec<TaskHandle> {
        self.filter(|task| task.priority() == priority)
    }

    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<TaskHandle> {
        self.filter(|task| task.status() == status)
    }

    /// Tasks whose current assignee has `user_id`.
    pub fn tasks_assigned_to(&self, user_id: UserId) -> Vec<TaskHandle> {
        self.tasks
            .iter()
            .filter(|task| {
                task.lock()
                    .assignee()
                    .is_some_and(|user| user.id() == user_id)
            })
            .cloned()
            .collect()
    }

    pub fn find_task_by_id(&self, id: TaskId) -> Option<TaskHandle> {
        self.tasks.iter().find(|task| task.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn filter(&self, predicate: impl Fn(&TaskHandle) -> bool) -> Vec<TaskHandle> {
        self.tasks
            .iter()
            .filter(|task| predicate(*task))
            .cloned()
            .collect()
    }
}
