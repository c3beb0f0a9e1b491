//! Board use-case service: users, projects and cross-project queries.
//!
//! # Responsibility
//! - Own the task factory, the user directory and the project list.
//! - Validate shell input before it reaches the domain model.
//! - Answer questions that span projects ("which tasks are mine?").
//!
//! # Invariants
//! - User and project ids are sequential from 1 and never reused.
//! - Every task created through the board is indexed by exactly one project.
//! - Assignee/observer back-references are derived by scanning, not stored.

use crate::clock::{Clock, SystemClock};
use crate::model::handle::TaskHandle;
use crate::model::project::{Project, ProjectId};
use crate::model::task::{Priority, TaskType};
use crate::model::user::{User, UserId};
use crate::observer::DeliveryReport;
use crate::service::task_factory::TaskFactory;
use crate::validation::{
    validate_description, validate_project_name, validate_title, ValidationError,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Errors from board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    ProjectNotFound(ProjectId),
    UserNotFound(UserId),
    /// Shell input rejected before touching the model.
    Validation(ValidationError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::ProjectNotFound(_) | Self::UserNotFound(_) => None,
        }
    }
}

impl From<ValidationError> for BoardError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug)]
pub struct TaskBoard {
    factory: TaskFactory,
    users: Vec<Arc<User>>,
    projects: Vec<Project>,
    next_user_id: UserId,
    next_project_id: ProjectId,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Board whose tasks and user inboxes are stamped by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            factory: TaskFactory::with_clock(clock),
            users: Vec::new(),
            projects: Vec::new(),
            next_user_id: 1,
            next_project_id: 1,
        }
    }

    pub fn factory(&self) -> &TaskFactory {
        &self.factory
    }

    /// Registers a new user and returns a shared reference to it.
    pub fn add_user(&mut self, name: impl Into<String>) -> Arc<User> {
        let id = self.next_user_id;
        self.next_user_id += 1;
        let user = Arc::new(User::with_clock(id, name, self.factory.clock()));
        self.users.push(user.clone());
        info!("event=user_added module=board status=ok user_id={id}");
        user
    }

    /// Snapshot of registered users in registration order.
    pub fn users(&self) -> Vec<Arc<User>> {
        self.users.clone()
    }

    pub fn find_user(&self, id: UserId) -> Option<Arc<User>> {
        self.users.iter().find(|user| user.id() == id).cloned()
    }

    pub fn create_project(&mut self, name: &str) -> BoardResult<ProjectId> {
        let name = validate_project_name(name)?;
        let id = self.next_project_id;
        self.next_project_id += 1;
        self.projects.push(Project::new(id, name));
        info!("event=project_created module=board status=ok project_id={id}");
        Ok(id)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id() == id)
    }

    pub fn project_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|project| project.id() == id)
    }

    /// Validates input, builds the task and appends it to the project.
    ///
    /// The project is resolved before an id is allocated, so a failed call
    /// never burns a task id.
    pub fn create_task_in(
        &mut self,
        project_id: ProjectId,
        task_type: TaskType,
        title: &str,
        description: &str,
        priority: Priority,
    ) -> BoardResult<TaskHandle> {
        let title = validate_title(title)?;
        let description = validate_description(description)?;
        let project = self
            .projects
            .iter_mut()
            .find(|project| project.id() == project_id)
            .ok_or(BoardError::ProjectNotFound(project_id))?;

        let task = self
            .factory
            .create_task(task_type, title, description, priority);
        project.add_task(task.clone());
        Ok(task)
    }

    /// Tasks assigned to `user_id` across all projects, in project order.
    pub fn tasks_assigned_to(&self, user_id: UserId) -> Vec<TaskHandle> {
        self.projects
            .iter()
            .flat_map(|project| project.tasks_assigned_to(user_id))
            .collect()
    }

    /// Assigns `task` to a registered user and subscribes them to it.
    ///
    /// The assignee is registered after the assignment event goes out, so
    /// they hear about later changes but not about their own assignment
    /// unless they were already watching.
    pub fn assign_task(&self, task: &TaskHandle, user_id: UserId) -> BoardResult<DeliveryReport> {
        let user = self
            .find_user(user_id)
            .ok_or(BoardError::UserNotFound(user_id))?;
        let mut task = task.lock();
        let report = task.assign_to(user.clone());
        task.register_observer(user);
        Ok(report)
    }

    /// Subscribes a registered user to `task`'s notifications.
    ///
    /// Returns `false` when the user was already watching.
    pub fn watch_task(&self, task: &TaskHandle, user_id: UserId) -> BoardResult<bool> {
        let user = self
            .find_user(user_id)
            .ok_or(BoardError::UserNotFound(user_id))?;
        Ok(task.lock().register_observer(user))
    }

    pub fn unwatch_task(&self, task: &TaskHandle, user_id: UserId) -> BoardResult<bool> {
        let user = self
            .find_user(user_id)
            .ok_or(BoardError::UserNotFound(user_id))?;
        Ok(task.lock().remove_observer(&*user))
    }
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new()
    }
}
