//! Task domain model.
//!
//! # Responsibility
//! - Define the closed set of task variants and their shared lifecycle.
//! - Stamp `updated_at` and notify observers on every mutation.
//!
//! # Invariants
//! - `id` and `created_at` never change after construction.
//! - `updated_at >= created_at`, and it only moves on mutations.
//! - Each documented mutation emits exactly one event per observer.
//! - Tasks are built by `TaskFactory`; there is no public constructor.

use crate::clock::Clock;
use crate::model::user::{User, UserId};
use crate::observer::{DeliveryReport, ObserverList, TaskEvent, TaskEventKind, TaskObserver};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Factory-assigned task identifier. Starts at 1, never reused.
pub type TaskId = u64;

/// Days between creation and the default due date of a deadline task.
pub const DEFAULT_DEADLINE_DAYS: i64 = 7;

/// Date format used in messages and summaries.
pub const SHORT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant tag requested from the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Simple,
    Deadline,
    Recurring,
    Attachments,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Deadline => "deadline",
            Self::Recurring => "recurring",
            Self::Attachments => "attachments",
        }
    }
}

impl Display for TaskType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
}

impl RecurrencePattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

impl Display for RecurrencePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recurrence rule of a recurring task.
///
/// The core accepts any interval; range checks belong to the caller
/// (see `validation::validate_recurrence_interval`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub pattern: RecurrencePattern,
    pub interval: u32,
}

impl Default for Recurrence {
    fn default() -> Self {
        Self {
            pattern: RecurrencePattern::Weekly,
            interval: 1,
        }
    }
}

/// Named file reference carried by an attachments task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    name: String,
    path: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Variant-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Simple,
    Deadline { due_at: DateTime<Utc> },
    Recurring(Recurrence),
    /// Append-only, insertion-ordered.
    Attachments(Vec<Attachment>),
}

impl TaskKind {
    /// Payload defaults for a freshly created task of `task_type`.
    pub(crate) fn defaults_for(task_type: TaskType, created_at: DateTime<Utc>) -> Self {
        match task_type {
            TaskType::Simple => Self::Simple,
            TaskType::Deadline => Self::Deadline {
                due_at: created_at + Duration::days(DEFAULT_DEADLINE_DAYS),
            },
            TaskType::Recurring => Self::Recurring(Recurrence::default()),
            TaskType::Attachments => Self::Attachments(Vec::new()),
        }
    }

    pub fn task_type(&self) -> TaskType {
        match self {
            Self::Simple => TaskType::Simple,
            Self::Deadline { .. } => TaskType::Deadline,
            Self::Recurring(_) => TaskType::Recurring,
            Self::Attachments(_) => TaskType::Attachments,
        }
    }
}

/// Errors from task mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// A variant-specific mutator was called on another variant.
    VariantMismatch {
        task_id: TaskId,
        expected: TaskType,
        actual: TaskType,
    },
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VariantMismatch {
                task_id,
                expected,
                actual,
            } => write!(
                f,
                "task {task_id} is a {actual} task; operation requires a {expected} task"
            ),
        }
    }
}

impl Error for TaskError {}

pub type TaskResult<T> = Result<T, TaskError>;

/// A unit of work.
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    priority: Priority,
    status: TaskStatus,
    assignee: Option<Arc<User>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    kind: TaskKind,
    observers: ObserverList,
    clock: Arc<dyn Clock>,
}

impl Task {
    pub(crate) fn new(
        id: TaskId,
        task_type: TaskType,
        title: String,
        description: String,
        priority: Priority,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let created_at = clock.now();
        Self {
            id,
            title,
            description,
            priority,
            status: TaskStatus::Pending,
            assignee: None,
            created_at,
            updated_at: created_at,
            kind: TaskKind::defaults_for(task_type, created_at),
            observers: ObserverList::new(),
            clock,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn assignee(&self) -> Option<&Arc<User>> {
        self.assignee.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn task_type(&self) -> TaskType {
        self.kind.task_type()
    }

    /// Due date of a deadline task, `None` for other variants.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        match &self.kind {
            TaskKind::Deadline { due_at } => Some(*due_at),
            _ => None,
        }
    }

    /// Recurrence rule of a recurring task, `None` for other variants.
    pub fn recurrence(&self) -> Option<Recurrence> {
        match &self.kind {
            TaskKind::Recurring(rule) => Some(*rule),
            _ => None,
        }
    }

    /// Snapshot of attachments; empty for non-attachment variants.
    pub fn attachments(&self) -> Vec<Attachment> {
        match &self.kind {
            TaskKind::Attachments(items) => items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn is_observed_by(&self, observer: &dyn TaskObserver) -> bool {
        self.observers.contains(observer)
    }

    /// Sets (or replaces) the assignee and notifies observers.
    pub fn assign_to(&mut self, user: Arc<User>) -> DeliveryReport {
        let message = format!("Task '{}' assigned to {}", self.title, user.name());
        self.assignee = Some(user);
        self.touch();
        self.emit(TaskEventKind::Assigned, message)
    }

    /// Overwrites the status. No transition is rejected.
    pub fn update_status(&mut self, new_status: TaskStatus) -> DeliveryReport {
        let old_status = self.status;
        self.status = new_status;
        self.touch();
        self.emit(
            TaskEventKind::StatusChanged,
            format!(
                "Status of task '{}' changed from {} to {}",
                self.title, old_status, new_status
            ),
        )
    }

    pub fn set_deadline(&mut self, due_at: DateTime<Utc>) -> TaskResult<DeliveryReport> {
        let mismatch = self.variant_mismatch(TaskType::Deadline);
        match &mut self.kind {
            TaskKind::Deadline { due_at: current } => *current = due_at,
            _ => return Err(mismatch),
        }
        self.touch();
        Ok(self.emit(
            TaskEventKind::DeadlineSet,
            format!(
                "Deadline of task '{}' set to {}",
                self.title,
                due_at.format(SHORT_DATE_FORMAT)
            ),
        ))
    }

    pub fn set_recurrence_pattern(
        &mut self,
        pattern: RecurrencePattern,
        interval: u32,
    ) -> TaskResult<DeliveryReport> {
        let mismatch = self.variant_mismatch(TaskType::Recurring);
        match &mut self.kind {
            TaskKind::Recurring(rule) => *rule = Recurrence { pattern, interval },
            _ => return Err(mismatch),
        }
        self.touch();
        Ok(self.emit(
            TaskEventKind::RecurrenceSet,
            format!(
                "Recurrence of task '{}' set to {} every {}",
                self.title, pattern, interval
            ),
        ))
    }

    /// Appends one attachment. Existing attachments are never replaced.
    pub fn add_attachment(
        &mut self,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> TaskResult<DeliveryReport> {
        let mismatch = self.variant_mismatch(TaskType::Attachments);
        let attachment = Attachment::new(name, path);
        let message = format!(
            "Attachment '{}' added to task '{}'",
            attachment.name(),
            self.title
        );
        match &mut self.kind {
            TaskKind::Attachments(items) => items.push(attachment),
            _ => return Err(mismatch),
        }
        self.touch();
        Ok(self.emit(TaskEventKind::AttachmentAdded, message))
    }

    /// Adds `observer` unless already registered. Returns `true` if added.
    pub fn register_observer(&mut self, observer: Arc<dyn TaskObserver>) -> bool {
        self.observers.register(observer)
    }

    /// Removes `observer`; unknown observers are ignored.
    pub fn remove_observer(&mut self, observer: &dyn TaskObserver) -> bool {
        self.observers.remove(observer)
    }

    /// Pushes a free-form message to every observer.
    ///
    /// Does not count as a mutation: `updated_at` is left alone.
    pub fn notify_observers(&self, message: impl Into<String>) -> DeliveryReport {
        self.observers.notify(&TaskEvent {
            task_id: self.id,
            task_title: self.title.clone(),
            kind: TaskEventKind::Message,
            message: message.into(),
        })
    }

    /// Serializable read model of the current state.
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            id: self.id,
            task_type: self.task_type(),
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            status: self.status,
            assignee_id: self.assignee.as_ref().map(|user| user.id()),
            assignee_name: self.assignee.as_ref().map(|user| user.name().to_string()),
            created_at: self.created_at,
            updated_at: self.updated_at,
            deadline: self.deadline(),
            recurrence: self.recurrence(),
            attachments: self.attachments(),
            observer_count: self.observers.len(),
        }
    }

    fn touch(&mut self) {
        let now = self.clock.now();
        // A clock stepping backwards must not break `updated_at >= created_at`.
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    fn emit(&self, kind: TaskEventKind, message: String) -> DeliveryReport {
        debug!(
            "event=task_mutated module=task status=ok task_id={} kind={} observers={}",
            self.id,
            kind.as_str(),
            self.observers.len()
        );
        self.observers.notify(&TaskEvent {
            task_id: self.id,
            task_title: self.title.clone(),
            kind,
            message,
        })
    }

    fn variant_mismatch(&self, expected: TaskType) -> TaskError {
        TaskError::VariantMismatch {
            task_id: self.id,
            expected,
            actual: self.task_type(),
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} (Priority: {})",
            self.status, self.title, self.priority
        )?;
        match &self.kind {
            TaskKind::Simple => Ok(()),
            TaskKind::Deadline { due_at } => {
                write!(f, " - Deadline: {}", due_at.format(SHORT_DATE_FORMAT))
            }
            TaskKind::Recurring(rule) => {
                write!(f, " - Recurrence: {} (every {})", rule.pattern, rule.interval)
            }
            TaskKind::Attachments(items) => write!(f, " - Attachments: {}", items.len()),
        }
    }
}

impl Debug for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("priority", &self.priority)
            .field("status", &self.status)
            .field("assignee", &self.assignee.as_ref().map(|user| user.id()))
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("kind", &self.kind)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Point-in-time copy of a task, shaped for rendering and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub id: TaskId,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub assignee_id: Option<UserId>,
    pub assignee_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub recurrence: Option<Recurrence>,
    pub attachments: Vec<Attachment>,
    pub observer_count: usize,
}
