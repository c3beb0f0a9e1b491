//! User model and notification inbox.
//!
//! # Responsibility
//! - Hold immutable user identity.
//! - Act as a task observer that records every delivered message.
//!
//! # Invariants
//! - The notification log is append-only between explicit clears.
//! - Entries are kept in delivery order.

use crate::clock::{Clock, SystemClock};
use crate::observer::{DeliveryError, TaskEvent, TaskObserver};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

pub type UserId = u32;

const NOTIFICATION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One delivered message, timestamped at delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    delivered_at: DateTime<Utc>,
    message: String,
}

impl Notification {
    pub fn delivered_at(&self) -> DateTime<Utc> {
        self.delivered_at
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.delivered_at.format(NOTIFICATION_TIME_FORMAT),
            self.message
        )
    }
}

pub struct User {
    id: UserId,
    name: String,
    notifications: Mutex<Vec<Notification>>,
    clock: Arc<dyn Clock>,
}

impl User {
    /// Creates a user stamping deliveries with the wall clock.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self::with_clock(id, name, Arc::new(SystemClock))
    }

    pub fn with_clock(id: UserId, name: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            id,
            name: name.into(),
            notifications: Mutex::new(Vec::new()),
            clock,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy of the log, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.lock().len()
    }

    pub fn clear_notifications(&self) {
        self.notifications.lock().clear();
    }
}

impl TaskObserver for User {
    fn observer_name(&self) -> &str {
        &self.name
    }

    fn on_task_event(&self, event: &TaskEvent) -> Result<(), DeliveryError> {
        let entry = Notification {
            delivered_at: self.clock.now(),
            message: event.message.clone(),
        };
        self.notifications.lock().push(entry);
        Ok(())
    }
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("notifications", &self.notification_count())
            .finish()
    }
}
