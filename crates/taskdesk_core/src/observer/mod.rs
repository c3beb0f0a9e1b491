//! Task change notification.
//!
//! # Responsibility
//! - Define the observer contract used to learn about task mutations.
//! - Fan one event out to every registered observer, synchronously.
//!
//! # Invariants
//! - Delivery order equals registration order.
//! - One failing observer never blocks delivery to the rest.
//! - No queueing, batching or deduplication of events.

pub mod event;
pub mod list;

pub use event::{DeliveryError, TaskEvent, TaskEventKind, TaskObserver};
pub use list::{DeliveryReport, ObserverList};
