//! Task domain model.
//!
//! # Responsibility
//! - Define tasks, users and projects used by core business logic.
//! - Keep all mutation behind methods so invariants hold.
//!
//! # Invariants
//! - Tasks are only constructed by `TaskFactory`.
//! - Queries hand out snapshot copies, never internal collections.

pub mod handle;
pub mod project;
pub mod task;
pub mod user;
