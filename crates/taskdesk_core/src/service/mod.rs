//! Core use-case services.
//!
//! # Responsibility
//! - Construct tasks through a single factory.
//! - Orchestrate users, projects and tasks for shell callers.

pub mod board_service;
pub mod task_factory;
