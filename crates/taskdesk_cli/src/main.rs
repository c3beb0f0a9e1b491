//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskdesk_core` linkage by seeding the sample board.
//! - Print project listings, "my tasks" and inboxes deterministically
//!   enough for quick local sanity checks.
//!
//! Logging is enabled only when `TASKDESK_LOG_DIR` is set.

use chrono::{Duration, Utc};
use log::info;
use std::error::Error;
use std::process::ExitCode;
use taskdesk_core::{init_logging, LoggingConfig, Priority, TaskBoard, TaskStatus, TaskType};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskdesk: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Some(config) = LoggingConfig::from_env() {
        init_logging(&config)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        taskdesk_core::core_version()
    );

    let board = seed_board()?;
    println!("taskdesk_core version={}", taskdesk_core::core_version());

    for project in board.projects() {
        println!(
            "project {} '{}' - {} tasks",
            project.id(),
            project.name(),
            project.len()
        );
        for task in project.tasks() {
            println!("  #{} {}", task.id(), task.summary());
        }
        let high = project.tasks_by_priority(Priority::High).len();
        let pending = project.tasks_by_status(TaskStatus::Pending).len();
        println!("  high={high} pending={pending}");
    }

    for user in board.users() {
        let mine = board.tasks_assigned_to(user.id());
        println!("user {} '{}' - {} assigned", user.id(), user.name(), mine.len());
        for entry in user.notifications() {
            println!("  {entry}");
        }
    }

    Ok(())
}

/// Sample users, projects and two pre-populated tasks.
fn seed_board() -> Result<TaskBoard, Box<dyn Error>> {
    let mut board = TaskBoard::new();
    let users: Vec<_> = ["User 1", "User 2", "User 3"]
        .into_iter()
        .map(|name| board.add_user(name))
        .collect();

    let store = board.create_project("Online Sales System")?;
    board.create_project("Mobile App")?;

    let requirements = board.create_task_in(
        store,
        TaskType::Simple,
        "Define requirements",
        "Gather the initial system requirements",
        Priority::High,
    )?;
    board.assign_task(&requirements, users[0].id())?;

    let prototypes = board.create_task_in(
        store,
        TaskType::Deadline,
        "Create prototypes",
        "Design screen prototypes",
        Priority::Medium,
    )?;
    prototypes
        .lock()
        .set_deadline(Utc::now() + Duration::days(7))?;
    board.assign_task(&prototypes, users[1].id())?;

    Ok(board)
}
