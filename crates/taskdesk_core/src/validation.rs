//! Caller-side input guards.
//!
//! The domain model accepts any value; these checks are what a shell runs
//! on user input before calling into the core.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Smallest recurrence interval a shell should accept.
pub const MIN_RECURRENCE_INTERVAL: u32 = 1;
/// Largest recurrence interval a shell should accept.
pub const MAX_RECURRENCE_INTERVAL: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BlankTitle,
    BlankDescription,
    BlankProjectName,
    BlankAttachmentName,
    BlankAttachmentPath,
    IntervalOutOfRange { value: u32, min: u32, max: u32 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::BlankDescription => write!(f, "task description must not be blank"),
            Self::BlankProjectName => write!(f, "project name must not be blank"),
            Self::BlankAttachmentName => write!(f, "attachment name must not be blank"),
            Self::BlankAttachmentPath => write!(f, "attachment path must not be blank"),
            Self::IntervalOutOfRange { value, min, max } => write!(
                f,
                "recurrence interval {value} is outside {min}..={max}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Returns the trimmed title, or an error when nothing is left.
pub fn validate_title(value: &str) -> Result<String, ValidationError> {
    non_blank(value, ValidationError::BlankTitle)
}

pub fn validate_description(value: &str) -> Result<String, ValidationError> {
    non_blank(value, ValidationError::BlankDescription)
}

pub fn validate_project_name(value: &str) -> Result<String, ValidationError> {
    non_blank(value, ValidationError::BlankProjectName)
}

/// Returns trimmed `(name, path)`; both parts are required.
pub fn validate_attachment(name: &str, path: &str) -> Result<(String, String), ValidationError> {
    let name = non_blank(name, ValidationError::BlankAttachmentName)?;
    let path = non_blank(path, ValidationError::BlankAttachmentPath)?;
    Ok((name, path))
}

pub fn validate_recurrence_interval(value: u32) -> Result<u32, ValidationError> {
    if (MIN_RECURRENCE_INTERVAL..=MAX_RECURRENCE_INTERVAL).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::IntervalOutOfRange {
            value,
            min: MIN_RECURRENCE_INTERVAL,
            max: MAX_RECURRENCE_INTERVAL,
        })
    }
}

fn non_blank(value: &str, error: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_string())
}
