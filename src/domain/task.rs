//! Task domain model
//!
//! [`TaskRecord`] is what arrives at the request boundary: every field is
//! optional so that a missing field is reported as a malformed task rather
//! than as an opaque decoding failure. [`TaskRecord::validate`] turns it into
//! a [`Task`], the only form the graph and scoring code ever see.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::TaskId;

/// Lowest accepted importance
pub const MIN_IMPORTANCE: i64 = 1;

/// Highest accepted importance
pub const MAX_IMPORTANCE: i64 = 10;

/// Largest accepted effort estimate, in hours
pub const MAX_ESTIMATED_HOURS: f64 = 1.0e6;

/// Date format accepted for due dates
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    #[error("Malformed task {task}: {reason}")]
    Malformed { task: String, reason: String },
}

impl TaskError {
    fn malformed(task: &str, reason: impl Into<String>) -> Self {
        TaskError::Malformed {
            task: task.to_string(),
            reason: reason.into(),
        }
    }
}

/// Raw task as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// `YYYY-MM-DD`; absent or null means no deadline
    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<TaskId>>,
}

impl TaskRecord {
    /// Validates the record at input position `index` into a [`Task`]
    ///
    /// A record without an id gets [`TaskId::assigned`]. Nothing else is
    /// defaulted: a missing title, hours or importance is an error.
    pub fn validate(self, index: usize) -> Result<Task, TaskError> {
        let id = self.id.unwrap_or_else(|| TaskId::assigned(index));
        let label = id.to_string();

        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            Some(_) => return Err(TaskError::malformed(&label, "title must not be blank")),
            None => return Err(TaskError::malformed(&label, "missing title")),
        };

        let due_date = match self.due_date {
            None => None,
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw.trim(), DUE_DATE_FORMAT).map_err(|_| {
                    TaskError::malformed(
                        &label,
                        format!("invalid due date '{}', expected YYYY-MM-DD", raw),
                    )
                })?,
            ),
        };

        let estimated_hours = match self.estimated_hours {
            None => return Err(TaskError::malformed(&label, "missing estimated_hours")),
            Some(h) if !h.is_finite() => {
                return Err(TaskError::malformed(&label, "estimated_hours must be finite"))
            }
            Some(h) if h < 0.0 => {
                return Err(TaskError::malformed(
                    &label,
                    format!("estimated_hours must not be negative, got {}", h),
                ))
            }
            Some(h) if h > MAX_ESTIMATED_HOURS => {
                return Err(TaskError::malformed(
                    &label,
                    format!(
                        "estimated_hours must be at most {}, got {}",
                        MAX_ESTIMATED_HOURS, h
                    ),
                ))
            }
            Some(h) => h,
        };

        let importance = match self.importance {
            None => return Err(TaskError::malformed(&label, "missing importance")),
            Some(i) if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&i) => {
                return Err(TaskError::malformed(
                    &label,
                    format!(
                        "importance must be between {} and {}, got {}",
                        MIN_IMPORTANCE, MAX_IMPORTANCE, i
                    ),
                ))
            }
            Some(i) => i as u8,
        };

        let mut dependencies: Vec<TaskId> = Vec::new();
        for dep in self.dependencies.unwrap_or_default() {
            if !dependencies.contains(&dep) {
                dependencies.push(dep);
            }
        }

        Ok(Task {
            id,
            title,
            due_date,
            estimated_hours,
            importance,
            dependencies,
        })
    }
}

/// A validated task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,

    /// None means "no deadline"
    pub due_date: Option<NaiveDate>,

    pub estimated_hours: f64,

    /// Within `MIN_IMPORTANCE..=MAX_IMPORTANCE`
    pub importance: u8,

    /// Tasks that must complete before this one, without repeats
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// Creates a task with no deadline and no dependencies
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, estimated_hours: f64, importance: u8) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
            estimated_hours,
            importance,
            dependencies: Vec::new(),
        }
    }

    /// Sets the due date
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Adds a dependency (no-op if already present)
    pub fn depends_on(mut self, dep: impl Into<TaskId>) -> Self {
        let dep = dep.into();
        if !self.dependencies.contains(&dep) {
            self.dependencies.push(dep);
        }
        self
    }

    /// Signed number of days from `today` until the due date
    ///
    /// Negative when overdue, None when there is no deadline.
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }
}
