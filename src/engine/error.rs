//! Request-level failures.
//!
//! Every variant aborts the whole request; no partial result is ever
//! produced alongside one of these.

use thiserror::Error;

use crate::domain::{format_cycle, GraphError, TaskError, TaskId};
use crate::scoring::UnknownStrategy;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    #[error(transparent)]
    UnknownStrategy(#[from] UnknownStrategy),

    #[error("Malformed task {task}: {reason}")]
    MalformedTask { task: String, reason: String },

    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(TaskId),

    #[error("Task {task} depends on unknown task {missing}")]
    UnknownDependency { task: TaskId, missing: TaskId },

    #[error("Dependency cycle detected: {}", format_cycle(.0))]
    DependencyCycle(Vec<TaskId>),
}

impl AnalysisError {
    /// Stable name of the error kind, for machine-readable output
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::UnknownStrategy(_) => "UnknownStrategy",
            AnalysisError::MalformedTask { .. } => "MalformedTask",
            AnalysisError::DuplicateTaskId(_) => "DuplicateTaskId",
            AnalysisError::UnknownDependency { .. } => "UnknownDependency",
            AnalysisError::DependencyCycle(_) => "DependencyCycle",
        }
    }

    /// Task ids the error is about, in the order they should be reported
    pub fn task_ids(&self) -> Vec<&TaskId> {
        match self {
            AnalysisError::DuplicateTaskId(id) => vec![id],
            AnalysisError::UnknownDependency { task, missing } => vec![task, missing],
            AnalysisError::DependencyCycle(cycle) => cycle.iter().collect(),
            AnalysisError::UnknownStrategy(_) | AnalysisError::MalformedTask { .. } => vec![],
        }
    }
}

impl From<TaskError> for AnalysisError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Malformed { task, reason } => AnalysisError::MalformedTask { task, reason },
        }
    }
}

impl From<GraphError> for AnalysisError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::DuplicateTaskId(id) => AnalysisError::DuplicateTaskId(id),
            GraphError::UnknownDependency { task, missing } => {
                AnalysisError::UnknownDependency { task, missing }
            }
            GraphError::DependencyCycle(cycle) => AnalysisError::DependencyCycle(cycle),
        }
    }
}
