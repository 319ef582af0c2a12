//! Domain models for the task analyzer
//!
//! Contains the core task and graph logic without any I/O concerns.

mod id;
mod task;
mod graph;

pub use id::TaskId;
pub use task::{Task, TaskError, TaskRecord, DUE_DATE_FORMAT, MAX_IMPORTANCE, MIN_IMPORTANCE};
pub use graph::{format_cycle, DependencyGraph, GraphError};
