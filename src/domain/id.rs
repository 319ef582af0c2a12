//! Task identifiers
//!
//! Callers may identify tasks by integer (`1`, `42`) or by string
//! (`"setup-db"`). The two forms are distinct: `1` and `"1"` never compare
//! equal. Identifiers keep the form they arrived in so that output
//! serializes back exactly as it was supplied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a task within a single request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    /// Numeric identifier, also used for engine-assigned ids
    Number(u64),
    /// Free-form string identifier
    Name(String),
}

impl TaskId {
    /// Identifier the engine assigns to the task at `index` when the caller
    /// omitted one (1-based input position)
    pub fn assigned(index: usize) -> Self {
        TaskId::Number(index as u64 + 1)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Name(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for TaskId {
    fn from(n: u64) -> Self {
        TaskId::Number(n)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::Name(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId::Name(s)
    }
}
