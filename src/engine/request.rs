//! Request contract and decoding.
//!
//! A request document is either a bare array of task records or an object:
//!
//! ```json
//! { "strategy": "urgency", "today": "2025-03-01", "tasks": [ ... ] }
//! ```
//!
//! `strategy` and `today` are optional. An unknown strategy is reported
//! before the tasks are looked at; a task element that is not a well-typed
//! record is reported as a malformed task with its index.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::error::AnalysisError;
use crate::domain::{TaskRecord, DUE_DATE_FORMAT};
use crate::scoring::Strategy;

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("Invalid request document: {0}")]
    InvalidDocument(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl RequestError {
    /// Stable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::InvalidDocument(_) => "InvalidRequest",
            RequestError::Analysis(err) => err.kind(),
        }
    }
}

/// One analysis request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Strategy name; the configured default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// Reference date for due-date pressure; the local date when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,

    pub tasks: Vec<TaskRecord>,
}

impl AnalysisRequest {
    pub fn new(tasks: Vec<TaskRecord>) -> Self {
        Self {
            strategy: None,
            today: None,
            tasks,
        }
    }

    /// Sets the strategy name
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Sets the reference date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Decodes a JSON request document
    pub fn from_json(text: &str) -> Result<Self, RequestError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| RequestError::InvalidDocument(e.to_string()))?;
        Self::from_value(value)
    }

    /// Decodes an already-parsed document
    pub fn from_value(value: Value) -> Result<Self, RequestError> {
        let (strategy, today, tasks) = match value {
            Value::Array(tasks) => (None, None, tasks),
            Value::Object(mut obj) => {
                let tasks = match obj.remove("tasks") {
                    Some(Value::Array(tasks)) => tasks,
                    Some(_) => return Err(invalid("'tasks' must be an array")),
                    None => return Err(invalid("missing 'tasks'")),
                };
                let strategy = match obj.remove("strategy") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(s)) => Some(s),
                    Some(_) => return Err(invalid("'strategy' must be a string")),
                };
                let today = match obj.remove("today") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(s)) => Some(
                        NaiveDate::parse_from_str(&s, DUE_DATE_FORMAT)
                            .map_err(|_| invalid(format!("invalid 'today' date '{}'", s)))?,
                    ),
                    Some(_) => return Err(invalid("'today' must be a YYYY-MM-DD string")),
                };
                (strategy, today, tasks)
            }
            _ => return Err(invalid("expected an array of tasks or an object with 'tasks'")),
        };

        // An unknown strategy outranks any problem with the tasks
        if let Some(name) = &strategy {
            name.parse::<Strategy>().map_err(AnalysisError::from)?;
        }

        let tasks = tasks
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                serde_json::from_value::<TaskRecord>(element).map_err(|e| {
                    RequestError::Analysis(AnalysisError::MalformedTask {
                        task: format!("at index {}", index),
                        reason: e.to_string(),
                    })
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            strategy,
            today,
            tasks,
        })
    }
}

fn invalid(message: impl Into<String>) -> RequestError {
    RequestError::InvalidDocument(message.into())
}
