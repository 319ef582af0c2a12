//! Output formatting for CLI commands

use serde::Serialize;

use crate::domain::TaskId;
use crate::engine::{AnalysisError, RequestError};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints a failed command's error to stderr
    pub fn failure(&self, err: &anyhow::Error) {
        match self.format {
            OutputFormat::Text => eprintln!("Error: {:#}", err),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "success": false,
                        "kind": error_kind(err),
                        "tasks": error_tasks(err),
                        "error": format!("{:#}", err)
                    })
                );
            }
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Callers render their own text; this is the fallback
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Machine-readable kind of a command error
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<AnalysisError>() {
        e.kind()
    } else if let Some(e) = err.downcast_ref::<RequestError>() {
        e.kind()
    } else {
        "Error"
    }
}

/// Task ids a command error is about, empty when it names none
pub fn error_tasks(err: &anyhow::Error) -> Vec<&TaskId> {
    if let Some(e) = err.downcast_ref::<AnalysisError>() {
        e.task_ids()
    } else if let Some(RequestError::Analysis(e)) = err.downcast_ref::<RequestError>() {
        e.task_ids()
    } else {
        vec![]
    }
}

/// Display band for a score; bands are a presentation concern only
pub fn band(score: f64) -> &'static str {
    if score >= 12.0 {
        "High"
    } else if score >= 8.0 {
        "Medium"
    } else {
        "Low"
    }
}
