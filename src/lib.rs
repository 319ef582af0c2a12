//! Task Analyzer - dependency-aware task prioritization
//!
//! Takes a set of tasks with due dates, effort estimates, importance and
//! dependencies, orders them so that every dependency comes first, and
//! scores each one with a selectable strategy.
//!
//! ```
//! use task_analyzer::{Analyzer, AnalysisRequest};
//!
//! let request = AnalysisRequest::from_json(r#"{
//!     "strategy": "critical-path",
//!     "tasks": [
//!         {"id": 1, "title": "Design", "estimated_hours": 3, "importance": 4},
//!         {"id": 2, "title": "Build", "estimated_hours": 8, "importance": 5, "dependencies": [1]}
//!     ]
//! }"#).unwrap();
//!
//! let report = Analyzer::default().analyze(&request).unwrap();
//! assert_eq!(report.tasks[0].order, 0);
//! assert_eq!(report.tasks[0].score, 11.0);
//! ```

pub mod domain;
pub mod scoring;
pub mod engine;
pub mod config;
pub mod cli;

pub use config::AnalyzerConfig;
pub use domain::{DependencyGraph, Task, TaskId, TaskRecord};
pub use engine::{AnalysisError, AnalysisReport, AnalysisRequest, Analyzer, ScoredTask};
pub use scoring::Strategy;
