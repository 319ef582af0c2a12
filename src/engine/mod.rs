//! # Analysis Engine
//!
//! Turns an [`AnalysisRequest`] into an [`AnalysisReport`]:
//!
//! 1. resolve the strategy name ([`AnalysisError::UnknownStrategy`])
//! 2. validate every task record ([`AnalysisError::MalformedTask`])
//! 3. build the dependency graph ([`AnalysisError::DuplicateTaskId`],
//!    [`AnalysisError::UnknownDependency`])
//! 4. order it topologically ([`AnalysisError::DependencyCycle`])
//! 5. score every task in that order
//!
//! The engine does no I/O and keeps no state between requests.

mod analyzer;
mod error;
mod report;
mod request;

pub use analyzer::Analyzer;
pub use error::AnalysisError;
pub use report::{AnalysisReport, ScoredTask, Suggestions};
pub use request::{AnalysisRequest, RequestError};
