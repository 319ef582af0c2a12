//! Scoring strategies.
//!
//! A strategy turns a task plus its place in the dependency graph into a
//! score and a one-paragraph explanation. Strategies are a closed set named
//! by [`Strategy`]; each variant dispatches to a [`ScoringStrategy`]
//! implementation in [`rules`].
//!
//! # Strategies
//!
//! | Name | Favours |
//! |------|---------|
//! | `urgency` | close or missed deadlines, weighted by importance |
//! | `importance-weighted` | important tasks that unblock many others |
//! | `critical-path` | the longest remaining chain of effort |
//! | `smart-balance` | a blend of importance, urgency, effort and fan-out |
//! | `fastest-wins` | low-effort tasks |
//! | `high-impact` | high-importance tasks |
//! | `deadline-driven` | due-date pressure |
//!
//! # Score Convention
//! Higher scores mean higher priority. Scores are rounded to two decimals
//! and never negative.

mod components;
mod context;
pub mod rules;

pub use components::{urgency_points, Components};
pub use context::{CriticalChain, ScoringContext};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::Task;

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown strategy '{name}'; expected one of: {known}", name = .0, known = Strategy::names().join(", "))]
pub struct UnknownStrategy(pub String);

/// Score and explanation for a single task
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    pub explanation: String,
}

impl Evaluation {
    /// Creates an evaluation, clamping the score to `>= 0` and rounding it
    pub fn new(score: f64, explanation: impl Into<String>) -> Self {
        Self {
            score: round2(score.max(0.0)),
            explanation: explanation.into(),
        }
    }
}

/// Rounds to two decimal places
///
/// Values too large to scale are already whole and come back unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// A scoring algorithm
pub trait ScoringStrategy: Send + Sync {
    /// Canonical name of the strategy
    fn name(&self) -> &'static str;

    /// Computes score and explanation for one task
    ///
    /// Must be deterministic: identical task and context produce an
    /// identical evaluation.
    fn evaluate(&self, task: &Task, context: &ScoringContext) -> Evaluation;
}

/// The known strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    Urgency,
    ImportanceWeighted,
    CriticalPath,
    SmartBalance,
    FastestWins,
    HighImpact,
    DeadlineDriven,
}

impl Strategy {
    /// All strategies, in display order
    pub const ALL: [Strategy; 7] = [
        Strategy::Urgency,
        Strategy::ImportanceWeighted,
        Strategy::CriticalPath,
        Strategy::SmartBalance,
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::DeadlineDriven,
    ];

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Urgency => "urgency",
            Strategy::ImportanceWeighted => "importance-weighted",
            Strategy::CriticalPath => "critical-path",
            Strategy::SmartBalance => "smart-balance",
            Strategy::FastestWins => "fastest-wins",
            Strategy::HighImpact => "high-impact",
            Strategy::DeadlineDriven => "deadline-driven",
        }
    }

    /// All canonical names
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.name()).collect()
    }

    /// One-line summary
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Urgency => "Due-date pressure plus importance, minus a discount for small tasks",
            Strategy::ImportanceWeighted => "Importance plus a bonus per task waiting downstream",
            Strategy::CriticalPath => "Longest remaining chain of estimated hours",
            Strategy::SmartBalance => "Balanced blend of importance, urgency, effort and fan-out",
            Strategy::FastestWins => "Quick wins first",
            Strategy::HighImpact => "Most important work first",
            Strategy::DeadlineDriven => "Closest deadlines first",
        }
    }

    /// The implementation behind this strategy
    pub fn scorer(&self) -> &'static dyn ScoringStrategy {
        match self {
            Strategy::Urgency => &rules::Urgency,
            Strategy::ImportanceWeighted => &rules::ImportanceWeighted,
            Strategy::CriticalPath => &rules::CriticalPath,
            Strategy::SmartBalance => &rules::SMART_BALANCE,
            Strategy::FastestWins => &rules::FASTEST_WINS,
            Strategy::HighImpact => &rules::HIGH_IMPACT,
            Strategy::DeadlineDriven => &rules::DEADLINE_DRIVEN,
        }
    }

    /// Scores a task with this strategy
    pub fn evaluate(&self, task: &Task, context: &ScoringContext) -> Evaluation {
        self.scorer().evaluate(task, context)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    /// Case-insensitive; `_` may be used in place of `-`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == normalized)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

impl TryFrom<String> for Strategy {
    type Error = UnknownStrategy;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.name().to_string()
    }
}
