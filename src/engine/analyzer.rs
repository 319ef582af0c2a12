//! Request orchestration.
//!
//! `strategy → validate → graph → order → score`. Each step either succeeds
//! for the whole request or aborts it.

use chrono::{Local, NaiveDate};
use std::collections::HashMap;

use super::error::AnalysisError;
use super::report::{AnalysisReport, ScoredTask, Suggestions};
use super::request::AnalysisRequest;
use crate::config::AnalyzerConfig;
use crate::domain::{DependencyGraph, Task, TaskId, TaskRecord};
use crate::scoring::{ScoringContext, Strategy};

/// The prioritization engine
///
/// Holds only read-only configuration, so one instance can serve any number
/// of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Resolves a strategy name, falling back to the configured default
    pub fn resolve_strategy(&self, requested: Option<&str>) -> Result<Strategy, AnalysisError> {
        match requested {
            Some(name) => Ok(name.parse()?),
            None => Ok(self.config.default_strategy),
        }
    }

    /// Scores every task of a request
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let strategy = self.resolve_strategy(request.strategy.as_deref())?;
        let tasks = validate_records(&request.tasks)?;
        let today = request.today.unwrap_or_else(|| Local::now().date_naive());

        self.analyze_tasks(&tasks, strategy, today)
    }

    /// Scores already-validated tasks
    pub fn analyze_tasks(
        &self,
        tasks: &[Task],
        strategy: Strategy,
        today: NaiveDate,
    ) -> Result<AnalysisReport, AnalysisError> {
        let graph = DependencyGraph::from_tasks(tasks)?;
        let order = graph.topological_order()?;
        let context = ScoringContext::new(tasks, &graph, &order, today, &self.config.weights);

        let by_id: HashMap<&TaskId, &Task> = tasks.iter().map(|t| (&t.id, t)).collect();
        let scorer = strategy.scorer();

        let mut scored = Vec::with_capacity(order.len());
        for (position, id) in order.iter().enumerate() {
            let Some(task) = by_id.get(id) else {
                continue;
            };
            let evaluation = scorer.evaluate(task, &context);
            tracing::trace!(task = %id, score = evaluation.score, "scored task");

            scored.push(ScoredTask {
                task: (*task).clone(),
                score: evaluation.score,
                explanation: evaluation.explanation,
                order: position,
            });
        }

        tracing::info!(strategy = %strategy, tasks = scored.len(), "analysis complete");

        Ok(AnalysisReport {
            strategy,
            today,
            tasks: scored,
        })
    }

    /// Best `limit` tasks of a request, the configured limit when None
    pub fn suggest(
        &self,
        request: &AnalysisRequest,
        limit: Option<usize>,
    ) -> Result<Suggestions, AnalysisError> {
        let limit = limit.unwrap_or(self.config.suggest_limit);
        let report = self.analyze(request)?;
        Ok(Suggestions::from_report(report, limit))
    }

    /// Validates a request and returns its dependency order without scoring
    pub fn validate(&self, request: &AnalysisRequest) -> Result<Vec<TaskId>, AnalysisError> {
        let tasks = validate_records(&request.tasks)?;
        let graph = DependencyGraph::from_tasks(&tasks)?;
        Ok(graph.topological_order()?)
    }
}

/// Validates every record, stopping at the first malformed one
fn validate_records(records: &[TaskRecord]) -> Result<Vec<Task>, AnalysisError> {
    let tasks = records
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(tasks = tasks.len(), "validated task records");
    Ok(tasks)
}
