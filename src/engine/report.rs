//! Response contract.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

use crate::domain::{Task, TaskId};
use crate::scoring::Strategy;

/// A task with its computed score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub score: f64,
    pub explanation: String,
    /// 0-based position in the topological order
    pub order: usize,
}

/// Result of analyzing one request, tasks in ascending `order`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub strategy: Strategy,
    pub today: NaiveDate,
    pub tasks: Vec<ScoredTask>,
}

impl AnalysisReport {
    /// Number of scored tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the report has no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a scored task by id
    pub fn get(&self, id: &TaskId) -> Option<&ScoredTask> {
        self.tasks.iter().find(|t| &t.task.id == id)
    }

    /// Tasks by descending score, ties broken by ascending order
    pub fn ranked(&self) -> Vec<&ScoredTask> {
        let mut ranked: Vec<&ScoredTask> = self.tasks.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.order.cmp(&b.order))
        });
        ranked
    }
}

/// Highest-scoring tasks of a request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestions {
    pub strategy: Strategy,
    pub today: NaiveDate,
    /// Number of tasks that were scored
    pub total: usize,
    /// Up to `limit` tasks, by descending score
    pub tasks: Vec<ScoredTask>,
}

impl Suggestions {
    /// Keeps the `limit` best tasks of a report
    pub fn from_report(report: AnalysisReport, limit: usize) -> Self {
        let tasks = report.ranked().into_iter().take(limit).cloned().collect();
        Self {
            strategy: report.strategy,
            today: report.today,
            total: report.len(),
            tasks,
        }
    }
}
