//! Score components shared by the blended strategies.

use crate::domain::Task;

use super::context::ScoringContext;

/// Due-date pressure on a 0–15 scale
///
/// Overdue tasks climb from 10 by half a point per day (capped at 15), a
/// task due today gets 14, and future tasks lose 0.7 per day from 10.
pub fn urgency_points(days_until_due: i64) -> f64 {
    if days_until_due < 0 {
        (10.0 + days_until_due.unsigned_abs() as f64 * 0.5).min(15.0)
    } else if days_until_due == 0 {
        14.0
    } else {
        (10.0 - days_until_due as f64 * 0.7).max(0.0)
    }
}

/// Effort ease on a 1–10 scale: 10 for an hour or less, then one point
/// less per extra hour
pub fn effort_points(estimated_hours: f64) -> f64 {
    if estimated_hours <= 1.0 {
        10.0
    } else {
        (10.0 - estimated_hours).max(1.0)
    }
}

/// Fan-out on a 0–10 scale: two points per direct dependent
pub fn dependency_points(direct_dependents: usize) -> f64 {
    (direct_dependents as f64 * 2.0).min(10.0)
}

/// Individual component scores of a task
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Components {
    pub importance: f64,
    pub urgency: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl Components {
    pub fn compute(task: &Task, context: &ScoringContext) -> Self {
        Self {
            importance: f64::from(task.importance),
            urgency: context.days_until_due(task).map(urgency_points).unwrap_or(0.0),
            effort: effort_points(task.estimated_hours),
            dependency: dependency_points(context.direct_dependents(&task.id)),
        }
    }

    /// Follow-up sentences describing notable components
    pub fn hints(&self) -> Vec<&'static str> {
        let mut hints = Vec::new();

        if self.urgency > 10.0 {
            hints.push("This task is overdue or due very soon, so urgency heavily boosts its priority.");
        } else if self.urgency > 5.0 {
            hints.push("The due date is approaching, which increases its urgency score.");
        }

        if self.effort >= 9.0 {
            hints.push("It is a very quick task, making it a good quick win.");
        } else if self.effort <= 3.0 {
            hints.push("It requires considerable effort compared to quicker tasks.");
        }

        if self.dependency >= 4.0 {
            hints.push("Completing this task will unblock multiple other tasks.");
        }

        hints
    }
}
