//! Built-in scoring strategies.
//!
//! # Categories
//!
//! - **Graph-aware**: [`Urgency`], [`ImportanceWeighted`], [`CriticalPath`],
//!   tuned through [`ScoringWeights`](crate::config::ScoringWeights)
//! - **Component blends**: [`SMART_BALANCE`], [`FASTEST_WINS`],
//!   [`HIGH_IMPACT`], [`DEADLINE_DRIVEN`], fixed linear mixes of the four
//!   [`Components`]

use crate::domain::Task;

use super::components::{urgency_points, Components};
use super::context::ScoringContext;
use super::{Evaluation, ScoringStrategy};

fn plural(n: impl Into<i64>) -> &'static str {
    if n.into() == 1 {
        ""
    } else {
        "s"
    }
}

fn due_phrase(days: i64) -> String {
    match days {
        d if d < 0 => format!("Overdue by {} day{}", -d, plural(-d)),
        0 => "Due today".to_string(),
        d => format!("Due in {} day{}", d, plural(d)),
    }
}

// ======================== Graph-aware strategies ========================

/// Deadline pressure plus importance, minus an effort discount.
///
/// `importance × w.importance + urgency_points(days) × w.urgency − w.effort_discount / (1 + hours)`.
/// The discount is largest for the smallest tasks: a task that takes
/// minutes can wait until just before its deadline. Tasks without a deadline
/// score importance plus a bonus that fades along the dependency order.
#[derive(Debug, Clone, Copy)]
pub struct Urgency;

impl ScoringStrategy for Urgency {
    fn name(&self) -> &'static str {
        "urgency"
    }

    fn evaluate(&self, task: &Task, context: &ScoringContext) -> Evaluation {
        let weights = context.weights;
        let importance = f64::from(task.importance) * weights.importance;

        match context.days_until_due(task) {
            Some(days) => {
                let pressure = urgency_points(days) * weights.urgency;
                let discount = weights.effort_discount / (1.0 + task.estimated_hours);
                Evaluation::new(
                    importance + pressure - discount,
                    format!(
                        "{}: deadline pressure adds {:.2} and importance {} adds {:.2}; {:.1}h of effort discounts {:.2}.",
                        due_phrase(days),
                        pressure,
                        task.importance,
                        importance,
                        task.estimated_hours,
                        discount
                    ),
                )
            }
            None => {
                let total = context.len().max(1);
                let position = context.position(&task.id);
                let bonus = weights.position * total.saturating_sub(position) as f64 / total as f64;
                Evaluation::new(
                    importance + bonus,
                    format!(
                        "No deadline: importance {} adds {:.2} and position {} of {} in dependency order adds {:.2}.",
                        task.importance,
                        importance,
                        position + 1,
                        total,
                        bonus
                    ),
                )
            }
        }
    }
}

/// Importance scaled linearly, plus a bonus per transitive dependent.
#[derive(Debug, Clone, Copy)]
pub struct ImportanceWeighted;

impl ScoringStrategy for ImportanceWeighted {
    fn name(&self) -> &'static str {
        "importance-weighted"
    }

    fn evaluate(&self, task: &Task, context: &ScoringContext) -> Evaluation {
        let base = f64::from(task.importance) * context.weights.importance;
        let downstream = context.transitive_dependents(&task.id);

        if downstream == 0 {
            return Evaluation::new(
                base,
                format!(
                    "Importance {} scores {:.2}; no other task waits on it.",
                    task.importance, base
                ),
            );
        }

        let bonus = context.weights.unblock * downstream as f64;
        Evaluation::new(
            base + bonus,
            format!(
                "Importance {} scores {:.2}, plus {:.2} for unblocking {} downstream task{}.",
                task.importance,
                base,
                bonus,
                downstream,
                plural(downstream as i64)
            ),
        )
    }
}

/// Longest remaining chain of estimated hours to any terminal task.
#[derive(Debug, Clone, Copy)]
pub struct CriticalPath;

impl ScoringStrategy for CriticalPath {
    fn name(&self) -> &'static str {
        "critical-path"
    }

    fn evaluate(&self, task: &Task, context: &ScoringContext) -> Evaluation {
        let Some(chain) = context.critical_chain(&task.id) else {
            return Evaluation::new(
                task.estimated_hours,
                format!("Remaining chain is its own {:.1}h.", task.estimated_hours),
            );
        };

        let explanation = match &chain.next {
            None => format!(
                "Nothing depends on this task, so its remaining chain is its own {:.1}h.",
                chain.hours
            ),
            Some(next) => format!(
                "Longest remaining chain is {:.1}h across {} tasks: {:.1}h here, continuing through task {}.",
                chain.hours, chain.length, task.estimated_hours, next
            ),
        };

        Evaluation::new(chain.hours, explanation)
    }
}

// ======================== Component blends ========================

/// Fixed linear mix of importance, urgency, effort and dependency points.
#[derive(Debug, Clone, Copy)]
pub struct ComponentBlend {
    pub name: &'static str,
    pub importance: f64,
    pub urgency: f64,
    pub effort: f64,
    pub dependency: f64,
    headline: fn(&Components) -> String,
}

impl ComponentBlend {
    /// Weighted sum of the components
    pub fn score(&self, c: &Components) -> f64 {
        c.importance * self.importance
            + c.urgency * self.urgency
            + c.effort * self.effort
            + c.dependency * self.dependency
    }
}

impl ScoringStrategy for ComponentBlend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn evaluate(&self, task: &Task, context: &ScoringContext) -> Evaluation {
        let components = Components::compute(task, context);

        let mut parts = vec![(self.headline)(&components)];
        parts.extend(components.hints().into_iter().map(str::to_string));

        Evaluation::new(self.score(&components), parts.join(" "))
    }
}

fn smart_balance_headline(c: &Components) -> String {
    format!(
        "Balanced score combining importance ({:.1}), urgency ({:.1}), effort ({:.1}) and dependency impact ({:.1}).",
        c.importance, c.urgency, c.effort, c.dependency
    )
}

fn fastest_wins_headline(c: &Components) -> String {
    format!(
        "Ranked as a quick win: effort score {:.1} with importance {:.1}.",
        c.effort, c.importance
    )
}

fn high_impact_headline(c: &Components) -> String {
    format!(
        "Ranked for impact: importance {:.1} with urgency {:.1}.",
        c.importance, c.urgency
    )
}

fn deadline_driven_headline(c: &Components) -> String {
    format!(
        "Ranked by deadline: urgency {:.1} with importance {:.1}.",
        c.urgency, c.importance
    )
}

pub const SMART_BALANCE: ComponentBlend = ComponentBlend {
    name: "smart-balance",
    importance: 1.2,
    urgency: 1.2,
    effort: 0.8,
    dependency: 1.5,
    headline: smart_balance_headline,
};

pub const FASTEST_WINS: ComponentBlend = ComponentBlend {
    name: "fastest-wins",
    importance: 0.5,
    urgency: 0.5,
    effort: 2.0,
    dependency: 0.0,
    headline: fastest_wins_headline,
};

pub const HIGH_IMPACT: ComponentBlend = ComponentBlend {
    name: "high-impact",
    importance: 2.0,
    urgency: 1.0,
    effort: 0.3,
    dependency: 0.0,
    headline: high_impact_headline,
};

pub const DEADLINE_DRIVEN: ComponentBlend = ComponentBlend {
    name: "deadline-driven",
    importance: 1.0,
    urgency: 2.0,
    effort: 0.5,
    dependency: 0.0,
    headline: deadline_driven_headline,
};
