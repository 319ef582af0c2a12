//! Per-request graph facts shared by all strategies.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::config::ScoringWeights;
use crate::domain::{DependencyGraph, Task, TaskId};

/// Longest chain of remaining effort starting at a task
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalChain {
    /// Hours along the chain, this task included
    pub hours: f64,
    /// Number of tasks on the chain, this task included
    pub length: usize,
    /// Next task on the chain, None for a terminal task
    pub next: Option<TaskId>,
}

/// Everything a strategy may know about a task besides its own fields
#[derive(Debug)]
pub struct ScoringContext<'a> {
    pub graph: &'a DependencyGraph,
    pub today: NaiveDate,
    pub weights: &'a ScoringWeights,
    positions: HashMap<TaskId, usize>,
    transitive: HashMap<TaskId, usize>,
    chains: HashMap<TaskId, CriticalChain>,
}

impl<'a> ScoringContext<'a> {
    /// Precomputes positions, downstream counts and critical chains
    ///
    /// `order` must be the topological order of `graph`, and `tasks` the
    /// tasks it was built from.
    pub fn new(
        tasks: &[Task],
        graph: &'a DependencyGraph,
        order: &[TaskId],
        today: NaiveDate,
        weights: &'a ScoringWeights,
    ) -> Self {
        let positions: HashMap<TaskId, usize> = order
            .iter()
            .enumerate()
            .map(|(pos, id)| (id.clone(), pos))
            .collect();

        let transitive = order
            .iter()
            .map(|id| (id.clone(), graph.transitive_dependents(id)))
            .collect();

        let hours: HashMap<&TaskId, f64> = tasks.iter().map(|t| (&t.id, t.estimated_hours)).collect();

        // Reverse topological pass: every dependent is final before its dependency
        let mut chains: HashMap<TaskId, CriticalChain> = HashMap::with_capacity(order.len());
        for id in order.iter().rev() {
            let own = hours.get(id).copied().unwrap_or(0.0);
            let mut best: Option<(&TaskId, &CriticalChain)> = None;
            for dependent in graph.dependents(id) {
                if let Some(chain) = chains.get(dependent) {
                    if best.map_or(true, |(_, b)| chain.hours > b.hours) {
                        best = Some((dependent, chain));
                    }
                }
            }

            let chain = match best {
                Some((next, tail)) => CriticalChain {
                    hours: own + tail.hours,
                    length: tail.length + 1,
                    next: Some(next.clone()),
                },
                None => CriticalChain {
                    hours: own,
                    length: 1,
                    next: None,
                },
            };
            chains.insert(id.clone(), chain);
        }

        Self {
            graph,
            today,
            weights,
            positions,
            transitive,
            chains,
        }
    }

    /// Number of tasks in the request
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the request has no tasks
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// 0-based position of a task in the topological order
    pub fn position(&self, id: &TaskId) -> usize {
        self.positions.get(id).copied().unwrap_or(0)
    }

    /// Number of tasks that list this one as a direct dependency
    pub fn direct_dependents(&self, id: &TaskId) -> usize {
        self.graph.dependents(id).len()
    }

    /// Number of tasks that directly or indirectly depend on this one
    pub fn transitive_dependents(&self, id: &TaskId) -> usize {
        self.transitive.get(id).copied().unwrap_or(0)
    }

    /// Longest remaining chain from this task
    pub fn critical_chain(&self, id: &TaskId) -> Option<&CriticalChain> {
        self.chains.get(id)
    }

    /// Signed days until the task is due, None without a deadline
    pub fn days_until_due(&self, task: &Task) -> Option<i64> {
        task.days_until_due(self.today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn with_context<R>(tasks: &[Task], f: impl FnOnce(&ScoringContext) -> R) -> R {
        let graph = DependencyGraph::from_tasks(tasks).unwrap();
        let order = graph.topological_order().unwrap();
        let weights = ScoringWeights::default();
        let ctx = ScoringContext::new(tasks, &graph, &order, today(), &weights);
        f(&ctx)
    }

    #[test]
    fn critical_chain_takes_longest_branch() {
        // 1 -> 2 (5h) -> 4 (1h)
        // 1 -> 3 (2h)
        let tasks = [
            Task::new(1, "root", 1.0, 5),
            Task::new(2, "long", 5.0, 5).depends_on(1),
            Task::new(3, "short", 2.0, 5).depends_on(1),
            Task::new(4, "tail", 1.0, 5).depends_on(2),
        ];

        with_context(&tasks, |ctx| {
            let root = ctx.critical_chain(&TaskId::from(1)).unwrap();
            assert_eq!(root.hours, 7.0);
            assert_eq!(root.length, 3);
            assert_eq!(root.next, Some(TaskId::from(2)));

            let short = ctx.critical_chain(&TaskId::from(3)).unwrap();
            assert_eq!(short.hours, 2.0);
            assert_eq!(short.next, None);
        });
    }

    #[test]
    fn chain_ties_pick_first_dependent() {
        let tasks = [
            Task::new(1, "root", 1.0, 5),
            Task::new(2, "a", 2.0, 5).depends_on(1),
            Task::new(3, "b", 2.0, 5).depends_on(1),
        ];

        with_context(&tasks, |ctx| {
            assert_eq!(ctx.critical_chain(&TaskId::from(1)).unwrap().next, Some(TaskId::from(2)));
        });
    }

    #[test]
    fn positions_and_counts() {
        let tasks = [
            Task::new(3, "c", 1.0, 5).depends_on(2),
            Task::new(2, "b", 1.0, 5).depends_on(1),
            Task::new(1, "a", 1.0, 5),
        ];

        with_context(&tasks, |ctx| {
            assert_eq!(ctx.len(), 3);
            assert_eq!(ctx.position(&TaskId::from(1)), 0);
            assert_eq!(ctx.position(&TaskId::from(3)), 2);
            assert_eq!(ctx.direct_dependents(&TaskId::from(1)), 1);
            assert_eq!(ctx.transitive_dependents(&TaskId::from(1)), 2);
            assert_eq!(ctx.transitive_dependents(&TaskId::from(3)), 0);
        });
    }

    #[test]
    fn empty_context() {
        with_context(&[], |ctx| {
            assert!(ctx.is_empty());
            assert!(ctx.critical_chain(&TaskId::from(1)).is_none());
        });
    }
}
