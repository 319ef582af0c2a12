//! Dependency graph for tasks
//!
//! Built fresh for every request from the validated task list, with
//! referential-integrity checks, cycle detection and a deterministic
//! topological ordering. Uses petgraph for storage and traversal.
//!
//! Nodes are added in input order, so a node's index is its input position.
//! Every traversal below visits neighbours in ascending index order, which
//! is what makes the output stable across runs.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

use super::id::TaskId;
use super::task::Task;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(TaskId),

    #[error("Task {task} depends on unknown task {missing}")]
    UnknownDependency { task: TaskId, missing: TaskId },

    #[error("Dependency cycle detected: {}", format_cycle(.0))]
    DependencyCycle(Vec<TaskId>),
}

/// Renders a cycle as `a -> b -> a`
pub fn format_cycle(cycle: &[TaskId]) -> String {
    let mut parts: Vec<String> = cycle.iter().map(|id| id.to_string()).collect();
    if let Some(first) = cycle.first() {
        parts.push(first.to_string());
    }
    parts.join(" -> ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Finished,
}

/// A dependency graph for tasks
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Edges point from a dependency to its dependent
    graph: DiGraph<TaskId, ()>,

    /// Map from TaskId to node index
    node_map: HashMap<TaskId, NodeIndex>,
}

impl DependencyGraph {
    /// Builds a graph from validated tasks
    ///
    /// Fails on a repeated id, on a dependency naming a task that is not in
    /// the list, and on a task listing itself as a dependency.
    pub fn from_tasks(tasks: &[Task]) -> Result<Self, GraphError> {
        let mut graph = DiGraph::with_capacity(tasks.len(), 0);
        let mut node_map = HashMap::with_capacity(tasks.len());

        // First pass: add all nodes
        for task in tasks {
            if node_map.contains_key(&task.id) {
                return Err(GraphError::DuplicateTaskId(task.id.clone()));
            }
            let idx = graph.add_node(task.id.clone());
            node_map.insert(task.id.clone(), idx);
        }

        // Second pass: add all edges
        for task in tasks {
            let task_idx = node_map[&task.id];
            for dep_id in &task.dependencies {
                if dep_id == &task.id {
                    return Err(GraphError::DependencyCycle(vec![task.id.clone()]));
                }
                let dep_idx = node_map.get(dep_id).ok_or_else(|| GraphError::UnknownDependency {
                    task: task.id.clone(),
                    missing: dep_id.clone(),
                })?;
                graph.add_edge(*dep_idx, task_idx, ());
            }
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built dependency graph"
        );

        Ok(Self { graph, node_map })
    }

    /// Neighbour indices in one direction, in input order
    fn neighbors_sorted(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors_directed(idx, dir).collect();
        neighbors.sort_unstable();
        neighbors
    }

    fn ids(&self, indices: Vec<NodeIndex>) -> Vec<&TaskId> {
        indices.into_iter().map(|idx| &self.graph[idx]).collect()
    }

    /// Returns the direct dependencies of a task, in input order
    pub fn dependencies(&self, task_id: &TaskId) -> Vec<&TaskId> {
        match self.node_map.get(task_id) {
            Some(idx) => self.ids(self.neighbors_sorted(*idx, Direction::Incoming)),
            None => vec![],
        }
    }

    /// Returns the direct dependents of a task (tasks that depend on it), in input order
    pub fn dependents(&self, task_id: &TaskId) -> Vec<&TaskId> {
        match self.node_map.get(task_id) {
            Some(idx) => self.ids(self.neighbors_sorted(*idx, Direction::Outgoing)),
            None => vec![],
        }
    }

    /// Number of tasks that directly or indirectly depend on a task
    pub fn transitive_dependents(&self, task_id: &TaskId) -> usize {
        let Some(&start) = self.node_map.get(task_id) else {
            return 0;
        };

        let mut dfs = Dfs::new(&self.graph, start);
        let mut count = 0;
        while let Some(idx) = dfs.next(&self.graph) {
            if idx != start {
                count += 1;
            }
        }
        count
    }

    /// Returns all tasks in topological order (dependencies before dependents)
    ///
    /// Depth-first over dependencies with three node states. Roots are taken
    /// in input order and a task is emitted once all of its dependencies
    /// have been, so unconstrained tasks keep their relative input order.
    /// Reaching a task that is still in progress means a cycle; the error
    /// carries the shortest loop through that task, which need not be the
    /// shortest cycle in the whole graph.
    pub fn topological_order(&self) -> Result<Vec<TaskId>, GraphError> {
        let mut state = vec![VisitState::Unvisited; self.graph.node_count()];
        let mut order = Vec::with_capacity(self.graph.node_count());

        for root in self.graph.node_indices() {
            if state[root.index()] != VisitState::Unvisited {
                continue;
            }

            state[root.index()] = VisitState::InProgress;
            let mut stack = vec![(root, self.neighbors_sorted(root, Direction::Incoming), 0usize)];

            while let Some((node, deps, cursor)) = stack.last_mut() {
                if let Some(&next) = deps.get(*cursor) {
                    *cursor += 1;
                    match state[next.index()] {
                        VisitState::Unvisited => {
                            state[next.index()] = VisitState::InProgress;
                            stack.push((next, self.neighbors_sorted(next, Direction::Incoming), 0));
                        }
                        VisitState::InProgress => {
                            let cycle = self.shortest_cycle_through(next);
                            tracing::debug!(len = cycle.len(), "dependency cycle found");
                            return Err(GraphError::DependencyCycle(cycle));
                        }
                        VisitState::Finished => {}
                    }
                } else {
                    let node = *node;
                    state[node.index()] = VisitState::Finished;
                    order.push(self.graph[node].clone());
                    stack.pop();
                }
            }
        }

        tracing::debug!(tasks = order.len(), "topological order computed");
        Ok(order)
    }

    /// Shortest loop that starts and ends at `start`, following dependency
    /// edges. Each id in the result depends on the next; the last depends on
    /// the first.
    ///
    /// Minimal among loops through `start` only; a shorter cycle elsewhere in
    /// the graph is not searched for.
    fn shortest_cycle_through(&self, start: NodeIndex) -> Vec<TaskId> {
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut seen: HashSet<NodeIndex> = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for next in self.neighbors_sorted(node, Direction::Incoming) {
                if next == start {
                    let mut path = vec![node];
                    let mut current = node;
                    while let Some(&prev) = parent.get(&current) {
                        path.push(prev);
                        current = prev;
                    }
                    path.reverse();
                    return path.into_iter().map(|idx| self.graph[idx].clone()).collect();
                }
                if seen.insert(next) {
                    parent.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        vec![self.graph[start].clone()]
    }

    /// Returns true if the graph contains the task
    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.node_map.contains_key(task_id)
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}
