/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Re-derivation of [`DependencyAnalysis`] from the raw edge list.
//!
//! The backend ships its own analysis. It is displayed as delivered, but it is
//! also recomputed here so [`drift`](super::drift) can flag a boundary that
//! disagrees with its own edges, and so a payload without an analysis still
//! gets one in the report.
//!
//! # Algorithms
//! * Topological order: Kahn's algorithm. The initial queue follows node order
//!   and successors follow edge order, so the result is deterministic.
//! * Cycles: `petgraph::algo::is_cyclic_directed`.
//! * Critical path: longest path over the topological order, each node
//!   weighted by its `execution_time` (the start node's own time included).
//!
//! Edges whose endpoints are not in the node list are ignored, and parallel
//! edges count once.

use std::collections::{HashMap, VecDeque};

use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction::{Incoming, Outgoing};

use super::{DependencyAnalysis, GraphData};
use crate::model::TaskId;

/// Directed task graph keyed by task id.
pub type TaskGraph = DiGraphMap<TaskId, ()>;

/// Build the petgraph view of `graph`, skipping dangling edges.
pub fn build(graph: &GraphData) -> TaskGraph {
    let mut g = TaskGraph::with_capacity(graph.nodes.len(), graph.edges.len());
    for node in &graph.nodes {
        g.add_node(node.id);
    }
    for edge in &graph.edges {
        if g.contains_node(edge.from) && g.contains_node(edge.to) {
            g.add_edge(edge.from, edge.to, ());
        }
    }
    g
}

/// Recompute every field of [`DependencyAnalysis`] from `graph`.
pub fn derive(graph: &GraphData) -> DependencyAnalysis {
    let g = build(graph);

    let deps: Vec<usize> = g
        .nodes()
        .map(|n| g.neighbors_directed(n, Incoming).count())
        .collect();
    let total_tasks = deps.len();
    let avg_dependencies = if total_tasks == 0 {
        0.0
    } else {
        deps.iter().sum::<usize>() as f64 / total_tasks as f64
    };

    let has_cycles = is_cyclic_directed(&g);
    let (topological_order, critical_path, critical_path_length) = if has_cycles {
        (Vec::new(), Vec::new(), 0.0)
    } else {
        let order = topological_order(&g).unwrap_or_default();
        let (path, length) = critical_path(graph, &g, &order);
        (order, path, length)
    };

    DependencyAnalysis {
        total_tasks,
        tasks_with_dependencies: deps.iter().filter(|&&d| d > 0).count(),
        max_dependencies: deps.iter().copied().max().unwrap_or(0),
        avg_dependencies,
        has_cycles,
        critical_path,
        critical_path_length,
        topological_order,
    }
}

/// Kahn's algorithm. `None` if the graph has a cycle.
pub fn topological_order(g: &TaskGraph) -> Option<Vec<TaskId>> {
    let order = kahn(g);
    (order.len() == g.node_count()).then_some(order)
}

/// Depth of every node along its longest chain of predecessors; roots are
/// level `0`. Nodes caught in a cycle are placed one level past the deepest
/// acyclic node so they still get a column.
pub fn depth_levels(graph: &GraphData) -> HashMap<TaskId, usize> {
    let g = build(graph);
    let order = kahn(&g);

    let mut levels: HashMap<TaskId, usize> = HashMap::with_capacity(g.node_count());
    for &u in &order {
        let lu = *levels.entry(u).or_insert(0);
        for v in g.neighbors_directed(u, Outgoing) {
            let lv = levels.entry(v).or_insert(0);
            *lv = (*lv).max(lu + 1);
        }
    }

    let stuck_level = order
        .iter()
        .filter_map(|n| levels.get(n))
        .copied()
        .max()
        .map_or(0, |m| m + 1);
    for n in g.nodes() {
        if !order.contains(&n) {
            levels.insert(n, stuck_level);
        }
    }
    levels
}

// ── Internals ─────────────────────────────────────────────────────────────────

/// Kahn's algorithm, returning the processed prefix even when a cycle stops
/// it early.
fn kahn(g: &TaskGraph) -> Vec<TaskId> {
    let mut in_degree: HashMap<TaskId, usize> = g
        .nodes()
        .map(|n| (n, g.neighbors_directed(n, Incoming).count()))
        .collect();

    let mut queue: VecDeque<TaskId> = g.nodes().filter(|n| in_degree[n] == 0).collect();
    let mut order = Vec::with_capacity(g.node_count());

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for next in g.neighbors_directed(current, Outgoing) {
            if let Some(d) = in_degree.get_mut(&next) {
                *d -= 1;
                if *d == 0 {
                    queue.push_back(next);
                }
            }
        }
    }
    order
}

/// Longest execution-time-weighted path over `order`.
fn critical_path(graph: &GraphData, g: &TaskGraph, order: &[TaskId]) -> (Vec<TaskId>, f64) {
    let weight = |id: TaskId| -> f64 {
        graph
            .node(id)
            .map(|n| n.execution_time)
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(0.0)
    };

    let mut dist: HashMap<TaskId, f64> = order.iter().map(|&n| (n, weight(n))).collect();
    let mut pred: HashMap<TaskId, TaskId> = HashMap::new();

    for &u in order {
        let du = dist[&u];
        for v in g.neighbors_directed(u, Outgoing) {
            let candidate = du + weight(v);
            if candidate > dist[&v] {
                dist.insert(v, candidate);
                pred.insert(v, u);
            }
        }
    }

    // First node (in topological order) with the greatest distance.
    let Some(end) = order.iter().copied().fold(None::<TaskId>, |best, n| match best {
        Some(b) if dist[&n] <= dist[&b] => Some(b),
        _ => Some(n),
    }) else {
        return (Vec::new(), 0.0);
    };

    let mut path = vec![end];
    let mut current = end;
    while let Some(&p) = pred.get(&current) {
        path.push(p);
        current = p;
    }
    path.reverse();

    (path, dist[&end])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
