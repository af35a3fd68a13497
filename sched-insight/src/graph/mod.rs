/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Dependency graph payload types.
//!
//! The backend describes the task DAG for a scenario as a node/edge list plus
//! a pre-computed [`DependencyAnalysis`]:
//!
//! ```json
//! {
//!   "graph_data": {
//!     "nodes": [{"id": 1, "label": "T1", "execution_time": 2, "profit": 40, "cpu": 2, "ram": 4}],
//!     "edges": [{"from": 1, "to": 2, "label": "depends on"}]
//!   },
//!   "dependency_analysis": { "total_tasks": 2, "has_cycles": false, ... }
//! }
//! ```
//!
//! A payload is held only for the render it belongs to. [`validate`] checks
//! it before any render attempt; [`analysis`] can re-derive the analysis from
//! the edge list.

pub mod analysis;
pub mod validate;

pub use validate::{drift, validate, AnalysisDrift, AnalysisInconsistency, GraphError, MalformedReason};

use serde::{Deserialize, Serialize};

use crate::model::{CaseType, TaskId};

// ── Nodes and edges ───────────────────────────────────────────────────────────

/// One task in the dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Task id; unique within a payload.
    pub id: TaskId,
    #[serde(default)]
    pub label: String,
    /// Execution time in scheduler time units.
    pub execution_time: f64,
    #[serde(default)]
    pub profit: f64,
    /// CPU cores requested.
    #[serde(default)]
    pub cpu: f64,
    /// RAM requested, in GB.
    #[serde(default)]
    pub ram: f64,
}

impl GraphNode {
    /// Display label, `T{id}` when the payload left it empty.
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            format!("T{}", self.id)
        } else {
            self.label.clone()
        }
    }
}

/// `from` must finish before `to` starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: TaskId,
    pub to: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GraphEdge {
    pub fn new(from: TaskId, to: TaskId) -> Self {
        Self {
            from,
            to,
            label: None,
        }
    }
}

/// Node and edge lists, exactly as delivered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    /// Direct predecessors of `id` in edge order, duplicates dropped.
    pub fn predecessors(&self, id: TaskId) -> Vec<TaskId> {
        let mut preds: Vec<TaskId> = Vec::new();
        for edge in self.edges.iter().filter(|e| e.to == id) {
            if !preds.contains(&edge.from) {
                preds.push(edge.from);
            }
        }
        preds
    }

    pub fn node(&self, id: TaskId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

// ── Analysis ──────────────────────────────────────────────────────────────────

/// Dependency statistics for one graph.
///
/// Invariant: `has_cycles` ⇒ `critical_path` and `topological_order` are
/// both empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DependencyAnalysis {
    pub total_tasks: usize,
    pub tasks_with_dependencies: usize,
    pub max_dependencies: usize,
    pub avg_dependencies: f64,
    pub has_cycles: bool,
    #[serde(default)]
    pub critical_path: Vec<TaskId>,
    #[serde(default)]
    pub critical_path_length: f64,
    #[serde(default)]
    pub topological_order: Vec<TaskId>,
}

// ── Payload ───────────────────────────────────────────────────────────────────

/// One graph response for the currently selected scenario.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphPayload {
    /// Echoed by the backend; not used for rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<CaseType>,

    pub graph_data: GraphData,

    /// Absent analysis is tolerated: the fallback view only needs
    /// `graph_data`.
    #[serde(default)]
    pub dependency_analysis: Option<DependencyAnalysis>,
}

impl GraphPayload {
    pub fn new(graph_data: GraphData, dependency_analysis: Option<DependencyAnalysis>) -> Self {
        Self {
            case_type: None,
            graph_data,
            dependency_analysis,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
