/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structural and consistency checks on a graph payload.
//!
//! Two layers, mirroring how the renderer reacts to them:
//!
//! * [`validate()`]: **fatal to interactive rendering**. A payload that fails
//!   goes straight to the fallback view, annotated with the [`GraphError`].
//! * [`drift()`]: **advisory**. Compares the delivered analysis with one
//!   re-derived from the edges and returns [`AnalysisDrift`] findings that are
//!   only logged.

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

use super::analysis;
use super::{DependencyAnalysis, GraphData, GraphPayload};
use crate::model::TaskId;

/// Tolerance for comparing `avg_dependencies`.
const AVG_TOLERANCE: f64 = 1e-6;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Why the node/edge lists themselves are unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedReason {
    /// Two nodes share an id.
    DuplicateNode { id: TaskId },

    /// An edge endpoint names a node that is not in the payload.
    DanglingEdge {
        index: usize,
        from: TaskId,
        to: TaskId,
        missing: TaskId,
    },

    /// A node's execution time is negative or not a finite number.
    InvalidExecutionTime { id: TaskId, value: f64 },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::DuplicateNode { id } => {
                write!(f, "node id {} appears more than once", id)
            }

            MalformedReason::DanglingEdge {
                index,
                from,
                to,
                missing,
            } => write!(
                f,
                "edge #{} ({} -> {}) references unknown node {}",
                index, from, to, missing
            ),

            MalformedReason::InvalidExecutionTime { id, value } => {
                write!(f, "node {} has invalid execution time {}", id, value)
            }
        }
    }
}

/// Why the delivered analysis contradicts itself.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisInconsistency {
    /// `has_cycles` is set but a critical path was still reported.
    CyclicWithCriticalPath { len: usize },

    /// `has_cycles` is set but a topological order was still reported.
    CyclicWithTopologicalOrder { len: usize },

    /// `avg_dependencies` is negative or not a finite number.
    InvalidAverage { value: f64 },
}

impl fmt::Display for AnalysisInconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisInconsistency::CyclicWithCriticalPath { len } => write!(
                f,
                "has_cycles is true but critical_path has {} entries",
                len
            ),
            AnalysisInconsistency::CyclicWithTopologicalOrder { len } => write!(
                f,
                "has_cycles is true but topological_order has {} entries",
                len
            ),
            AnalysisInconsistency::InvalidAverage { value } => {
                write!(f, "avg_dependencies is {} (must be finite and >= 0)", value)
            }
        }
    }
}

/// Validation failure returned by [`validate()`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    #[error("malformed graph: {0}")]
    MalformedGraph(MalformedReason),

    #[error("inconsistent dependency analysis: {0}")]
    InconsistentAnalysis(AnalysisInconsistency),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Check `payload` before any render attempt.
///
/// Checks (in order, first failure wins):
/// 1. Node ids are unique.
/// 2. Node execution times are finite and `>= 0`.
/// 3. Every edge endpoint names an existing node.
/// 4. If an analysis is present: `has_cycles` ⇒ empty critical path and
///    empty topological order; `avg_dependencies` finite and `>= 0`.
///
/// # Errors
/// [`GraphError::MalformedGraph`] for 1–3,
/// [`GraphError::InconsistentAnalysis`] for 4.
pub fn validate(payload: &GraphPayload) -> Result<(), GraphError> {
    validate_structure(&payload.graph_data)?;
    if let Some(analysis) = &payload.dependency_analysis {
        validate_analysis(analysis)?;
    }
    Ok(())
}

fn validate_structure(graph: &GraphData) -> Result<(), GraphError> {
    let mut ids: HashSet<TaskId> = HashSet::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
        if !ids.insert(node.id) {
            return Err(GraphError::MalformedGraph(MalformedReason::DuplicateNode {
                id: node.id,
            }));
        }
        if !node.execution_time.is_finite() || node.execution_time < 0.0 {
            return Err(GraphError::MalformedGraph(
                MalformedReason::InvalidExecutionTime {
                    id: node.id,
                    value: node.execution_time,
                },
            ));
        }
    }

    for (index, edge) in graph.edges.iter().enumerate() {
        let missing = [edge.from, edge.to].into_iter().find(|id| !ids.contains(id));
        if let Some(missing) = missing {
            return Err(GraphError::MalformedGraph(MalformedReason::DanglingEdge {
                index,
                from: edge.from,
                to: edge.to,
                missing,
            }));
        }
    }
    Ok(())
}

fn validate_analysis(analysis: &DependencyAnalysis) -> Result<(), GraphError> {
    if analysis.has_cycles {
        if !analysis.critical_path.is_empty() {
            return Err(GraphError::InconsistentAnalysis(
                AnalysisInconsistency::CyclicWithCriticalPath {
                    len: analysis.critical_path.len(),
                },
            ));
        }
        if !analysis.topological_order.is_empty() {
            return Err(GraphError::InconsistentAnalysis(
                AnalysisInconsistency::CyclicWithTopologicalOrder {
                    len: analysis.topological_order.len(),
                },
            ));
        }
    }
    if !analysis.avg_dependencies.is_finite() || analysis.avg_dependencies < 0.0 {
        return Err(GraphError::InconsistentAnalysis(
            AnalysisInconsistency::InvalidAverage {
                value: analysis.avg_dependencies,
            },
        ));
    }
    Ok(())
}

// ── drift ─────────────────────────────────────────────────────────────────────

/// Disagreement between the delivered analysis and the edge list.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisDrift {
    /// A count or average differs from the re-derived value.
    Field {
        field: &'static str,
        reported: f64,
        derived: f64,
    },

    /// `has_cycles` differs from the re-derived flag.
    CycleFlag { reported: bool, derived: bool },

    /// Consecutive critical-path entries with no edge between them.
    CriticalPathBroken { from: TaskId, to: TaskId },

    /// An edge whose endpoints appear in the wrong order (or not at all) in
    /// the delivered topological order.
    TopologicalOrderViolated { from: TaskId, to: TaskId },
}

impl fmt::Display for AnalysisDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisDrift::Field {
                field,
                reported,
                derived,
            } => write!(f, "{} reported as {} but edges give {}", field, reported, derived),
            AnalysisDrift::CycleFlag { reported, derived } => write!(
                f,
                "has_cycles reported as {} but edges give {}",
                reported, derived
            ),
            AnalysisDrift::CriticalPathBroken { from, to } => {
                write!(f, "critical path step {} -> {} is not an edge", from, to)
            }
            AnalysisDrift::TopologicalOrderViolated { from, to } => write!(
                f,
                "topological order does not place {} before {}",
                from, to
            ),
        }
    }
}

/// Compare `reported` with the analysis re-derived from `graph`.
///
/// Only checks that do not depend on tie-breaking are made: counts, the
/// average, the cycle flag, that the critical path is a real chain, and that
/// a non-empty topological order respects every edge.
pub fn drift(graph: &GraphData, reported: &DependencyAnalysis) -> Vec<AnalysisDrift> {
    let derived = analysis::derive(graph);
    let mut findings = Vec::new();

    let counts = [
        ("total_tasks", reported.total_tasks, derived.total_tasks),
        (
            "tasks_with_dependencies",
            reported.tasks_with_dependencies,
            derived.tasks_with_dependencies,
        ),
        ("max_dependencies", reported.max_dependencies, derived.max_dependencies),
    ];
    for (field, r, d) in counts {
        if r != d {
            findings.push(AnalysisDrift::Field {
                field,
                reported: r as f64,
                derived: d as f64,
            });
        }
    }
    if (reported.avg_dependencies - derived.avg_dependencies).abs() > AVG_TOLERANCE {
        findings.push(AnalysisDrift::Field {
            field: "avg_dependencies",
            reported: reported.avg_dependencies,
            derived: derived.avg_dependencies,
        });
    }
    if reported.has_cycles != derived.has_cycles {
        findings.push(AnalysisDrift::CycleFlag {
            reported: reported.has_cycles,
            derived: derived.has_cycles,
        });
    }

    let g = analysis::build(graph);
    for step in reported.critical_path.windows(2) {
        if !g.contains_edge(step[0], step[1]) {
            findings.push(AnalysisDrift::CriticalPathBroken {
                from: step[0],
                to: step[1],
            });
        }
    }

    if !reported.topological_order.is_empty() {
        let position: HashMap<TaskId, usize> = reported
            .topological_order
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        for edge in &graph.edges {
            let ok = matches!(
                (position.get(&edge.from), position.get(&edge.to)),
                (Some(a), Some(b)) if a < b
            );
            if !ok {
                findings.push(AnalysisDrift::TopologicalOrderViolated {
                    from: edge.from,
                    to: edge.to,
                });
            }
        }
    }

    findings
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{graph, node};
    use crate::graph::GraphEdge;

    fn payload(g: GraphData, analysis: Option<DependencyAnalysis>) -> GraphPayload {
        GraphPayload::new(g, analysis)
    }

    fn chain() -> GraphData {
        graph(&[(1, 2.0), (2, 3.0), (3, 4.0)], &[(1, 2), (2, 3)])
    }

    // ── validate: structure ───────────────────────────────────────────────────

    #[test]
    fn well_formed_chain_passes() {
        let g = chain();
        let a = analysis::derive(&g);
        assert_eq!(validate(&payload(g, Some(a))), Ok(()));
    }

    #[test]
    fn edge_to_unknown_node_is_malformed() {
        let g = graph(&[(1, 1.0), (2, 1.0)], &[(1, 2), (2, 9)]);
        assert_eq!(
            validate(&payload(g, None)),
            Err(GraphError::MalformedGraph(MalformedReason::DanglingEdge {
                index: 1,
                from: 2,
                to: 9,
                missing: 9,
            }))
        );
    }

    #[test]
    fn edge_from_unknown_node_names_the_source() {
        let g = graph(&[(1, 1.0)], &[(5, 1)]);
        let err = validate(&payload(g, None)).unwrap_err();
        assert!(matches!(
            err,
            GraphError::MalformedGraph(MalformedReason::DanglingEdge { missing: 5, .. })
        ));
        assert_eq!(
            err.to_string(),
            "malformed graph: edge #0 (5 -> 1) references unknown node 5"
        );
    }

    #[test]
    fn duplicate_node_ids_are_malformed() {
        let g = graph(&[(1, 1.0), (2, 1.0), (1, 3.0)], &[]);
        assert_eq!(
            validate(&payload(g, None)),
            Err(GraphError::MalformedGraph(MalformedReason::DuplicateNode { id: 1 }))
        );
    }

    #[test]
    fn negative_execution_time_is_malformed() {
        let mut g = chain();
        g.nodes.push(node(4, -1.0));
        assert!(matches!(
            validate(&payload(g, None)),
            Err(GraphError::MalformedGraph(MalformedReason::InvalidExecutionTime { id: 4, .. }))
        ));
    }

    // ── validate: analysis ────────────────────────────────────────────────────

    #[test]
    fn cyclic_analysis_with_critical_path_is_inconsistent() {
        let a = DependencyAnalysis {
            has_cycles: true,
            critical_path: vec![1, 2],
            ..Default::default()
        };
        assert_eq!(
            validate(&payload(chain(), Some(a))),
            Err(GraphError::InconsistentAnalysis(
                AnalysisInconsistency::CyclicWithCriticalPath { len: 2 }
            ))
        );
    }

    #[test]
    fn cyclic_analysis_with_topological_order_is_inconsistent() {
        let a = DependencyAnalysis {
            has_cycles: true,
            topological_order: vec![1, 2, 3],
            ..Default::default()
        };
        assert!(matches!(
            validate(&payload(chain(), Some(a))),
            Err(GraphError::InconsistentAnalysis(
                AnalysisInconsistency::CyclicWithTopologicalOrder { len: 3 }
            ))
        ));
    }

    #[test]
    fn cyclic_analysis_with_empty_sequences_is_consistent() {
        let a = DependencyAnalysis {
            has_cycles: true,
            ..Default::default()
        };
        assert_eq!(validate(&payload(chain(), Some(a))), Ok(()));
    }

    #[test]
    fn negative_average_is_inconsistent() {
        let a = DependencyAnalysis {
            avg_dependencies: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            validate(&payload(chain(), Some(a))),
            Err(GraphError::InconsistentAnalysis(AnalysisInconsistency::InvalidAverage { .. }))
        ));
    }

    #[test]
    fn structural_errors_win_over_analysis_errors() {
        let g = graph(&[(1, 1.0)], &[(1, 2)]);
        let a = DependencyAnalysis {
            has_cycles: true,
            critical_path: vec![1],
            ..Default::default()
        };
        assert!(matches!(
            validate(&payload(g, Some(a))),
            Err(GraphError::MalformedGraph(_))
        ));
    }

    // ── drift ─────────────────────────────────────────────────────────────────

    #[test]
    fn derived_analysis_has_no_drift() {
        let g = chain();
        let a = analysis::derive(&g);
        assert!(drift(&g, &a).is_empty());
    }

    #[test]
    fn wrong_counts_are_reported() {
        let g = chain();
        let a = DependencyAnalysis {
            max_dependencies: 4,
            ..analysis::derive(&g)
        };
        assert_eq!(
            drift(&g, &a),
            vec![AnalysisDrift::Field {
                field: "max_dependencies",
                reported: 4.0,
                derived: 1.0,
            }]
        );
    }

    #[test]
    fn missed_cycle_is_reported() {
        let mut g = chain();
        g.edges.push(GraphEdge::new(3, 1));
        let a = DependencyAnalysis {
            has_cycles: false,
            ..analysis::derive(&g)
        };
        assert!(drift(&g, &a).contains(&AnalysisDrift::CycleFlag {
            reported: false,
            derived: true,
        }));
    }

    #[test]
    fn broken_critical_path_and_bad_order_are_reported() {
        let g = chain();
        let a = DependencyAnalysis {
            critical_path: vec![1, 3],
            topological_order: vec![2, 1, 3],
            ..analysis::derive(&g)
        };
        let findings = drift(&g, &a);
        assert!(findings.contains(&AnalysisDrift::CriticalPathBroken { from: 1, to: 3 }));
        assert!(findings.contains(&AnalysisDrift::TopologicalOrderViolated { from: 1, to: 2 }));
    }
}
