/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Library-independent description of the interactive graph.
//!
//! [`NetworkView`] is what a [`GraphLibrary`](super::GraphLibrary) draws.
//! Building it is pure; drawing it is the library's business.
//!
//! # Visual contract
//! * Node colour and size depend on `execution_time` only:
//!
//!   | Band | Range | Colour |
//!   |---|---|---|
//!   | Short | `< 3` | `#4CAF50` |
//!   | Medium | `3 ..= 5` | `#FFA726` |
//!   | Long | `> 5` | `#FF6B6B` |
//!
//!   Size is `20 + 2 × execution_time`.
//! * Edges are directed, arrowhead on the dependent task (`to`).
//! * Layout is hierarchical left-to-right: a node's column is the length of
//!   its longest chain of predecessors, so every edge of an acyclic graph
//!   points rightwards.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::RendererConfig;
use crate::format;
use crate::graph::analysis::depth_levels;
use crate::graph::GraphData;
use crate::model::TaskId;

use super::RenderError;

// ── Constants ─────────────────────────────────────────────────────────────────

pub const EDGE_COLOR: &str = "#667eea";
pub const EDGE_WIDTH: u32 = 2;

const BASE_NODE_SIZE: f64 = 20.0;
const NODE_SIZE_PER_UNIT: f64 = 2.0;

/// Upper bound (exclusive) of the short band.
const SHORT_BELOW: f64 = 3.0;
/// Upper bound (inclusive) of the medium band.
const MEDIUM_UP_TO: f64 = 5.0;

// ── Duration bands ────────────────────────────────────────────────────────────

/// Ordered execution-time bands driving node colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DurationBand {
    Short,
    Medium,
    Long,
}

impl DurationBand {
    pub const ALL: [DurationBand; 3] = [DurationBand::Short, DurationBand::Medium, DurationBand::Long];

    pub fn of(execution_time: f64) -> Self {
        if execution_time < SHORT_BELOW {
            DurationBand::Short
        } else if execution_time <= MEDIUM_UP_TO {
            DurationBand::Medium
        } else {
            DurationBand::Long
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            DurationBand::Short => "#4CAF50",
            DurationBand::Medium => "#FFA726",
            DurationBand::Long => "#FF6B6B",
        }
    }

    /// Legend text, e.g. `"Short Task (< 3 units)"`.
    pub fn legend(self) -> &'static str {
        match self {
            DurationBand::Short => "Short Task (< 3 units)",
            DurationBand::Medium => "Medium Task (3-5 units)",
            DurationBand::Long => "Long Task (> 5 units)",
        }
    }
}

impl fmt::Display for DurationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DurationBand::Short => "short",
            DurationBand::Medium => "medium",
            DurationBand::Long => "long",
        };
        f.write_str(s)
    }
}

/// Node diameter for `execution_time`.
pub fn node_size(execution_time: f64) -> f64 {
    BASE_NODE_SIZE + execution_time * NODE_SIZE_PER_UNIT
}

// ── View types ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    pub id: TaskId,
    pub label: String,
    pub tooltip: String,
    pub band: DurationBand,
    pub color: &'static str,
    pub size: f64,
    /// Layout column (longest predecessor chain).
    pub level: usize,
}

/// Directed edge; the arrowhead is drawn at `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualEdge {
    pub from: TaskId,
    pub to: TaskId,
    pub color: &'static str,
    pub width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirection {
    LeftToRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchicalLayout {
    pub direction: LayoutDirection,
    pub level_separation: u32,
    pub node_spacing: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkView {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
    pub layout: HierarchicalLayout,
}

impl NetworkView {
    /// Build the view for `graph`.
    ///
    /// # Errors
    /// [`RenderError::InvalidNodeWeight`] if a node's execution time is
    /// negative or not finite.
    pub fn build(graph: &GraphData, config: &RendererConfig) -> Result<Self, RenderError> {
        let levels = depth_levels(graph);

        let nodes = graph
            .nodes
            .iter()
            .map(|n| {
                if !n.execution_time.is_finite() || n.execution_time < 0.0 {
                    return Err(RenderError::InvalidNodeWeight {
                        id: n.id,
                        value: n.execution_time,
                    });
                }
                let band = DurationBand::of(n.execution_time);
                Ok(VisualNode {
                    id: n.id,
                    label: n.display_label(),
                    tooltip: format!(
                        "Task {}\nExec Time: {} units\nProfit: {}\nCPU: {} cores\nRAM: {} GB",
                        n.id,
                        n.execution_time,
                        format::currency(n.profit),
                        n.cpu,
                        n.ram
                    ),
                    band,
                    color: band.color(),
                    size: node_size(n.execution_time),
                    level: levels.get(&n.id).copied().unwrap_or(0),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let edges = graph
            .edges
            .iter()
            .map(|e| VisualEdge {
                from: e.from,
                to: e.to,
                color: EDGE_COLOR,
                width: EDGE_WIDTH,
            })
            .collect();

        Ok(Self {
            nodes,
            edges,
            layout: HierarchicalLayout {
                direction: LayoutDirection::LeftToRight,
                level_separation: config.level_separation,
                node_spacing: config.node_spacing,
            },
        })
    }

    pub fn node(&self, id: TaskId) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Node ids grouped by layout column, each column in node order.
    pub fn levels(&self) -> BTreeMap<usize, Vec<TaskId>> {
        let mut by_level: BTreeMap<usize, Vec<TaskId>> = BTreeMap::new();
        for n in &self.nodes {
            by_level.entry(n.level).or_default().push(n.id);
        }
        by_level
    }

    /// Canvas position of `id`: `x` grows with the level, `y` with the slot
    /// inside the level.
    pub fn position(&self, id: TaskId) -> Option<(f64, f64)> {
        let node = self.node(id)?;
        let slot = self
            .nodes
            .iter()
            .filter(|n| n.level == node.level)
            .position(|n| n.id == id)?;
        Some((
            node.level as f64 * self.layout.level_separation as f64,
            slot as f64 * self.layout.node_spacing as f64,
        ))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
