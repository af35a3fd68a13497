/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Dependency listing used when the interactive graph cannot be shown.
//!
//! Built from `nodes` and `edges` alone, so it works for payloads that failed
//! validation or carry no analysis at all. Output is deterministic: entries
//! follow node order and predecessors follow edge order.
//!
//! ```text
//! T1 | Dependencies: None
//! T2 | Dependencies: T1
//! T3 | Dependencies: T1, T2
//! ```

use std::fmt::Write as _;

use crate::graph::{GraphData, GraphEdge};
use crate::model::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackEntry {
    pub id: TaskId,
    /// Direct predecessors in edge order, without duplicates.
    pub predecessors: Vec<TaskId>,
}

impl FallbackEntry {
    fn dependencies(&self) -> String {
        if self.predecessors.is_empty() {
            "None".to_string()
        } else {
            self.predecessors
                .iter()
                .map(|p| format!("T{p}"))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FallbackView {
    pub entries: Vec<FallbackEntry>,

    /// Edges pointing at a task that is not in the node list.
    pub unattached: Vec<GraphEdge>,

    /// Why the fallback is shown, printed above the listing.
    pub annotation: Option<String>,
}

impl FallbackView {
    pub fn build(graph: &GraphData) -> Self {
        let entries = graph
            .nodes
            .iter()
            .map(|n| FallbackEntry {
                id: n.id,
                predecessors: graph.predecessors(n.id),
            })
            .collect();

        let unattached = graph
            .edges
            .iter()
            .filter(|e| graph.node(e.to).is_none())
            .cloned()
            .collect();

        Self {
            entries,
            unattached,
            annotation: None,
        }
    }

    pub fn annotated(mut self, note: impl Into<String>) -> Self {
        self.annotation = Some(note.into());
        self
    }

    pub fn predecessors_of(&self, id: TaskId) -> Option<&[TaskId]> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.predecessors.as_slice())
    }

    /// One line per task.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(note) = &self.annotation {
            let _ = writeln!(out, "[{note}]");
        }
        for entry in &self.entries {
            let _ = writeln!(out, "T{} | Dependencies: {}", entry.id, entry.dependencies());
        }
        self.write_unattached(&mut out);
        out
    }

    /// Tasks laid out `columns` per row, cells padded to a common width.
    /// A `columns` of `0` is treated as `1`.
    pub fn to_grid(&self, columns: usize) -> String {
        let columns = columns.max(1);
        let cells: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("T{}: {}", e.id, e.dependencies()))
            .collect();
        let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        if let Some(note) = &self.annotation {
            let _ = writeln!(out, "[{note}]");
        }
        for row in cells.chunks(columns) {
            let line = row
                .iter()
                .map(|c| format!("{c:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ");
            let _ = writeln!(out, "{}", line.trim_end());
        }
        self.write_unattached(&mut out);
        out
    }

    fn write_unattached(&self, out: &mut String) {
        if self.unattached.is_empty() {
            return;
        }
        let _ = writeln!(out, "Unattached edges:");
        for e in &self.unattached {
            let _ = writeln!(out, "  T{} -> T{}", e.from, e.to);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::graph;

    #[test]
    fn chain_lists_direct_predecessors() {
        let g = graph(&[(1, 1.0), (2, 1.0), (3, 1.0)], &[(1, 2), (2, 3)]);
        let view = FallbackView::build(&g);
        assert_eq!(view.predecessors_of(1), Some(&[][..]));
        assert_eq!(view.predecessors_of(2), Some(&[1][..]));
        assert_eq!(view.predecessors_of(3), Some(&[2][..]));
        assert_eq!(
            view.to_text(),
            "T1 | Dependencies: None\nT2 | Dependencies: T1\nT3 | Dependencies: T2\n"
        );
    }

    #[test]
    fn predecessors_keep_edge_order() {
        let g = graph(&[(1, 1.0), (2, 1.0), (3, 1.0)], &[(2, 3), (1, 3), (2, 3)]);
        let view = FallbackView::build(&g);
        assert_eq!(view.predecessors_of(3), Some(&[2, 1][..]));
    }

    #[test]
    fn output_is_deterministic() {
        let g = graph(
            &[(4, 1.0), (2, 1.0), (9, 1.0)],
            &[(4, 9), (2, 9), (4, 2)],
        );
        let a = FallbackView::build(&g).to_text();
        let b = FallbackView::build(&g.clone()).to_text();
        assert_eq!(a, b);
        assert!(a.starts_with("T4 |"));
    }

    #[test]
    fn edges_to_unknown_tasks_are_listed_separately() {
        let g = graph(&[(1, 1.0), (2, 1.0)], &[(1, 2), (2, 7)]);
        let view = FallbackView::build(&g);
        assert_eq!(view.unattached.len(), 1);
        assert!(view.to_text().ends_with("Unattached edges:\n  T2 -> T7\n"));
    }

    #[test]
    fn annotation_heads_the_listing() {
        let g = graph(&[(1, 1.0)], &[]);
        let text = FallbackView::build(&g)
            .annotated("validation failed")
            .to_text();
        assert_eq!(text, "[validation failed]\nT1 | Dependencies: None\n");
    }

    #[test]
    fn grid_wraps_at_column_count() {
        let g = graph(
            &[(1, 1.0), (2, 1.0), (3, 1.0), (4, 1.0)],
            &[(1, 2)],
        );
        let grid = FallbackView::build(&g).to_grid(3);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "T1: None | T2: T1   | T3: None");
        assert_eq!(lines[1], "T4: None");
    }

    #[test]
    fn zero_columns_is_one_per_row() {
        let g = graph(&[(1, 1.0), (2, 1.0)], &[]);
        assert_eq!(FallbackView::build(&g).to_grid(0).lines().count(), 2);
    }

    #[test]
    fn empty_graph_renders_empty_listing() {
        assert_eq!(FallbackView::build(&GraphData::default()).to_text(), "");
    }
}
