/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Graphviz DOT backend.
//!
//! Turns a [`NetworkView`] into a `digraph` that `dot -Tsvg` lays out the way
//! the interactive view describes it: left-to-right ranks, one rank per
//! dependency level, band colours and sizes on the nodes.
//!
//! Pixel distances are converted to inches at 72 px per inch.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;

use super::{GraphLibrary, LayoutDirection, LibraryLoader, NetworkView, RenderError};

const PX_PER_INCH: f64 = 72.0;

/// Loader for [`DotLibrary`]; never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DotLoader;

#[async_trait]
impl LibraryLoader for DotLoader {
    async fn load(&self) -> Result<Arc<dyn GraphLibrary>, RenderError> {
        Ok(Arc::new(DotLibrary))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DotLibrary;

impl GraphLibrary for DotLibrary {
    fn name(&self) -> &str {
        "graphviz-dot"
    }

    fn draw(&self, view: &NetworkView) -> Result<String, RenderError> {
        write_dot(view).map_err(|e| RenderError::Draw {
            reason: e.to_string(),
        })
    }
}

fn write_dot(view: &NetworkView) -> Result<String, std::fmt::Error> {
    let rankdir = match view.layout.direction {
        LayoutDirection::LeftToRight => "LR",
    };

    let mut out = String::new();
    writeln!(out, "digraph tasks {{")?;
    writeln!(out, "    rankdir={rankdir};")?;
    writeln!(
        out,
        "    ranksep={:.2};",
        f64::from(view.layout.level_separation) / PX_PER_INCH
    )?;
    writeln!(
        out,
        "    nodesep={:.2};",
        f64::from(view.layout.node_spacing) / PX_PER_INCH
    )?;
    writeln!(
        out,
        "    node [shape=circle, style=filled, fixedsize=true, fontcolor=white];"
    )?;

    for ids in view.levels().values() {
        let members = ids
            .iter()
            .map(|id| format!("\"{id}\";"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "    {{ rank=same; {members} }}")?;
    }

    for n in &view.nodes {
        writeln!(
            out,
            "    \"{}\" [label=\"{}\", tooltip=\"{}\", fillcolor=\"{}\", width={:.2}];",
            n.id,
            escape(&n.label),
            escape(&n.tooltip),
            n.color,
            n.size / PX_PER_INCH
        )?;
    }

    for e in &view.edges {
        writeln!(
            out,
            "    \"{}\" -> \"{}\" [color=\"{}\", penwidth={}, arrowhead=normal];",
            e.from, e.to, e.color, e.width
        )?;
    }

    writeln!(out, "}}")?;
    Ok(out)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
