/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Theoretical complexity taxonomy.
//!
//! Maps the closed set of complexity labels reported by the scheduling
//! backends to descriptive metadata for the complexity report.
//!
//! | Label | Class | Tier |
//! |---|---|---|
//! | `O(n log n + n*m)` | Efficient polynomial time | Efficient |
//! | `O(n*T*C*R)` | Pseudo-polynomial time | Expensive |
//! | `O(n*C*R)` | Pseudo-polynomial time | Expensive |
//!
//! The lookup is total: an unrecognised label yields the "not available"
//! markers rather than an error.

use std::fmt;

// ── Markers ───────────────────────────────────────────────────────────────────

pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_EXPLANATION: &str = "No explanation available";
pub const NO_BEST_FOR: &str = "No information available";
pub const NO_SCALABILITY: &str = "No scalability information available";
pub const NO_LEGEND: &str = "Not in the reference table";

// ── Types ─────────────────────────────────────────────────────────────────────

/// Coarse cost tier used by the Big-O reference legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostTier {
    /// Scales well with large inputs.
    Efficient,
    /// Limited by time and/or resource capacity.
    Expensive,
    Unknown,
}

impl fmt::Display for CostTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CostTier::Efficient => "Efficient",
            CostTier::Expensive => "Expensive",
            CostTier::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Descriptive metadata for one complexity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexityInfo {
    pub description: &'static str,
    pub explanation: &'static str,
    pub best_for: &'static str,
    pub scalability: &'static str,
    pub tier: CostTier,
    /// Short reason shown next to the tier in the reference legend.
    pub legend: &'static str,
}

impl ComplexityInfo {
    /// The entry returned for labels outside the taxonomy.
    pub const NOT_AVAILABLE: ComplexityInfo = ComplexityInfo {
        description: NO_DESCRIPTION,
        explanation: NO_EXPLANATION,
        best_for: NO_BEST_FOR,
        scalability: NO_SCALABILITY,
        tier: CostTier::Unknown,
        legend: NO_LEGEND,
    };

    /// `true` if this is the [`NOT_AVAILABLE`](Self::NOT_AVAILABLE) entry.
    pub fn is_available(&self) -> bool {
        self.tier != CostTier::Unknown
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

const TAXONOMY: &[(&str, ComplexityInfo)] = &[
    (
        "O(n log n + n*m)",
        ComplexityInfo {
            description: "Efficient polynomial time",
            explanation: "The algorithm sorts tasks (n log n) and then assigns them to VMs (n*m). \
                          Scales well with large inputs.",
            best_for: "Large datasets where sorting efficiency matters",
            scalability: "Excellent - handles thousands of tasks efficiently",
            tier: CostTier::Efficient,
            legend: "Scales well with large inputs",
        },
    ),
    (
        "O(n*T*C*R)",
        ComplexityInfo {
            description: "Pseudo-polynomial time",
            explanation: "Complexity depends on task count (n), time slots (T), CPU capacity (C), \
                          and RAM capacity (R). More comprehensive but computationally expensive \
                          for large inputs.",
            best_for: "Small to medium datasets where optimal solutions are required",
            scalability: "Moderate - becomes slow with hundreds of tasks or high resource constraints",
            tier: CostTier::Expensive,
            legend: "Limited by time and resource constraints",
        },
    ),
    (
        "O(n*C*R)",
        ComplexityInfo {
            description: "Pseudo-polynomial time",
            explanation: "Complexity depends on task count (n), CPU capacity (C), and RAM capacity (R). \
                          Optimizes resource allocation through dynamic programming table.",
            best_for: "Scenarios requiring optimal profit with resource constraints",
            scalability: "Limited by available CPU and RAM resources",
            tier: CostTier::Expensive,
            legend: "Limited by CPU and RAM constraints",
        },
    ),
];

/// Look up `label`. Surrounding whitespace is ignored; everything else must
/// match exactly.
pub fn lookup(label: &str) -> ComplexityInfo {
    let label = label.trim();
    TAXONOMY
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, info)| *info)
        .unwrap_or(ComplexityInfo::NOT_AVAILABLE)
}

/// Every known label with its metadata, in table order (legend rows).
pub fn reference() -> impl Iterator<Item = (&'static str, &'static ComplexityInfo)> {
    TAXONOMY.iter().map(|(label, info)| (*label, info))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
