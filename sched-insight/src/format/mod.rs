/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Text presentation of comparison and graph results.
//!
//! Formatters only read what [`scoring`](crate::scoring) and
//! [`render`](crate::render) produced. Nothing here ranks or scores.
//!
//! | Quantity | Format | Example |
//! |---|---|---|
//! | currency | whole dollars | `$200` |
//! | percentage | one decimal | `87.5%` |
//! | duration | two decimals | `5.00ms` |

pub mod report;

pub use report::{
    comparison_summary, complexity_report, dependency_report, gantt_report, graph_view,
    metrics_report, ProfitTier,
};

const NOT_AVAILABLE: &str = "n/a";

/// Whole-dollar amount, e.g. `$200` or `-$15`.
pub fn currency(amount: f64) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = amount.round();
    if rounded < 0.0 {
        format!("-${:.0}", -rounded)
    } else {
        // -0.4 rounds to -0.0, which would print as "$-0"
        format!("${:.0}", rounded.abs())
    }
}

/// `value` (already in percent) to one decimal, e.g. `87.5%`.
pub fn percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}%")
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Fraction in `[0, 1]` as a percentage, e.g. `0.875` → `87.5%`.
pub fn ratio_percent(ratio: f64) -> String {
    percent(ratio * 100.0)
}

/// Milliseconds to two decimals, e.g. `5.00ms`.
pub fn duration_ms(ms: f64) -> String {
    if ms.is_finite() {
        format!("{ms:.2}ms")
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Efficiency score to one decimal, `n/a` for flagged entries.
pub fn score(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
