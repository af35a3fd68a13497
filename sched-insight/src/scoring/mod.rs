/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Comparative scoring of scheduling algorithm results.
//!
//! [`compare()`] turns an ordered list of [`AlgorithmResult`]s into
//! per-criterion bests, an efficiency score per entry, and a weighted overall
//! winner.
//!
//! # Formulas
//!
//! | Output | Definition |
//! |---|---|
//! | efficiency | `(profit / best_profit × 0.7 + min_time / time × 0.3) × 100` |
//! | composite | `profit / best_profit × 0.5 + completed / best_completed × 0.3 + fastest_time / time × 0.2` |
//!
//! The composite is a heuristic linear weighting, not a Pareto ranking. Two
//! algorithms that trade profit for speed can swap places under different
//! weights; that is accepted.
//!
//! # Determinism
//! Every argmax/argmin keeps the **first** entry on ties, so the outcome
//! depends only on the list order, which [`ScenarioResult::ordered_results`]
//! fixes to payload order.
//!
//! # Degenerate inputs
//! * `execution_time_ms <= 0` (or NaN/∞): the entry is left out of every time
//!   ratio (its speed term is `0`), it has no efficiency score, and a
//!   [`DataQualityWarning::NonPositiveExecutionTime`] is recorded.
//! * `best_profit == 0` or `best_completed == 0`: every entry ties at the
//!   best, so the corresponding ratio is `1.0` for all of them.
//!
//! [`ScenarioResult::ordered_results`]: crate::model::ScenarioResult::ordered_results

pub mod error;

pub use error::ScoringError;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::model::{AlgorithmResult, DataQualityWarning};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Profit weight inside the efficiency score.
pub const EFFICIENCY_PROFIT_WEIGHT: f64 = 0.7;
/// Speed weight inside the efficiency score.
pub const EFFICIENCY_SPEED_WEIGHT: f64 = 0.3;

/// Profit weight inside the overall-winner composite.
pub const COMPOSITE_PROFIT_WEIGHT: f64 = 0.5;
/// Completion weight inside the overall-winner composite.
pub const COMPOSITE_COMPLETION_WEIGHT: f64 = 0.3;
/// Speed weight inside the overall-winner composite.
pub const COMPOSITE_SPEED_WEIGHT: f64 = 0.2;

// ── Output types ──────────────────────────────────────────────────────────────

/// Scores computed for one entry of the input list.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryScore<'a> {
    pub result: &'a AlgorithmResult,

    /// Efficiency score in `[0, 100]`. `None` when the entry's execution time
    /// is unusable.
    pub efficiency: Option<f64>,

    /// Overall-winner composite in `[0, 1]`.
    pub composite: f64,

    /// `total_profit / best_profit` in `[0, 1]`.
    pub profit_share: f64,
}

/// Result of one comparison run. Borrows the input list; nothing is copied or
/// mutated.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    pub best_profit: &'a AlgorithmResult,
    pub best_completion: &'a AlgorithmResult,
    pub fastest: &'a AlgorithmResult,
    pub overall_winner: &'a AlgorithmResult,

    /// Highest efficiency score; `None` only if no entry has a usable time.
    pub most_efficient: Option<&'a AlgorithmResult>,

    /// One score per input entry, in input order.
    pub scores: Vec<EntryScore<'a>>,

    pub warnings: Vec<DataQualityWarning>,
}

impl<'a> Comparison<'a> {
    /// Look up the scores for `algorithm`.
    pub fn score_of(&self, algorithm: &str) -> Option<&EntryScore<'a>> {
        self.scores.iter().find(|s| s.result.name == algorithm)
    }

    /// `true` if `algorithm` is the overall winner.
    pub fn is_winner(&self, algorithm: &str) -> bool {
        self.overall_winner.name == algorithm
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Rank `results` and compute efficiency scores.
///
/// # Errors
/// * [`ScoringError::EmptyInput`] – `results` is empty.
/// * [`ScoringError::DuplicateAlgorithm`] – two entries share a name.
pub fn compare(results: &[AlgorithmResult]) -> Result<Comparison<'_>, ScoringError> {
    let first = results.first().ok_or(ScoringError::EmptyInput)?;

    let mut seen = HashSet::with_capacity(results.len());
    for r in results {
        if !seen.insert(r.name.as_str()) {
            return Err(ScoringError::DuplicateAlgorithm {
                name: r.name.clone(),
            });
        }
    }

    // ── Data quality ──────────────────────────────────────────────────────────
    let mut warnings = Vec::new();
    for r in results.iter().filter(|r| !has_usable_time(r)) {
        warn!(
            algorithm = %r.name,
            execution_time_ms = r.execution_time_ms,
            "execution time is not positive, entry excluded from speed ratios"
        );
        warnings.push(DataQualityWarning::NonPositiveExecutionTime {
            algorithm: r.name.clone(),
            value: r.execution_time_ms,
        });
    }

    // ── Per-criterion bests ───────────────────────────────────────────────────
    let best_profit = first_max_by(results, |r| profit_of(r)).unwrap_or(first);
    let best_completion = first_max_by(results, |r| r.completed_tasks as f64).unwrap_or(first);

    // Fastest among usable times. If no entry has one, fall back to the first
    // entry and let every speed term be zero.
    let fastest_valid = results
        .iter()
        .filter(|r| has_usable_time(r))
        .fold(None::<&AlgorithmResult>, |best, r| match best {
            Some(b) if r.execution_time_ms >= b.execution_time_ms => Some(b),
            _ => Some(r),
        });
    let fastest = fastest_valid.unwrap_or(first);
    let min_time = fastest_valid.map(|r| r.execution_time_ms);

    debug!(
        best_profit = %best_profit.name,
        best_completion = %best_completion.name,
        fastest = %fastest.name,
        "per-criterion bests"
    );

    // ── Scores ────────────────────────────────────────────────────────────────
    let scores: Vec<EntryScore<'_>> = results
        .iter()
        .map(|r| {
            let profit_share = ratio_to_best(profit_of(r), profit_of(best_profit));
            let completion_share =
                ratio_to_best(r.completed_tasks as f64, best_completion.completed_tasks as f64);
            let speed = speed_ratio(min_time, r);

            let efficiency = speed.map(|s| {
                (profit_share * EFFICIENCY_PROFIT_WEIGHT + s * EFFICIENCY_SPEED_WEIGHT) * 100.0
            });
            let composite = profit_share * COMPOSITE_PROFIT_WEIGHT
                + completion_share * COMPOSITE_COMPLETION_WEIGHT
                + speed.unwrap_or(0.0) * COMPOSITE_SPEED_WEIGHT;

            debug!(
                algorithm = %r.name,
                efficiency = ?efficiency,
                composite,
                "scored"
            );

            EntryScore {
                result: r,
                efficiency,
                composite,
                profit_share,
            }
        })
        .collect();

    // ── Winners ───────────────────────────────────────────────────────────────
    let overall_winner = first_max_by(&scores, |s| s.composite)
        .map(|s| s.result)
        .unwrap_or(first);

    let most_efficient = scores
        .iter()
        .filter(|s| s.efficiency.is_some())
        .fold(None::<&EntryScore<'_>>, |best, s| match best {
            Some(b) if s.efficiency <= b.efficiency => Some(b),
            _ => Some(s),
        })
        .map(|s| s.result);

    info!(
        winner = %overall_winner.name,
        entries = results.len(),
        warnings = warnings.len(),
        "comparison complete"
    );

    Ok(Comparison {
        best_profit,
        best_completion,
        fastest,
        overall_winner,
        most_efficient,
        scores,
        warnings,
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn has_usable_time(r: &AlgorithmResult) -> bool {
    r.execution_time_ms.is_finite() && r.execution_time_ms > 0.0
}

/// Profit with negative and non-finite values clamped to zero.
fn profit_of(r: &AlgorithmResult) -> f64 {
    if r.total_profit.is_finite() {
        r.total_profit.max(0.0)
    } else {
        0.0
    }
}

/// `value / best`, with `1.0` when `best` is zero (all entries tie at zero).
fn ratio_to_best(value: f64, best: f64) -> f64 {
    if best > 0.0 {
        (value / best).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// `min_time / time`, or `None` when either side is unusable.
fn speed_ratio(min_time: Option<f64>, r: &AlgorithmResult) -> Option<f64> {
    let min = min_time?;
    has_usable_time(r).then(|| min / r.execution_time_ms)
}

/// Strictly-greatest `key`, first occurrence wins ties.
fn first_max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let k = key(item);
        match best {
            Some((_, bk)) if k <= bk => {}
            _ => best = Some((item, k)),
        }
    }
    best.map(|(item, _)| item)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
