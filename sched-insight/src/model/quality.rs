/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Non-fatal data-quality findings.
//!
//! A warning never stops scoring or rendering. It is logged, carried in the
//! comparison output, and shown by the reports so upstream defects are
//! visible instead of silently smoothed over.

use std::fmt;

use super::{TaskId, VmId};

/// Upstream defect found in a scenario payload.
#[derive(Debug, Clone, PartialEq)]
pub enum DataQualityWarning {
    /// `execution_time_ms <= 0` (or non-finite). The entry is left out of
    /// every time ratio so no score can become infinite or NaN.
    NonPositiveExecutionTime { algorithm: String, value: f64 },

    /// `total_profit` is negative or non-finite.
    InvalidProfit { algorithm: String, value: f64 },

    /// An algorithm claims more completed tasks than the scenario contains.
    CompletedExceedsTotal {
        algorithm: String,
        completed: u32,
        total: u32,
    },

    /// A schedule entry ends before it starts.
    InvertedInterval {
        algorithm: String,
        task_id: TaskId,
        start: u64,
        end: u64,
    },

    /// Two tasks occupy the same VM over intersecting `[start, end)` windows.
    OverlappingSchedule {
        algorithm: String,
        vm_id: VmId,
        first: TaskId,
        second: TaskId,
    },
}

impl DataQualityWarning {
    /// Name of the algorithm the finding belongs to.
    pub fn algorithm(&self) -> &str {
        match self {
            DataQualityWarning::NonPositiveExecutionTime { algorithm, .. }
            | DataQualityWarning::InvalidProfit { algorithm, .. }
            | DataQualityWarning::CompletedExceedsTotal { algorithm, .. }
            | DataQualityWarning::InvertedInterval { algorithm, .. }
            | DataQualityWarning::OverlappingSchedule { algorithm, .. } => algorithm,
        }
    }
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityWarning::NonPositiveExecutionTime { algorithm, value } => write!(
                f,
                "'{}' reports execution time {}ms; excluded from speed ratios",
                algorithm, value
            ),

            DataQualityWarning::InvalidProfit { algorithm, value } => {
                write!(f, "'{}' reports invalid total profit {}", algorithm, value)
            }

            DataQualityWarning::CompletedExceedsTotal {
                algorithm,
                completed,
                total,
            } => write!(
                f,
                "'{}' completed {} tasks but the scenario only has {}",
                algorithm, completed, total
            ),

            DataQualityWarning::InvertedInterval {
                algorithm,
                task_id,
                start,
                end,
            } => write!(
                f,
                "'{}' schedules task {} from {} to {} (ends before it starts)",
                algorithm, task_id, start, end
            ),

            DataQualityWarning::OverlappingSchedule {
                algorithm,
                vm_id,
                first,
                second,
            } => write!(
                f,
                "'{}' overlaps tasks {} and {} on VM {}",
                algorithm, first, second, vm_id
            ),
        }
    }
}
