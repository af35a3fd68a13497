/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Precondition failures of the comparative scoring engine.
//!
//! Data problems inside an otherwise usable list (a zero execution time, say)
//! are **not** errors; they are reported as
//! [`DataQualityWarning`](crate::model::DataQualityWarning)s on the
//! [`Comparison`](super::Comparison) and scoring carries on.

use thiserror::Error;

/// Top-level error type returned by [`compare()`](super::compare).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    /// `compare()` was called with an empty result list.
    #[error("no algorithm results to compare, result list is empty")]
    EmptyInput,

    /// Two entries share the same algorithm name, which is the ranking key.
    #[error("algorithm '{name}' appears more than once in the result list")]
    DuplicateAlgorithm { name: String },
}
