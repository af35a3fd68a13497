/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Failures of the interactive rendering path.
//!
//! None of these ever reach the caller of
//! [`GraphRenderer::submit()`](super::GraphRenderer::submit): each one is
//! absorbed and turned into a fallback view carrying the error as its reason.
//! The type is `Clone` because the library load outcome is cached and handed
//! to every later session.

use thiserror::Error;

use crate::model::TaskId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RenderError {
    /// The graph library could not be loaded.
    #[error("graph rendering capability unavailable: {reason}")]
    CapabilityUnavailable { reason: String },

    /// The graph library did not finish loading within the configured bound.
    #[error("graph library load did not complete within {timeout_ms}ms")]
    LoadTimedOut { timeout_ms: u64 },

    /// A node's execution time cannot be turned into a visual weight.
    #[error("node {id} has unusable execution time {value}")]
    InvalidNodeWeight { id: TaskId, value: f64 },

    /// The loaded library failed while drawing the view.
    #[error("graph library failed to draw: {reason}")]
    Draw { reason: String },
}
