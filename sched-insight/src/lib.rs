/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! sched-insight – analytics and graph rendering for scheduling comparisons
//!
//! Consumes the results of several task-scheduling backends run on the same
//! scenario, ranks them, and renders the scenario's task dependency graph.
//!
//! ```text
//! lib.rs
//! ├── model/       – scenario and per-algorithm result types, data quality
//! ├── complexity   – theoretical complexity label taxonomy
//! ├── scoring/     – per-criterion bests, efficiency and overall winner
//! ├── graph/       – DAG payload, validation, analysis re-derivation
//! ├── render/      – resilient renderer: library cache, views, fallback
//! ├── format/      – plain-text reports
//! └── config/      – YAML renderer settings and category table
//! ```

pub mod complexity;
pub mod config;
pub mod format;
pub mod graph;
pub mod model;
pub mod render;
pub mod scoring;
