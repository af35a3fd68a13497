/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Renderer tunables and the algorithm category table.
//!
//! The expected YAML structure is:
//! ```yaml
//! renderer:
//!   load_timeout_ms: 5000
//!   fallback_columns: 3
//!   level_separation: 150
//!   node_spacing: 100
//! categories:
//!   "Earliest Deadline First (EDF)": greedy
//!   "Shortest Job First (SJF)": greedy
//!   "Knapsack-based DP": dynamic_programming
//! ```
//!
//! Every key is optional. Without a file the built-in defaults apply.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::model::AlgorithmCategory;

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Upper bound on the one-shot graph library load, in milliseconds.
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 5_000;

/// Cells per row in the fallback grid.
pub const DEFAULT_FALLBACK_COLUMNS: usize = 3;

/// Distance between dependency levels in the interactive layout (px).
pub const DEFAULT_LEVEL_SEPARATION: u32 = 150;

/// Distance between nodes on the same level (px).
pub const DEFAULT_NODE_SPACING: u32 = 100;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    renderer: RendererEntry,
    #[serde(default)]
    categories: HashMap<String, AlgorithmCategory>,
}

#[derive(Debug, Default, Deserialize)]
struct RendererEntry {
    load_timeout_ms: Option<u64>,
    fallback_columns: Option<usize>,
    level_separation: Option<u32>,
    node_spacing: Option<u32>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// Settings for the resilient graph renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    pub load_timeout_ms: u64,
    pub fallback_columns: usize,
    pub level_separation: u32,
    pub node_spacing: u32,
}

impl RendererConfig {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
            fallback_columns: DEFAULT_FALLBACK_COLUMNS,
            level_separation: DEFAULT_LEVEL_SEPARATION,
            node_spacing: DEFAULT_NODE_SPACING,
        }
    }
}

/// Everything read from the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    pub renderer: RendererConfig,

    /// Algorithm display name → category, for results that carry no explicit
    /// tag.
    pub categories: HashMap<String, AlgorithmCategory>,
}

impl InsightConfig {
    /// Category table for the three backends the comparison tool ships with.
    pub fn default_categories() -> HashMap<String, AlgorithmCategory> {
        HashMap::from([
            (
                "Earliest Deadline First (EDF)".to_string(),
                AlgorithmCategory::Greedy,
            ),
            (
                "Shortest Job First (SJF)".to_string(),
                AlgorithmCategory::Greedy,
            ),
            (
                "Knapsack-based DP".to_string(),
                AlgorithmCategory::DynamicProgramming,
            ),
        ])
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            renderer: RendererConfig::default(),
            categories: Self::default_categories(),
        }
    }
}

// ── ConfigManager ─────────────────────────────────────────────────────────────

/// Loads and holds the [`InsightConfig`].
#[derive(Debug, Default)]
pub struct ConfigManager {
    config: InsightConfig,

    /// Set to `true` after a successful [`load_from_file`](Self::load_from_file).
    loaded: bool,
}

impl ConfigManager {
    /// Creates a manager holding the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `path` and replaces the current configuration.
    ///
    /// * Missing renderer keys keep their defaults.
    /// * A non-empty `categories` table replaces the default table; an empty
    ///   or absent one keeps it.
    /// * A `fallback_columns` of `0` is corrected to `1`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if the YAML is
    /// structurally invalid. The previous configuration is reset to defaults
    /// in that case.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading configuration from: {}", path.display());

        self.config = InsightConfig::default();
        self.loaded = false;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        // An empty document deserializes as unit, not as a map.
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?
        };

        let defaults = RendererConfig::default();
        let mut renderer = RendererConfig {
            load_timeout_ms: file.renderer.load_timeout_ms.unwrap_or(defaults.load_timeout_ms),
            fallback_columns: file.renderer.fallback_columns.unwrap_or(defaults.fallback_columns),
            level_separation: file.renderer.level_separation.unwrap_or(defaults.level_separation),
            node_spacing: file.renderer.node_spacing.unwrap_or(defaults.node_spacing),
        };
        if renderer.fallback_columns == 0 {
            warn!("fallback_columns = 0 is not usable, using 1");
            renderer.fallback_columns = 1;
        }

        if file.categories.is_empty() {
            debug!("No categories in configuration file, keeping the default table");
        } else {
            self.config.categories = file.categories;
        }
        self.config.renderer = renderer;
        self.loaded = true;

        info!(
            load_timeout_ms = self.config.renderer.load_timeout_ms,
            fallback_columns = self.config.renderer.fallback_columns,
            categories = self.config.categories.len(),
            "Configuration loaded"
        );
        for (name, category) in &self.config.categories {
            debug!("  {} → {:?}", name, category);
        }

        Ok(())
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Returns `true` after a successful call to [`load_from_file`](Self::load_from_file).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
