/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use sched_insight::config::ConfigManager;
use sched_insight::format;
use sched_insight::graph::GraphPayload;
use sched_insight::model::ScenarioResult;
use sched_insight::render::dot::DotLoader;
use sched_insight::render::{GraphRenderer, LibraryCache, LibraryLoader, NoLibrary};
use sched_insight::scoring;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Report on one scheduling scenario.
///
/// Example:
///   sched-insight --scenario results_mixed.json --graph graph_mixed.json --dot
#[derive(Debug, Parser)]
#[command(
    name = "sched-insight",
    about = "Compare scheduling algorithm results and render the task dependency graph",
    long_about = None,
)]
struct Cli {
    /// Scenario result JSON (case_type, total_tasks, results).
    #[arg(short = 's', long = "scenario")]
    scenario: PathBuf,

    /// Dependency graph JSON (graph_data, dependency_analysis).
    #[arg(short = 'g', long = "graph")]
    graph: Option<PathBuf>,

    /// Path to the YAML renderer / category configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Render the graph as Graphviz DOT instead of the text listing.
    #[arg(long = "dot", default_value_t = false)]
    dot: bool,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(
        scenario = %cli.scenario.display(),
        graph    = ?cli.graph,
        config   = ?cli.config,
        dot      = cli.dot,
        "sched-insight starting"
    );

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // ── Configuration ─────────────────────────────────────────────────────────
    let mut config_manager = ConfigManager::new();
    match &cli.config {
        Some(path) => config_manager.load_from_file(path)?,
        None => warn!("No configuration file provided, using default renderer settings"),
    }
    let config = config_manager.config();

    // ── Scenario comparison ───────────────────────────────────────────────────
    let scenario: ScenarioResult = read_json(&cli.scenario)?;
    scenario.check()?;

    for w in scenario.data_quality() {
        warn!(algorithm = %w.algorithm(), "{}", w);
    }

    let results = scenario.ordered_results();
    let comparison = scoring::compare(&results)?;

    print!(
        "{}",
        format::comparison_summary(&scenario, &comparison, &config.categories)
    );
    println!();
    print!(
        "{}",
        format::metrics_report(&scenario, &comparison, &config.categories)
    );
    println!();
    print!("{}", format::complexity_report(&scenario, &comparison));
    println!();
    print!("{}", format::gantt_report(&scenario));

    // ── Dependency graph ──────────────────────────────────────────────────────
    let Some(graph_path) = &cli.graph else {
        return Ok(());
    };
    let payload: GraphPayload = read_json(graph_path)?;

    println!();
    print!("{}", format::dependency_report(&payload));

    let loader: Arc<dyn LibraryLoader> = if cli.dot {
        Arc::new(DotLoader)
    } else {
        Arc::new(NoLibrary)
    };
    let cache = Arc::new(LibraryCache::new(loader, config.renderer.load_timeout()));
    let renderer = GraphRenderer::new(cache, config.renderer.clone());

    if let Some(outcome) = renderer.submit(payload).await {
        println!();
        print!(
            "{}",
            format::graph_view(&outcome, config.renderer.fallback_columns)
        );
    }
    Ok(())
}
