/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Plain-text reports.
//!
//! Each report is a pure function of already computed values and returns a
//! `String` ending in a newline.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use super::{currency, duration_ms, percent, ratio_percent, score};
use crate::complexity;
use crate::graph::{analysis, DependencyAnalysis, GraphPayload};
use crate::model::{AlgorithmCategory, AlgorithmResult, ScenarioResult, TaskId};
use crate::render::{DurationBand, RenderOutcome, RenderOutput};
use crate::scoring::Comparison;

// ── Comparison summary ────────────────────────────────────────────────────────

fn recommendation(winner: &AlgorithmResult, category: AlgorithmCategory) -> String {
    match category {
        AlgorithmCategory::Greedy => "Greedy algorithms are recommended for this scenario due to \
            their fast execution time and efficient profit optimization while meeting task deadlines."
            .to_string(),
        AlgorithmCategory::DynamicProgramming => "Dynamic Programming is recommended for this \
            scenario as it provides optimal resource allocation and maximizes profit through careful \
            task selection."
            .to_string(),
        AlgorithmCategory::Unknown => format!(
            "No category is recorded for {}; compare the breakdown below before choosing.",
            winner.name
        ),
    }
}

/// Winner, per-criterion insights, per-algorithm breakdown and a
/// recommendation based on the winner's category.
///
/// `categories` is consulted only for results without an explicit tag.
pub fn comparison_summary(
    scenario: &ScenarioResult,
    comparison: &Comparison<'_>,
    categories: &HashMap<String, AlgorithmCategory>,
) -> String {
    let total = scenario.total_tasks;
    let case = scenario.case_type;
    let winner = comparison.overall_winner;

    let mut out = String::new();
    let _ = writeln!(out, "Performance Summary: {}", case.display_name());
    let _ = writeln!(out);

    let _ = writeln!(out, "Best Performing Algorithm: {}", winner.name);
    let _ = writeln!(out, "  Profit:    {}", currency(winner.total_profit));
    let _ = writeln!(out, "  Completed: {}/{} tasks", winner.completed_tasks, total);
    let _ = writeln!(out, "  Speed:     {}", duration_ms(winner.execution_time_ms));
    let _ = writeln!(
        out,
        "For {} scenario with {}, {} achieves the best balance of profit generation, \
         task completion rate and execution efficiency.",
        case.display_name(),
        case.description(),
        winner.name
    );
    let _ = writeln!(out);

    let category = winner.resolve_category(categories);
    let _ = writeln!(out, "Recommendation ({})", category.display_name());
    let _ = writeln!(out, "  {}", recommendation(winner, category));
    let _ = writeln!(out);

    let _ = writeln!(out, "Key Performance Insights");
    let _ = writeln!(
        out,
        "  Best for Profit:      {} ({})",
        comparison.best_profit.name,
        currency(comparison.best_profit.total_profit)
    );
    let _ = writeln!(
        out,
        "  Best Completion Rate: {} ({}/{} tasks)",
        comparison.best_completion.name, comparison.best_completion.completed_tasks, total
    );
    let _ = writeln!(
        out,
        "  Fastest Execution:    {} ({})",
        comparison.fastest.name,
        duration_ms(comparison.fastest.execution_time_ms)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Algorithm Performance Breakdown");
    for s in &comparison.scores {
        let r = s.result;
        let badge = if comparison.is_winner(&r.name) {
            " [Best Overall]"
        } else {
            ""
        };
        let _ = writeln!(out, "  {}{}", r.name, badge);
        let _ = writeln!(
            out,
            "    Profit: {} | Completed: {}/{} | Utilization: {} | Speed: {}",
            currency(r.total_profit),
            r.completed_tasks,
            total,
            percent(r.peak_cpu()),
            duration_ms(r.execution_time_ms)
        );
    }

    if !comparison.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Data Quality Warnings");
        for w in &comparison.warnings {
            let _ = writeln!(out, "  - {w}");
        }
    }
    out
}

// ── Complexity report ─────────────────────────────────────────────────────────

/// Theoretical label, empirical runtime and derived scores per algorithm,
/// followed by the taxonomy reference.
pub fn complexity_report(scenario: &ScenarioResult, comparison: &Comparison<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Complexity Analysis");

    for s in &comparison.scores {
        let r = s.result;
        let info = complexity::lookup(&r.theoretical_complexity);
        let fastest = if r.name == comparison.fastest.name {
            " [fastest]"
        } else {
            ""
        };

        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", r.name);
        let _ = writeln!(
            out,
            "    Theoretical:       {} ({})",
            r.theoretical_complexity, info.description
        );
        let _ = writeln!(
            out,
            "    Empirical runtime: {}{}",
            duration_ms(r.execution_time_ms),
            fastest
        );
        let _ = writeln!(out, "    Efficiency score:  {}", score(s.efficiency));
        let _ = writeln!(out, "    Profit vs best:    {}", ratio_percent(s.profit_share));
        let _ = writeln!(
            out,
            "    Completion rate:   {}",
            ratio_percent(r.completion_rate(scenario.total_tasks))
        );
        let _ = writeln!(out, "    Explanation:       {}", info.explanation);
        let _ = writeln!(out, "    Best for:          {}", info.best_for);
        let _ = writeln!(out, "    Scalability:       {}", info.scalability);
    }

    let total = scenario.total_tasks;
    let _ = writeln!(out);
    let _ = writeln!(out, "Algorithm Comparison Summary");
    let _ = writeln!(
        out,
        "  Best for Profit:      {} ({})",
        comparison.best_profit.name,
        currency(comparison.best_profit.total_profit)
    );
    let _ = writeln!(
        out,
        "  Fastest Execution:    {} ({})",
        comparison.fastest.name,
        duration_ms(comparison.fastest.execution_time_ms)
    );
    match comparison.most_efficient {
        Some(r) => {
            let efficiency = comparison.score_of(&r.name).and_then(|s| s.efficiency);
            let _ = writeln!(
                out,
                "  Most Efficient:       {} ({})",
                r.name,
                score(efficiency)
            );
        }
        None => {
            let _ = writeln!(out, "  Most Efficient:       n/a (no usable execution time)");
        }
    }
    let _ = writeln!(
        out,
        "  Best Completion Rate: {} ({}/{} tasks)",
        comparison.best_completion.name, comparison.best_completion.completed_tasks, total
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Complexity Reference");
    for (label, info) in complexity::reference() {
        let _ = writeln!(out, "  {label:<18} {} - {}", info.tier, info.legend);
    }
    out
}

// ── Metrics dashboard ─────────────────────────────────────────────────────────

const CATEGORY_ORDER: [AlgorithmCategory; 3] = [
    AlgorithmCategory::Greedy,
    AlgorithmCategory::DynamicProgramming,
    AlgorithmCategory::Unknown,
];

/// Per-algorithm metrics grouped by category: greedy first, then dynamic
/// programming, then anything uncategorized. Empty groups are omitted.
pub fn metrics_report(
    scenario: &ScenarioResult,
    comparison: &Comparison<'_>,
    categories: &HashMap<String, AlgorithmCategory>,
) -> String {
    let total = scenario.total_tasks;
    let mut out = String::new();
    let _ = writeln!(out, "Metrics Dashboard: {}", scenario.case_type.display_name());

    for category in CATEGORY_ORDER {
        let members: Vec<_> = comparison
            .scores
            .iter()
            .filter(|s| s.result.resolve_category(categories) == category)
            .collect();
        if members.is_empty() {
            continue;
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", category.display_name());
        for s in members {
            let r = s.result;
            let _ = writeln!(out, "  {}", r.name);
            let _ = writeln!(
                out,
                "    Profit: {} | Completed: {}/{} | Rejected: {} | Peak CPU: {} | Speed: {}",
                currency(r.total_profit),
                r.completed_tasks,
                total,
                r.rejected_tasks,
                percent(r.peak_cpu()),
                duration_ms(r.execution_time_ms)
            );
        }
    }
    out
}

// ── Dependency report ─────────────────────────────────────────────────────────

fn task_list(ids: &[TaskId], separator: &str) -> String {
    ids.iter()
        .map(|id| format!("T{id}"))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Analysis figures, critical path and topological order, plus the band
/// legend.
///
/// The payload's own analysis is shown as delivered. Without one, the
/// analysis is derived from the edges and marked as such.
pub fn dependency_report(payload: &GraphPayload) -> String {
    let (a, source): (DependencyAnalysis, &str) = match &payload.dependency_analysis {
        Some(a) => (a.clone(), ""),
        None => (analysis::derive(&payload.graph_data), " (derived from edges)"),
    };

    let mut out = String::new();
    let _ = writeln!(out, "Dependency Analysis{source}");
    let _ = writeln!(out, "  Total tasks:             {}", a.total_tasks);
    let _ = writeln!(out, "  Tasks with dependencies: {}", a.tasks_with_dependencies);
    let _ = writeln!(out, "  Max dependencies:        {}", a.max_dependencies);
    let _ = writeln!(out, "  Avg dependencies:        {:.2}", a.avg_dependencies);
    let _ = writeln!(
        out,
        "  Has cycles:              {}",
        if a.has_cycles { "yes" } else { "no" }
    );

    if a.has_cycles {
        let _ = writeln!(out, "  Critical path:           n/a (graph has cycles)");
        let _ = writeln!(out, "  Topological order:       n/a (graph has cycles)");
    } else {
        if a.critical_path.is_empty() {
            let _ = writeln!(out, "  Critical path:           none");
        } else {
            let _ = writeln!(
                out,
                "  Critical path:           {} (length {})",
                task_list(&a.critical_path, " → "),
                a.critical_path_length
            );
        }
        let _ = writeln!(
            out,
            "  Topological order:       {}",
            task_list(&a.topological_order, ", ")
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Legend");
    for band in DurationBand::ALL {
        let _ = writeln!(out, "  {} {}", band.color(), band.legend());
    }
    out
}

/// The artifact of an interactive render, or the fallback grid.
pub fn graph_view(outcome: &RenderOutcome, columns: usize) -> String {
    match &outcome.output {
        RenderOutput::Interactive { artifact, .. } => {
            let mut out = artifact.clone();
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out
        }
        RenderOutput::Fallback { view, .. } => view.to_grid(columns),
    }
}

// ── Gantt ─────────────────────────────────────────────────────────────────────

/// Profit bucket of one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitTier {
    High,
    Medium,
    Low,
}

impl ProfitTier {
    /// `> 100` high, `> 50` medium, otherwise low.
    pub fn of(profit: f64) -> Self {
        if profit > 100.0 {
            ProfitTier::High
        } else if profit > 50.0 {
            ProfitTier::Medium
        } else {
            ProfitTier::Low
        }
    }
}

impl fmt::Display for ProfitTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProfitTier::High => "high",
            ProfitTier::Medium => "medium",
            ProfitTier::Low => "low",
        };
        f.write_str(s)
    }
}

/// Per algorithm, per VM, placements in start-time order.
pub fn gantt_report(scenario: &ScenarioResult) -> String {
    let mut out = String::new();
    for (i, (name, result)) in scenario.results.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "Schedule: {name}");
        let by_vm = result.schedule_by_vm();
        if by_vm.is_empty() {
            let _ = writeln!(out, "  (no tasks scheduled)");
            continue;
        }
        for (vm, tasks) in by_vm {
            let _ = writeln!(out, "  VM {vm}");
            for t in tasks {
                let _ = writeln!(
                    out,
                    "    T{:<4} [{}, {})  {} ({})",
                    t.task_id,
                    t.start_time,
                    t.end_time,
                    currency(t.profit),
                    ProfitTier::of(t.profit)
                );
            }
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InsightConfig;
    use crate::graph::tests::graph;
    use crate::model::{CaseType, ScheduledTask, UtilizationSample};
    use crate::render::{FallbackReason, FallbackView, RenderError, RenderState};
    use crate::scoring::compare;
    use indexmap::IndexMap;

    fn entry(profit: f64, completed: u32, time_ms: f64, complexity: &str) -> AlgorithmResult {
        AlgorithmResult {
            name: String::new(),
            total_profit: profit,
            completed_tasks: completed,
            rejected_tasks: 0,
            resource_utilization: vec![
                UtilizationSample {
                    cpu: 40.0,
                    ram: 30.0,
                    ..UtilizationSample::default()
                },
                UtilizationSample {
                    cpu: 75.0,
                    ram: 50.0,
                    ..UtilizationSample::default()
                },
            ],
            execution_time_ms: time_ms,
            theoretical_complexity: complexity.to_string(),
            schedule: vec![],
            category: None,
        }
    }

    /// Two algorithms: A has the profit, B the completion and speed.
    fn scenario() -> ScenarioResult {
        let mut results = IndexMap::new();
        results.insert(
            "Earliest Deadline First (EDF)".to_string(),
            entry(200.0, 8, 5.0, "O(n log n + n*m)"),
        );
        results.insert(
            "Knapsack-based DP".to_string(),
            entry(150.0, 10, 2.0, "O(n*C*R)"),
        );
        ScenarioResult {
            case_type: CaseType::Mixed,
            total_tasks: 10,
            results,
        }
    }

    #[test]
    fn summary_names_winner_and_insights() {
        let s = scenario();
        let list = s.ordered_results();
        let cmp = compare(&list).unwrap();
        let text = comparison_summary(&s, &cmp, &InsightConfig::default_categories());

        assert!(text.starts_with("Performance Summary: Mixed Case\n"));
        assert!(text.contains("Best Performing Algorithm: Knapsack-based DP\n"));
        assert!(text.contains("  Completed: 10/10 tasks\n"));
        assert!(text.contains("  Speed:     2.00ms\n"));
        assert!(text.contains("real-world mixed workload conditions"));
        assert!(text.contains("Best for Profit:      Earliest Deadline First (EDF) ($200)"));
        assert!(text.contains("Fastest Execution:    Knapsack-based DP (2.00ms)"));
        assert!(text.contains("  Knapsack-based DP [Best Overall]\n"));
        assert!(text.contains("Utilization: 75.0%"));
        assert!(!text.contains("Data Quality Warnings"));
    }

    #[test]
    fn recommendation_follows_winner_category() {
        let s = scenario();
        let list = s.ordered_results();
        let cmp = compare(&list).unwrap();

        let text = comparison_summary(&s, &cmp, &InsightConfig::default_categories());
        assert!(text.contains("Recommendation (Dynamic Programming)"));
        assert!(text.contains("Dynamic Programming is recommended"));

        let text = comparison_summary(&s, &cmp, &HashMap::new());
        assert!(text.contains("Recommendation (Uncategorized)"));
        assert!(text.contains("No category is recorded for Knapsack-based DP"));
    }

    #[test]
    fn summary_lists_data_quality_warnings() {
        let mut s = scenario();
        s.results[0].execution_time_ms = 0.0;
        let list = s.ordered_results();
        let cmp = compare(&list).unwrap();
        let text = comparison_summary(&s, &cmp, &HashMap::new());
        assert!(text.contains("Data Quality Warnings\n  - "));
    }

    #[test]
    fn summary_does_not_rescore() {
        let s = scenario();
        let list = s.ordered_results();
        let mut cmp = compare(&list).unwrap();
        // Whatever the comparison says is what gets printed.
        cmp.overall_winner = &list[0];
        let text = comparison_summary(&s, &cmp, &HashMap::new());
        assert!(text.contains("Best Performing Algorithm: Earliest Deadline First (EDF)\n"));
    }

    #[test]
    fn complexity_report_shows_taxonomy_and_scores() {
        let s = scenario();
        let list = s.ordered_results();
        let cmp = compare(&list).unwrap();
        let text = complexity_report(&s, &cmp);

        assert!(text.contains("Theoretical:       O(n log n + n*m) (Efficient polynomial time)"));
        assert!(text.contains("Empirical runtime: 2.00ms [fastest]"));
        assert!(text.contains("Profit vs best:    75.0%"));
        assert!(text.contains("Completion rate:   80.0%"));
        assert!(text.contains("Complexity Reference\n  O(n log n + n*m)"));
    }

    #[test]
    fn complexity_report_summarises_each_criterion() {
        let s = scenario();
        let list = s.ordered_results();
        let cmp = compare(&list).unwrap();
        let text = complexity_report(&s, &cmp);

        let expected = "Algorithm Comparison Summary\n\
                        \x20 Best for Profit:      Earliest Deadline First (EDF) ($200)\n\
                        \x20 Fastest Execution:    Knapsack-based DP (2.00ms)\n\
                        \x20 Most Efficient:       Knapsack-based DP (82.5)\n\
                        \x20 Best Completion Rate: Knapsack-based DP (10/10 tasks)\n";
        assert!(text.contains(expected));
    }

    #[test]
    fn complexity_report_without_usable_times_has_no_most_efficient() {
        let mut s = scenario();
        s.results[0].execution_time_ms = 0.0;
        s.results[1].execution_time_ms = f64::NAN;
        let list = s.ordered_results();
        let cmp = compare(&list).unwrap();
        assert!(cmp.most_efficient.is_none());

        let text = complexity_report(&s, &cmp);
        assert!(text.contains("  Most Efficient:       n/a (no usable execution time)\n"));
    }

    #[test]
    fn complexity_reference_carries_legends() {
        let s = scenario();
        let list = s.ordered_results();
        let cmp = compare(&list).unwrap();
        let text = complexity_report(&s, &cmp);

        assert!(text.contains("Efficient - Scales well with large inputs"));
        assert!(text.contains("O(n*T*C*R)"));
        assert!(text.contains("Expensive - Limited by time and resource constraints"));
        assert!(text.contains("Expensive - Limited by CPU and RAM constraints"));
    }

    #[test]
    fn metrics_report_groups_by_category() {
        let mut s = scenario();
        s.results
            .insert("Round Robin".to_string(), entry(90.0, 6, 1.0, "O(n)"));
        let list = s.ordered_results();
        let cmp = compare(&list).unwrap();
        let text = metrics_report(&s, &cmp, &InsightConfig::default_categories());

        assert!(text.starts_with("Metrics Dashboard: Mixed Case\n"));
        let greedy = text.find("\nGreedy Algorithms\n  Earliest Deadline First (EDF)\n").unwrap();
        let dp = text.find("\nDynamic Programming\n  Knapsack-based DP\n").unwrap();
        let other = text.find("\nUncategorized\n  Round Robin\n").unwrap();
        assert!(greedy < dp && dp < other);
        assert!(text.contains(
            "    Profit: $150 | Completed: 10/10 | Rejected: 0 | Peak CPU: 75.0% | Speed: 2.00ms\n"
        ));
    }

    #[test]
    fn metrics_report_skips_empty_categories() {
        let s = scenario();
        let list = s.ordered_results();
        let cmp = compare(&list).unwrap();
        let text = metrics_report(&s, &cmp, &HashMap::new());

        assert!(!text.contains("Greedy Algorithms"));
        assert!(!text.contains("Dynamic Programming"));
        assert!(text.contains("\nUncategorized\n  Earliest Deadline First (EDF)\n"));
    }

    #[test]
    fn unknown_complexity_label_is_not_available() {
        let mut s = scenario();
        s.results[0].theoretical_complexity = "O(2^n)".to_string();
        let list = s.ordered_results();
        let cmp = compare(&list).unwrap();
        let text = complexity_report(&s, &cmp);
        assert!(text.contains("O(2^n) (No description available)"));
    }

    #[test]
    fn dependency_report_prints_critical_path_with_arrows() {
        let g = graph(&[(1, 2.0), (2, 3.0), (3, 4.0)], &[(1, 2), (2, 3)]);
        let a = analysis::derive(&g);
        let text = dependency_report(&GraphPayload::new(g, Some(a)));

        assert!(text.starts_with("Dependency Analysis\n"));
        assert!(text.contains("Critical path:           T1 → T2 → T3 (length 9)"));
        assert!(text.contains("Topological order:       T1, T2, T3"));
        assert!(text.contains("Avg dependencies:        0.67"));
        assert!(text.contains("#FFA726 Medium Task (3-5 units)"));
    }

    #[test]
    fn dependency_report_shows_delivered_analysis_as_is() {
        let g = graph(&[(1, 1.0), (2, 1.0)], &[(1, 2)]);
        let delivered = DependencyAnalysis {
            total_tasks: 7,
            ..DependencyAnalysis::default()
        };
        let text = dependency_report(&GraphPayload::new(g, Some(delivered)));
        assert!(text.contains("Total tasks:             7"));
    }

    #[test]
    fn dependency_report_derives_missing_analysis() {
        let g = graph(&[(1, 1.0), (2, 1.0)], &[(1, 2), (2, 1)]);
        let text = dependency_report(&GraphPayload::new(g, None));
        assert!(text.starts_with("Dependency Analysis (derived from edges)\n"));
        assert!(text.contains("Has cycles:              yes"));
        assert!(text.contains("Critical path:           n/a (graph has cycles)"));
    }

    #[test]
    fn graph_view_prints_fallback_grid() {
        let g = graph(&[(1, 1.0), (2, 1.0)], &[(1, 2)]);
        let reason = FallbackReason::CapabilityUnavailable(RenderError::CapabilityUnavailable {
            reason: "none".to_string(),
        });
        let outcome = RenderOutcome {
            session: 1,
            transitions: vec![
                RenderState::Idle,
                RenderState::LoadingLibrary,
                RenderState::FallbackRendering,
                RenderState::FallbackRendered,
            ],
            output: RenderOutput::Fallback {
                view: FallbackView::build(&g).annotated(reason.to_string()),
                reason,
            },
        };
        let text = graph_view(&outcome, 3);
        assert!(text.starts_with("[interactive view unavailable: "));
        assert!(text.ends_with("T1: None | T2: T1\n"));
    }

    #[test]
    fn profit_tiers() {
        assert_eq!(ProfitTier::of(150.0), ProfitTier::High);
        assert_eq!(ProfitTier::of(100.0), ProfitTier::Medium);
        assert_eq!(ProfitTier::of(51.0), ProfitTier::Medium);
        assert_eq!(ProfitTier::of(50.0), ProfitTier::Low);
    }

    #[test]
    fn gantt_groups_by_vm_in_start_order() {
        let mut s = scenario();
        s.results[0].schedule = vec![
            ScheduledTask {
                task_id: 3,
                vm_id: 2,
                start_time: 4,
                end_time: 6,
                profit: 120.0,
            },
            ScheduledTask {
                task_id: 1,
                vm_id: 1,
                start_time: 0,
                end_time: 3,
                profit: 60.0,
            },
            ScheduledTask {
                task_id: 2,
                vm_id: 2,
                start_time: 0,
                end_time: 4,
                profit: 10.0,
            },
        ];
        let text = gantt_report(&s);
        let expected = "Schedule: Earliest Deadline First (EDF)\n\
                        \x20 VM 1\n\
                        \x20   T1    [0, 3)  $60 (medium)\n\
                        \x20 VM 2\n\
                        \x20   T2    [0, 4)  $10 (low)\n\
                        \x20   T3    [4, 6)  $120 (high)\n\
                        \n\
                        Schedule: Knapsack-based DP\n\
                        \x20 (no tasks scheduled)\n";
        assert_eq!(text, expected);
    }
}
