/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Scenario result data structures.
//!
//! The scheduling backends are run elsewhere; this module only models what
//! they hand back for one scenario:
//!
//! ```text
//! ScenarioResult ──(ordered_results)──►  Vec<AlgorithmResult>  ──►  scoring / format
//!   results: name → metrics               stable insertion order
//! ```
//!
//! # Ownership model
//! A `ScenarioResult` is replaced wholesale when a new scenario is selected.
//! Nothing in the crate mutates one in place; every consumer borrows.

pub mod quality;

pub use quality::DataQualityWarning;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Task identifier as produced by the scheduling backend.
pub type TaskId = u32;

/// Virtual machine identifier as produced by the scheduling backend.
pub type VmId = u32;

// ── Scenario case ─────────────────────────────────────────────────────────────

/// Workload configuration a scenario was run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    Best,
    Worst,
    Mixed,
}

impl CaseType {
    /// Heading used by the summary report, e.g. `"Best Case"`.
    pub fn display_name(self) -> &'static str {
        match self {
            CaseType::Best => "Best Case",
            CaseType::Worst => "Worst Case",
            CaseType::Mixed => "Mixed Case",
        }
    }

    /// One-line description of the workload conditions.
    pub fn description(self) -> &'static str {
        match self {
            CaseType::Best => "optimized conditions with lightweight tasks",
            CaseType::Worst => "challenging conditions with resource-intensive tasks",
            CaseType::Mixed => "real-world mixed workload conditions",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CaseType::Best => "best",
            CaseType::Worst => "worst",
            CaseType::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

// ── Algorithm category ────────────────────────────────────────────────────────

/// Family an algorithm belongs to.
///
/// Carried explicitly on the result or looked up in the configured category
/// table. Display names are never pattern-matched to guess it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmCategory {
    Greedy,
    DynamicProgramming,
    #[default]
    Unknown,
}

impl AlgorithmCategory {
    pub fn display_name(self) -> &'static str {
        match self {
            AlgorithmCategory::Greedy => "Greedy Algorithms",
            AlgorithmCategory::DynamicProgramming => "Dynamic Programming",
            AlgorithmCategory::Unknown => "Uncategorized",
        }
    }
}

// ── Per-algorithm metrics ─────────────────────────────────────────────────────

/// One resource utilisation sample taken over the simulated timeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UtilizationSample {
    /// Time slot of the sample, when the backend reports it.
    #[serde(default)]
    pub time: Option<u64>,
    /// CPU utilisation in percent.
    pub cpu: f64,
    /// RAM utilisation in percent.
    pub ram: f64,
    /// Average of `cpu` and `ram`, when the backend reports it.
    #[serde(default)]
    pub avg: Option<f64>,
}

/// One task placement in an algorithm's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub task_id: TaskId,
    pub vm_id: VmId,
    pub start_time: u64,
    pub end_time: u64,
    pub profit: f64,
}

impl ScheduledTask {
    /// Half-open interval length; `0` when the interval is inverted.
    pub fn duration(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// `true` if `[start, end)` of the two placements intersect.
    pub fn overlaps(&self, other: &ScheduledTask) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

/// Metrics reported by one scheduling algorithm for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Unique key. Taken from the results mapping key by
    /// [`ScenarioResult::ordered_results`]; the backend's own
    /// `algorithm_name` field is only used when the key is absent.
    #[serde(default, rename = "algorithm_name")]
    pub name: String,

    pub total_profit: f64,

    pub completed_tasks: u32,

    #[serde(default)]
    pub rejected_tasks: u32,

    #[serde(default)]
    pub resource_utilization: Vec<UtilizationSample>,

    pub execution_time_ms: f64,

    pub theoretical_complexity: String,

    #[serde(default)]
    pub schedule: Vec<ScheduledTask>,

    /// Explicit category tag, when the payload carries one.
    #[serde(default)]
    pub category: Option<AlgorithmCategory>,
}

impl AlgorithmResult {
    /// Peak CPU utilisation (percent) over the sampled timeline, `0.0` when
    /// no samples were reported.
    pub fn peak_cpu(&self) -> f64 {
        self.resource_utilization
            .iter()
            .map(|u| u.cpu)
            .filter(|c| c.is_finite())
            .fold(0.0, f64::max)
    }

    /// Fraction of `total_tasks` this algorithm completed.
    ///
    /// Returns `0.0` when `total_tasks` is zero to avoid division by zero.
    pub fn completion_rate(&self, total_tasks: u32) -> f64 {
        if total_tasks == 0 {
            0.0
        } else {
            self.completed_tasks as f64 / total_tasks as f64
        }
    }

    /// Resolve the category: explicit tag first, then `table`, else
    /// [`AlgorithmCategory::Unknown`].
    pub fn resolve_category(&self, table: &HashMap<String, AlgorithmCategory>) -> AlgorithmCategory {
        self.category
            .or_else(|| table.get(&self.name).copied())
            .unwrap_or_default()
    }

    /// Group the schedule by VM, each VM's placements sorted by start time.
    pub fn schedule_by_vm(&self) -> BTreeMap<VmId, Vec<&ScheduledTask>> {
        let mut by_vm: BTreeMap<VmId, Vec<&ScheduledTask>> = BTreeMap::new();
        for entry in &self.schedule {
            by_vm.entry(entry.vm_id).or_default().push(entry);
        }
        for entries in by_vm.values_mut() {
            // stable: equal start times keep schedule order
            entries.sort_by_key(|e| e.start_time);
        }
        by_vm
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// Problems with a scenario payload that leave nothing to display.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    /// The scenario reported no tasks at all.
    #[error("scenario '{case}' has total_tasks = 0")]
    NoTasks { case: CaseType },

    /// The results mapping was empty.
    #[error("scenario '{case}' carries no algorithm results")]
    NoResults { case: CaseType },
}

/// Everything the backends returned for one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub case_type: CaseType,
    pub total_tasks: u32,
    /// Algorithm name → metrics, in payload order.
    pub results: IndexMap<String, AlgorithmResult>,
}

impl ScenarioResult {
    /// Flatten the results mapping into a list in source insertion order.
    ///
    /// Each entry's `name` is set to its mapping key. An empty mapping yields
    /// an empty list ("no data"), not an error.
    pub fn ordered_results(&self) -> Vec<AlgorithmResult> {
        self.results
            .iter()
            .map(|(name, result)| AlgorithmResult {
                name: name.clone(),
                ..result.clone()
            })
            .collect()
    }

    /// Reject scenarios with nothing to show.
    ///
    /// # Errors
    /// * [`ScenarioError::NoTasks`] – `total_tasks == 0`.
    /// * [`ScenarioError::NoResults`] – empty results mapping.
    pub fn check(&self) -> Result<(), ScenarioError> {
        if self.total_tasks == 0 {
            return Err(ScenarioError::NoTasks {
                case: self.case_type,
            });
        }
        if self.results.is_empty() {
            return Err(ScenarioError::NoResults {
                case: self.case_type,
            });
        }
        Ok(())
    }

    /// Collect every non-fatal upstream defect in the payload.
    ///
    /// Order is deterministic: algorithms in payload order, and within one
    /// algorithm count checks first, then schedule checks by VM id.
    pub fn data_quality(&self) -> Vec<DataQualityWarning> {
        let mut warnings = Vec::new();

        for (name, result) in &self.results {
            if result.completed_tasks > self.total_tasks {
                warnings.push(DataQualityWarning::CompletedExceedsTotal {
                    algorithm: name.clone(),
                    completed: result.completed_tasks,
                    total: self.total_tasks,
                });
            }
            if result.total_profit < 0.0 || !result.total_profit.is_finite() {
                warnings.push(DataQualityWarning::InvalidProfit {
                    algorithm: name.clone(),
                    value: result.total_profit,
                });
            }

            for entry in &result.schedule {
                if entry.end_time < entry.start_time {
                    warnings.push(DataQualityWarning::InvertedInterval {
                        algorithm: name.clone(),
                        task_id: entry.task_id,
                        start: entry.start_time,
                        end: entry.end_time,
                    });
                }
            }

            for (vm_id, entries) in result.schedule_by_vm() {
                for (i, a) in entries.iter().enumerate() {
                    for b in &entries[i + 1..] {
                        if a.overlaps(b) {
                            warnings.push(DataQualityWarning::OverlappingSchedule {
                                algorithm: name.clone(),
                                vm_id,
                                first: a.task_id,
                                second: b.task_id,
                            });
                        }
                    }
                }
            }
        }

        warnings
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn result(profit: f64, completed: u32, time_ms: f64) -> AlgorithmResult {
        AlgorithmResult {
            name: String::new(),
            total_profit: profit,
            completed_tasks: completed,
            rejected_tasks: 0,
            resource_utilization: vec![],
            execution_time_ms: time_ms,
            theoretical_complexity: "O(n log n + n*m)".into(),
            schedule: vec![],
            category: None,
        }
    }

    fn placement(task_id: TaskId, vm_id: VmId, start: u64, end: u64) -> ScheduledTask {
        ScheduledTask {
            task_id,
            vm_id,
            start_time: start,
            end_time: end,
            profit: 10.0,
        }
    }

    // ── ordered_results ───────────────────────────────────────────────────────

    #[test]
    fn ordered_results_preserves_payload_order() {
        let json = r#"{
            "case_type": "mixed",
            "total_tasks": 10,
            "results": {
                "Shortest Job First (SJF)": {"total_profit": 1, "completed_tasks": 1, "execution_time_ms": 1.0, "theoretical_complexity": "x"},
                "Knapsack-based DP": {"total_profit": 2, "completed_tasks": 2, "execution_time_ms": 2.0, "theoretical_complexity": "y"},
                "Earliest Deadline First (EDF)": {"total_profit": 3, "completed_tasks": 3, "execution_time_ms": 3.0, "theoretical_complexity": "z"}
            }
        }"#;
        let scenario: ScenarioResult = serde_json::from_str(json).unwrap();
        let names: Vec<String> = scenario
            .ordered_results()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Shortest Job First (SJF)",
                "Knapsack-based DP",
                "Earliest Deadline First (EDF)"
            ]
        );
    }

    #[test]
    fn mapping_key_overrides_backend_algorithm_name() {
        let mut r = result(1.0, 1, 1.0);
        r.name = "stale".into();
        let scenario = ScenarioResult {
            case_type: CaseType::Best,
            total_tasks: 1,
            results: IndexMap::from([("EDF".to_string(), r)]),
        };
        assert_eq!(scenario.ordered_results()[0].name, "EDF");
    }

    #[test]
    fn empty_mapping_is_no_data_not_error() {
        let scenario = ScenarioResult {
            case_type: CaseType::Worst,
            total_tasks: 5,
            results: IndexMap::new(),
        };
        assert!(scenario.ordered_results().is_empty());
        assert_eq!(
            scenario.check(),
            Err(ScenarioError::NoResults {
                case: CaseType::Worst
            })
        );
    }

    #[test]
    fn zero_total_tasks_fails_check() {
        let scenario = ScenarioResult {
            case_type: CaseType::Best,
            total_tasks: 0,
            results: IndexMap::from([("A".to_string(), result(1.0, 0, 1.0))]),
        };
        assert!(matches!(scenario.check(), Err(ScenarioError::NoTasks { .. })));
    }

    #[test]
    fn full_backend_payload_deserializes() {
        let json = r#"{
            "case_type": "best",
            "total_tasks": 2,
            "results": {
                "Knapsack-based DP": {
                    "algorithm_name": "Knapsack-based DP",
                    "total_profit": 250,
                    "completed_tasks": 2,
                    "rejected_tasks": 0,
                    "resource_utilization": [
                        {"time": 0, "cpu": 25.0, "ram": 12.5, "avg": 18.75},
                        {"time": 1, "cpu": 50.0, "ram": 25.0, "avg": 37.5}
                    ],
                    "execution_time_ms": 0.42,
                    "theoretical_complexity": "O(n*C*R)",
                    "schedule": [
                        {"task_id": 1, "vm_id": 1, "start_time": 0, "end_time": 3, "profit": 100},
                        {"task_id": 2, "vm_id": 2, "start_time": 1, "end_time": 4, "profit": 150}
                    ]
                }
            }
        }"#;
        let scenario: ScenarioResult = serde_json::from_str(json).unwrap();
        let r = &scenario.results["Knapsack-based DP"];
        assert_eq!(r.schedule.len(), 2);
        assert_eq!(r.peak_cpu(), 50.0);
        assert_eq!(r.category, None);
        assert!(scenario.data_quality().is_empty());
    }

    // ── AlgorithmResult helpers ───────────────────────────────────────────────

    #[test]
    fn peak_cpu_of_empty_utilization_is_zero() {
        assert_eq!(result(1.0, 1, 1.0).peak_cpu(), 0.0);
    }

    #[test]
    fn completion_rate_handles_zero_total() {
        let r = result(1.0, 4, 1.0);
        assert_eq!(r.completion_rate(0), 0.0);
        assert!((r.completion_rate(8) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn category_resolution_prefers_explicit_tag() {
        let mut r = result(1.0, 1, 1.0);
        r.name = "Knapsack-based DP".into();
        let table = HashMap::from([("Knapsack-based DP".to_string(), AlgorithmCategory::Greedy)]);

        assert_eq!(r.resolve_category(&table), AlgorithmCategory::Greedy);

        r.category = Some(AlgorithmCategory::DynamicProgramming);
        assert_eq!(r.resolve_category(&table), AlgorithmCategory::DynamicProgramming);
    }

    #[test]
    fn category_is_unknown_without_tag_or_table_entry() {
        let mut r = result(1.0, 1, 1.0);
        r.name = "Greedy EDF".into();
        assert_eq!(r.resolve_category(&HashMap::new()), AlgorithmCategory::Unknown);
    }

    #[test]
    fn schedule_by_vm_sorts_by_start_time() {
        let mut r = result(1.0, 3, 1.0);
        r.schedule = vec![
            placement(3, 2, 5, 6),
            placement(1, 1, 4, 5),
            placement(2, 1, 0, 2),
        ];
        let by_vm = r.schedule_by_vm();
        let vm1: Vec<TaskId> = by_vm[&1].iter().map(|e| e.task_id).collect();
        assert_eq!(vm1, vec![2, 1]);
        assert_eq!(by_vm[&2].len(), 1);
    }

    // ── data_quality ──────────────────────────────────────────────────────────

    #[test]
    fn overlapping_tasks_on_same_vm_are_surfaced() {
        let mut r = result(1.0, 2, 1.0);
        r.schedule = vec![placement(1, 1, 0, 4), placement(2, 1, 3, 6)];
        let scenario = ScenarioResult {
            case_type: CaseType::Mixed,
            total_tasks: 2,
            results: IndexMap::from([("EDF".to_string(), r)]),
        };
        assert_eq!(
            scenario.data_quality(),
            vec![DataQualityWarning::OverlappingSchedule {
                algorithm: "EDF".into(),
                vm_id: 1,
                first: 1,
                second: 2,
            }]
        );
    }

    #[test]
    fn touching_intervals_and_other_vms_do_not_overlap() {
        let mut r = result(1.0, 3, 1.0);
        r.schedule = vec![
            placement(1, 1, 0, 3),
            placement(2, 1, 3, 5),  // starts exactly when 1 ends
            placement(3, 2, 0, 5),  // different VM
        ];
        let scenario = ScenarioResult {
            case_type: CaseType::Mixed,
            total_tasks: 3,
            results: IndexMap::from([("EDF".to_string(), r)]),
        };
        assert!(scenario.data_quality().is_empty());
    }

    #[test]
    fn completed_above_total_is_flagged() {
        let scenario = ScenarioResult {
            case_type: CaseType::Best,
            total_tasks: 3,
            results: IndexMap::from([("A".to_string(), result(1.0, 4, 1.0))]),
        };
        assert!(matches!(
            scenario.data_quality().as_slice(),
            [DataQualityWarning::CompletedExceedsTotal { completed: 4, total: 3, .. }]
        ));
    }

    #[test]
    fn negative_profit_and_inverted_interval_are_flagged() {
        let mut r = result(-5.0, 1, 1.0);
        r.schedule = vec![placement(7, 1, 5, 2)];
        let scenario = ScenarioResult {
            case_type: CaseType::Best,
            total_tasks: 3,
            results: IndexMap::from([("A".to_string(), r)]),
        };
        let w = scenario.data_quality();
        assert_eq!(w.len(), 2);
        assert!(matches!(w[0], DataQualityWarning::InvalidProfit { .. }));
        assert!(matches!(w[1], DataQualityWarning::InvertedInterval { task_id: 7, .. }));
    }

    #[test]
    fn case_type_text() {
        assert_eq!(CaseType::Worst.display_name(), "Worst Case");
        assert_eq!(CaseType::Mixed.to_string(), "mixed");
        assert!(CaseType::Best.description().contains("lightweight"));
    }
}
