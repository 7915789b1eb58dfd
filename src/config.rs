//! The request/response contract of the solver core.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Assignment, BatchId, FacultyId};

fn default_true() -> bool {
    true
}

fn default_worker_count() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintConfig {
    #[serde(default)]
    pub require_consecutive_labs: bool,
    #[serde(default = "default_true")]
    pub minimize_max_load: bool,
    #[serde(default)]
    pub allow_classroom_kind_mismatch: bool,
    #[serde(default)]
    pub faculty_daily_cap_override: Option<u32>,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            require_consecutive_labs: false,
            minimize_max_load: true,
            allow_classroom_kind_mismatch: false,
            faculty_daily_cap_override: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub batch_ids: Vec<BatchId>,
    #[serde(default)]
    pub constraints: ConstraintConfig,
    #[serde(default)]
    pub use_ai_suggestions: bool,
    pub time_budget_ms: u64,
    #[serde(default)]
    pub seed: i64,
    #[serde(default = "default_worker_count")]
    pub worker_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Infeasible,
    Timeout,
    DataError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    ResourceShortage,
    ClassroomKindShortage,
    FacultyDemandShortage,
    AvailabilityShortage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: String,
    pub priority: String,
    pub description: String,
    pub implementation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub classroom_utilization_pct: f64,
    pub average_faculty_workload: f64,
    pub faculty_workload: BTreeMap<FacultyId, u32>,
    pub max_faculty_load: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    pub status: Status,
    pub assignments: Vec<Assignment>,
    pub metrics: Metrics,
    pub conflicts: Vec<Conflict>,
    pub suggestions: Vec<Suggestion>,
}
