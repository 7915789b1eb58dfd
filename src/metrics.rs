//! Utilization and workload statistics.

use std::collections::BTreeMap;

use crate::config::Metrics;
use crate::domain::{Classroom, Faculty, CELLS};
use crate::extractor::RawAssignment;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn compute(assignments: &[RawAssignment], classrooms: &[Classroom], faculty: &[Faculty]) -> Metrics {
    let total_cells = classrooms.len() as f64 * CELLS as f64;
    let utilization = if total_cells > 0.0 {
        (assignments.len() as f64 / total_cells) * 100.0
    } else {
        0.0
    };

    // `BTreeMap`, not `HashMap`: metric keys must serialize in deterministic
    // (here, faculty-id) order per the ordering contract on observable output.
    let mut workload: BTreeMap<u32, u32> = BTreeMap::new();
    for a in assignments {
        *workload.entry(a.faculty_id).or_insert(0) += 1;
    }

    let average_workload = if faculty.is_empty() {
        0.0
    } else {
        assignments.len() as f64 / faculty.len() as f64
    };

    let max_load = workload.values().copied().max().unwrap_or(0);

    Metrics {
        classroom_utilization_pct: round2(utilization),
        average_faculty_workload: round2(average_workload),
        faculty_workload: workload,
        max_faculty_load: max_load,
    }
}
