//! Solution extraction: reads the chosen decision variables back into an
//! ordered assignment list. Sort order is part of the contract -- two
//! solves on identical input with the same seed must produce
//! byte-identical output.

use crate::builder::VarKey;
use crate::domain::{Assignment, BatchId, Cell, ClassroomId, FacultyId, SubjectId, DAY_NAMES, TIME_SLOT_NAMES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAssignment {
    pub batch_id: BatchId,
    pub subject_id: SubjectId,
    pub faculty_id: FacultyId,
    pub classroom_id: ClassroomId,
    pub cell: Cell,
}

/// Collects the chosen variable keys into a deterministically sorted list
/// of raw assignments, ordered by `(batch_id, day, time_slot)`.
pub fn extract(chosen: &[VarKey]) -> Vec<RawAssignment> {
    let mut raw: Vec<RawAssignment> = chosen
        .iter()
        .map(|k| RawAssignment {
            batch_id: k.batch,
            subject_id: k.subject,
            faculty_id: k.faculty,
            classroom_id: k.classroom,
            cell: k.cell,
        })
        .collect();
    raw.sort_by_key(|a| (a.batch_id, a.cell.day, a.cell.slot));
    raw
}

/// Converts raw assignments into the persisted shape, with the literal day
/// name / time-slot-range strings of the weekly grid.
pub fn to_assignments(raw: &[RawAssignment]) -> Vec<Assignment> {
    raw.iter()
        .map(|a| Assignment {
            batch_id: a.batch_id,
            day_name: DAY_NAMES[a.cell.day as usize].to_string(),
            time_slot: TIME_SLOT_NAMES[a.cell.slot as usize].to_string(),
            classroom_id: a.classroom_id,
            subject_id: a.subject_id,
            faculty_id: a.faculty_id,
            is_fixed: false,
            is_approved: false,
        })
        .collect()
}
