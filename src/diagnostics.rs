//! Infeasibility diagnostics: aggregate supply-vs-demand pigeonhole checks
//! that explain the common misconfigurations. These are advisory -- they
//! do not explain every infeasibility, since the true minimal unsat core
//! can be arbitrary -- but they catch the usual ones.

use std::collections::{HashMap, HashSet};

use crate::config::{Conflict, ConflictKind, Severity};
use crate::domain::{Batch, Classroom, Faculty, SessionKind, Subject, SubjectId, CELLS, DAYS};

pub fn analyze(
    batches: &[Batch],
    classrooms: &[Classroom],
    faculty: &[Faculty],
    subjects: &[Subject],
) -> Vec<Conflict> {
    let subject_by_id: HashMap<SubjectId, &Subject> = subjects.iter().map(|s| (s.id, s)).collect();
    let mut conflicts = Vec::new();

    global_cell_supply(batches, classrooms, &subject_by_id, &mut conflicts);
    per_session_kind_supply(batches, classrooms, &subject_by_id, &mut conflicts);
    per_faculty_demand(batches, faculty, &subject_by_id, &mut conflicts);
    availability_coverage(subjects, classrooms, faculty, &mut conflicts);

    conflicts
}

/// 1. Global cell supply: total required hours vs total classroom-cells.
fn global_cell_supply(
    batches: &[Batch],
    classrooms: &[Classroom],
    subject_by_id: &HashMap<SubjectId, &Subject>,
    conflicts: &mut Vec<Conflict>,
) {
    let required: u32 = batches
        .iter()
        .flat_map(|b| b.enrolled_subjects.iter())
        .filter_map(|sid| subject_by_id.get(sid))
        .map(|s| s.required_hours())
        .sum();
    let supply = classrooms.len() as u32 * CELLS as u32;
    if required > supply {
        conflicts.push(Conflict {
            kind: ConflictKind::ResourceShortage,
            message: format!(
                "Required {} slots but only {} available",
                required, supply
            ),
            severity: Severity::High,
        });
    }
}

/// 2. Per-session-kind supply: lecture/lab demand vs capacity of
/// kind-matching classrooms.
fn per_session_kind_supply(
    batches: &[Batch],
    classrooms: &[Classroom],
    subject_by_id: &HashMap<SubjectId, &Subject>,
    conflicts: &mut Vec<Conflict>,
) {
    for session in [SessionKind::Lecture, SessionKind::Lab] {
        let demand: u32 = batches
            .iter()
            .flat_map(|b| b.enrolled_subjects.iter())
            .filter_map(|sid| subject_by_id.get(sid))
            .flat_map(|s| s.sessions())
            .filter(|(k, _)| *k == session)
            .map(|(_, hours)| hours)
            .sum();
        let matching_rooms = classrooms.iter().filter(|c| c.kind.matches(session)).count() as u32;
        let supply = matching_rooms * CELLS as u32;
        if demand > supply {
            conflicts.push(Conflict {
                kind: ConflictKind::ClassroomKindShortage,
                message: format!(
                    "{:?} sessions require {} hours but matching classrooms only provide {} cells",
                    session, demand, supply
                ),
                severity: Severity::Medium,
            });
        }
    }
}

/// 3. Per-faculty demand: hours of subjects a faculty member is qualified
/// to teach, actually demanded by the given batches, vs their weekly cap.
fn per_faculty_demand(
    batches: &[Batch],
    faculty: &[Faculty],
    subject_by_id: &HashMap<SubjectId, &Subject>,
    conflicts: &mut Vec<Conflict>,
) {
    for f in faculty {
        let demand: u32 = batches
            .iter()
            .flat_map(|b| b.enrolled_subjects.iter())
            .filter_map(|sid| subject_by_id.get(sid))
            .filter(|s| f.teachable.contains(&s.id))
            .map(|s| s.required_hours())
            .sum();
        let supply = f.max_daily_classes * DAYS as u32;
        if demand > supply {
            conflicts.push(Conflict {
                kind: ConflictKind::FacultyDemandShortage,
                message: format!(
                    "Faculty {} is demanded for {} hours but capped at {} hours/week ({} classes/day)",
                    f.id, demand, supply, f.max_daily_classes
                ),
                severity: Severity::Medium,
            });
        }
    }
}

/// 4. Availability coverage: distinct (day, slot) cells reachable by any
/// qualified-faculty/matching-classroom pair, per subject, vs its required
/// hours (capacity-agnostic, unlike the builder's own per-batch pre-check).
/// Counted per distinct cell, not per `(faculty, classroom, cell)` triple --
/// classroom exclusivity alone bounds a subject to one hour of supply per
/// cell no matter how many qualified faculty or matching rooms reach it.
fn availability_coverage(
    subjects: &[Subject],
    classrooms: &[Classroom],
    faculty: &[Faculty],
    conflicts: &mut Vec<Conflict>,
) {
    for subject in subjects {
        for (session, hours) in subject.sessions() {
            let qualified: Vec<&Faculty> = faculty
                .iter()
                .filter(|f| f.teachable.contains(&subject.id))
                .collect();
            let matching_rooms: Vec<&Classroom> =
                classrooms.iter().filter(|c| c.kind.matches(session)).collect();

            let mut eligible_cells: HashSet<crate::domain::Cell> = HashSet::new();
            for f in &qualified {
                for c in &matching_rooms {
                    for cell in crate::domain::Cell::all() {
                        if f.availability.is_available(cell) && c.availability.is_available(cell) {
                            eligible_cells.insert(cell);
                        }
                    }
                }
            }

            if (eligible_cells.len() as u32) < hours {
                conflicts.push(Conflict {
                    kind: ConflictKind::AvailabilityShortage,
                    message: format!(
                        "Subject {} ({:?}) needs {} hours but only {} eligible distinct \
                         (day, slot) cells exist",
                        subject.code, session, hours, eligible_cells.len()
                    ),
                    severity: Severity::High,
                });
            }
        }
    }
}
