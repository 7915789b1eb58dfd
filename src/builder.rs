//! The problem builder: turns entity tables plus a [`ConstraintConfig`]
//! into a sparse 0/1 ILP model.
//!
//! A dense `batch * day * slot * classroom * subject * faculty` boolean
//! tensor, left to constraints to zero out most of, is correct but wastes
//! orders of magnitude of memory and build time; here only the *eligible*
//! tuples are enumerated up front, the same pre-filtering idea a simpler
//! course/room/timeslot model applies to its own candidate triples.

use std::collections::{HashMap, HashSet};

use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};
use itertools::Itertools;
use log::{info, trace};

use crate::config::ConstraintConfig;
use crate::domain::{
    Batch, BatchId, Cell, Classroom, ClassroomId, Faculty, FacultyId, RoomKind, SessionKind,
    Subject, SubjectId, DAYS,
};
use crate::error::SolverError;

/// A weight on the consecutive-lab bonus small enough never to outweigh a
/// single unit of the primary minimax objective (`L`).
const CONSECUTIVE_LAB_BONUS_WEIGHT: f64 = 0.01;

/// Identifies one sparse decision variable `x[b,s,session,f,c,cell]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarKey {
    pub batch: BatchId,
    pub subject: SubjectId,
    pub session: SessionKind,
    pub faculty: FacultyId,
    pub classroom: ClassroomId,
    pub cell: Cell,
}

/// The output of the problem builder: variables, constraints and an
/// objective, ready for the solver driver to hand to `good_lp`.
pub struct BuiltModel {
    pub problem: ProblemVariables,
    pub var_map: HashMap<VarKey, Variable>,
    pub objective: Expression,
    pub minimize: bool,
    pub constraints: Vec<Constraint>,
}

pub fn build(
    batches: &[Batch],
    classrooms: &[Classroom],
    faculty: &[Faculty],
    subjects: &[Subject],
    config: &ConstraintConfig,
) -> Result<BuiltModel, SolverError> {
    let subject_by_id: HashMap<SubjectId, &Subject> = subjects.iter().map(|s| (s.id, s)).collect();

    for batch in batches {
        let mut seen = HashSet::new();
        for subject_id in &batch.enrolled_subjects {
            if !seen.insert(*subject_id) {
                return Err(SolverError::DataError(format!(
                    "batch {} enrolls subject {} more than once",
                    batch.id, subject_id
                )));
            }
            if !subject_by_id.contains_key(subject_id) {
                return Err(SolverError::DataError(format!(
                    "batch {} enrolls unknown subject {}",
                    batch.id, subject_id
                )));
            }
        }
    }

    info!(
        "building model for {} batches, {} classrooms, {} faculty, {} subjects",
        batches.len(),
        classrooms.len(),
        faculty.len(),
        subjects.len()
    );

    let mut problem = ProblemVariables::new();
    let mut keys: Vec<VarKey> = Vec::new();

    for batch in batches {
        for subject_id in &batch.enrolled_subjects {
            let subject = subject_by_id[subject_id];
            for (session, hours) in subject.sessions() {
                let eligible_faculty: Vec<&Faculty> = faculty
                    .iter()
                    .filter(|f| f.teachable.contains(&subject.id))
                    .collect();
                let eligible_classrooms: Vec<&Classroom> = classrooms
                    .iter()
                    .filter(|c| {
                        (config.allow_classroom_kind_mismatch || c.kind.matches(session))
                            && c.capacity >= batch.student_count
                    })
                    .collect();

                let mut eligible_cells: HashSet<Cell> = HashSet::new();
                for f in &eligible_faculty {
                    for c in &eligible_classrooms {
                        for cell in Cell::all() {
                            if f.availability.is_available(cell) && c.availability.is_available(cell)
                            {
                                keys.push(VarKey {
                                    batch: batch.id,
                                    subject: subject.id,
                                    session,
                                    faculty: f.id,
                                    classroom: c.id,
                                    cell,
                                });
                                eligible_cells.insert(cell);
                            }
                        }
                    }
                }

                // Count distinct cells, not `(faculty, classroom, cell)` triples:
                // classroom exclusivity (constraint 2) already bounds each cell to at
                // most one class, so a cell reachable via several qualified faculty or
                // matching classrooms is still only one hour of actual supply, not
                // several.
                if (eligible_cells.len() as u32) < hours {
                    return Err(SolverError::DataError(format!(
                        "subject {} ({:?}) for batch {} requires {} hours but only {} eligible \
                         distinct (day, slot) cells exist \
                         (qualified faculty: {}, matching classrooms: {})",
                        subject.code,
                        session,
                        batch.id,
                        hours,
                        eligible_cells.len(),
                        eligible_faculty.len(),
                        eligible_classrooms.len(),
                    )));
                }
            }
        }
    }

    if keys.is_empty() {
        return Err(SolverError::DataError(
            "no eligible assignment variables could be constructed from the given batches".into(),
        ));
    }

    trace!(
        "generated {} sparse decision variables (dense tensor would have been much larger)",
        keys.len()
    );

    let vars = problem.add_vector(variable().binary(), keys.len());
    let var_map: HashMap<VarKey, Variable> = keys.into_iter().zip(vars).collect();

    let mut constraints = Vec::new();

    // Constraint 1: batch exclusivity.
    info!("adding batch exclusivity constraints");
    for batch in batches {
        for cell in Cell::all() {
            let occ: Expression = var_map
                .iter()
                .filter(|(k, _)| k.batch == batch.id && k.cell == cell)
                .map(|(_, v)| *v)
                .sum();
            constraints.push(constraint!(occ <= 1));
        }
    }

    // Constraint 2: classroom exclusivity.
    info!("adding classroom exclusivity constraints");
    for room in classrooms {
        for cell in Cell::all() {
            let occ: Expression = var_map
                .iter()
                .filter(|(k, _)| k.classroom == room.id && k.cell == cell)
                .map(|(_, v)| *v)
                .sum();
            constraints.push(constraint!(occ <= 1));
        }
    }

    // Constraint 3: faculty exclusivity.
    info!("adding faculty exclusivity constraints");
    for f in faculty {
        for cell in Cell::all() {
            let occ: Expression = var_map
                .iter()
                .filter(|(k, _)| k.faculty == f.id && k.cell == cell)
                .map(|(_, v)| *v)
                .sum();
            constraints.push(constraint!(occ <= 1));
        }
    }

    // Constraint 4: faculty daily cap.
    info!("adding faculty daily cap constraints");
    for f in faculty {
        let cap = config.faculty_daily_cap_override.unwrap_or(f.max_daily_classes);
        for day in 0..DAYS as u8 {
            let load: Expression = var_map
                .iter()
                .filter(|(k, _)| k.faculty == f.id && k.cell.day == day)
                .map(|(_, v)| *v)
                .sum();
            constraints.push(constraint!(load <= cap as f64));
        }
    }

    // Constraint 5: subject coverage (hard equality; missing from the
    // source, which only ever upper-bounds occupancy).
    info!("adding subject coverage constraints");
    for batch in batches {
        for subject_id in &batch.enrolled_subjects {
            let subject = subject_by_id[subject_id];
            for (session, hours) in subject.sessions() {
                let scheduled: Expression = var_map
                    .iter()
                    .filter(|(k, _)| {
                        k.batch == batch.id && k.subject == subject.id && k.session == session
                    })
                    .map(|(_, v)| *v)
                    .sum();
                constraints.push(constraint!(scheduled == hours as f64));
            }
        }
    }

    // Constraint 9 (optional): reward consecutive lab cells on the same day.
    // Implemented as a *linked* bonus term (see DESIGN.md for the contrast
    // with an earlier, unlinked attempt) -- each indicator is bounded
    // above by both of the occupancy expressions it bridges, so the
    // solver cannot claim the bonus without actually placing both lab
    // cells.
    let mut consecutive_bonus: Expression = Expression::from(0.0);
    if config.require_consecutive_labs {
        info!("adding consecutive-lab bonus terms");
        for batch in batches {
            for subject_id in &batch.enrolled_subjects {
                let subject = subject_by_id[subject_id];
                if subject.lab_hours < 2 {
                    continue;
                }
                for day in 0..DAYS as u8 {
                    for slot in 0..(crate::domain::SLOTS_PER_DAY as u8 - 1) {
                        let cell_a = Cell::new(day, slot);
                        let cell_b = Cell::new(day, slot + 1);
                        let occ_a: Expression = var_map
                            .iter()
                            .filter(|(k, _)| {
                                k.batch == batch.id
                                    && k.subject == subject.id
                                    && k.session == SessionKind::Lab
                                    && k.cell == cell_a
                            })
                            .map(|(_, v)| *v)
                            .sum();
                        let occ_b: Expression = var_map
                            .iter()
                            .filter(|(k, _)| {
                                k.batch == batch.id
                                    && k.subject == subject.id
                                    && k.session == SessionKind::Lab
                                    && k.cell == cell_b
                            })
                            .map(|(_, v)| *v)
                            .sum();
                        let pair = problem.add(variable().binary());
                        constraints.push(constraint!(pair <= occ_a));
                        constraints.push(constraint!(pair <= occ_b));
                        consecutive_bonus += pair;
                    }
                }
            }
        }
    }

    // Objective. Primary: maximize total scheduled classes -- but
    // constraint 5 already pins this, so the effective objective (when
    // enabled) is the minimax faculty workload: minimize L subject to
    // per-(faculty, day) load <= L.
    let total_scheduled: Expression = var_map.values().map(|v| Expression::from(*v)).sum();

    let (objective, minimize) = if config.minimize_max_load {
        info!("adding minimax workload-balance objective (L)");
        let load_var = problem.add(variable().min(0.0));
        for f in faculty {
            for day in 0..DAYS as u8 {
                let load: Expression = var_map
                    .iter()
                    .filter(|(k, _)| k.faculty == f.id && k.cell.day == day)
                    .map(|(_, v)| *v)
                    .sum();
                constraints.push(constraint!(load <= load_var));
            }
        }
        (
            Expression::from(load_var) - CONSECUTIVE_LAB_BONUS_WEIGHT * consecutive_bonus,
            true,
        )
    } else {
        (
            total_scheduled + CONSECUTIVE_LAB_BONUS_WEIGHT * consecutive_bonus,
            false,
        )
    };

    Ok(BuiltModel {
        problem,
        var_map,
        objective,
        minimize,
        constraints,
    })
}

/// Counts distinct faculty ids referenced in the built variable set, a
/// cheap sanity figure logged by the solver driver before invoking HiGHs.
pub fn distinct_faculty(var_map: &HashMap<VarKey, Variable>) -> usize {
    var_map.keys().map(|k| k.faculty).unique().count()
}
