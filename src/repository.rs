//! The persistence boundary. The core only ever talks to entities through
//! this trait; how they are actually stored is someone else's problem.

use std::sync::Mutex;

use crate::domain::{Assignment, Batch, BatchId, Classroom, Faculty, Subject, TimetableId};
use crate::error::SolverError;

pub trait Repository {
    fn load_classrooms(&self) -> Result<Vec<Classroom>, SolverError>;
    fn load_faculty(&self) -> Result<Vec<Faculty>, SolverError>;
    fn load_subjects(&self) -> Result<Vec<Subject>, SolverError>;
    fn load_batches(&self, ids: &[BatchId]) -> Result<Vec<Batch>, SolverError>;
    fn persist_timetable(&self, assignments: &[Assignment]) -> Result<TimetableId, SolverError>;
}

/// An in-memory `Repository`, used by the demo HTTP handler and by the
/// integration tests. Mirrors the mock-repository pattern used for tests
/// elsewhere in the corpus (e.g. a feature-gated in-memory content
/// repository standing in for a real database).
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    classrooms: Vec<Classroom>,
    faculty: Vec<Faculty>,
    subjects: Vec<Subject>,
    batches: Vec<Batch>,
    next_timetable_id: Mutex<TimetableId>,
    persisted: Mutex<Vec<Vec<Assignment>>>,
}

impl InMemoryRepository {
    pub fn new(
        classrooms: Vec<Classroom>,
        faculty: Vec<Faculty>,
        subjects: Vec<Subject>,
        batches: Vec<Batch>,
    ) -> Self {
        Self {
            classrooms,
            faculty,
            subjects,
            batches,
            next_timetable_id: Mutex::new(1),
            persisted: Mutex::new(Vec::new()),
        }
    }

    /// The assignment lists handed to `persist_timetable` so far, in call
    /// order. Exposed for tests that want to assert on what was persisted.
    pub fn persisted_timetables(&self) -> Vec<Vec<Assignment>> {
        self.persisted.lock().unwrap().clone()
    }
}

impl Repository for InMemoryRepository {
    fn load_classrooms(&self) -> Result<Vec<Classroom>, SolverError> {
        Ok(self.classrooms.clone())
    }

    fn load_faculty(&self) -> Result<Vec<Faculty>, SolverError> {
        Ok(self.faculty.clone())
    }

    fn load_subjects(&self) -> Result<Vec<Subject>, SolverError> {
        Ok(self.subjects.clone())
    }

    fn load_batches(&self, ids: &[BatchId]) -> Result<Vec<Batch>, SolverError> {
        let found: Vec<Batch> = self
            .batches
            .iter()
            .filter(|b| ids.contains(&b.id))
            .cloned()
            .collect();
        if found.len() != ids.len() {
            let missing: Vec<BatchId> = ids
                .iter()
                .copied()
                .filter(|id| !found.iter().any(|b| b.id == *id))
                .collect();
            return Err(SolverError::DataError(format!(
                "unknown batch id(s): {:?}",
                missing
            )));
        }
        Ok(found)
    }

    fn persist_timetable(&self, assignments: &[Assignment]) -> Result<TimetableId, SolverError> {
        let mut next_id = self.next_timetable_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;
        self.persisted.lock().unwrap().push(assignments.to_vec());
        Ok(id)
    }
}
